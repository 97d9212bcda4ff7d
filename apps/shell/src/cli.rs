//! Command-line arguments of the `sky` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sky")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fill a small night sky with stars")]
pub(crate) struct Cli {
    /// Config file (defaults to an optional `sky.*` in the working directory)
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Keep the sky in memory only; nothing is loaded or saved
    #[arg(long, global = true)]
    pub(crate) memory: bool,

    #[command(subcommand)]
    pub(crate) command: SkyCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub(crate) enum SkyCommand {
    /// Add small stars
    Small {
        #[arg(default_value_t = 1)]
        count: usize,
    },
    /// Add big stars
    Big {
        #[arg(default_value_t = 1)]
        count: usize,
    },
    /// Remove every star
    Reset,
    /// Print the current sky
    Show,
    /// Read commands from stdin: `s`, `b`, `r`, `show`, `q`
    Interactive,
}
