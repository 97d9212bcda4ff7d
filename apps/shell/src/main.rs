mod cli;
mod session;

use crate::cli::{Cli, SkyCommand};
use crate::session::Session;
use anyhow::Context;
use clap::Parser;
use sky_kernel::config::load_config;
use sky_kernel::domain::config::{LoggingConfig, SkyConfig};
use sky_logger::{FileOutput, Logger, parse_level};
use sky_registry::SkyRegistry;
use sky_storage::{Compression, MemoryPreferences, PreferenceStore, Storage};
use std::io;
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg: SkyConfig =
        load_config(cli.config.as_ref()).context("Critical: Configuration is malformed")?;

    let _logger = init_logger(&cfg.logging)?;

    let registry = SkyRegistry::from_config(&cfg.registry);

    if cli.memory {
        run(registry, MemoryPreferences::new(), cli.command).await
    } else {
        let compression = if cfg.storage.compression { Compression::Lz4 } else { Compression::None };
        let storage = Storage::builder()
            .root(&cfg.storage.data_dir)
            .compression(compression)
            .connect()
            .await
            .context("Failed to open the sky storage")?;
        let prefs = storage.preferences(cfg.storage.namespace.as_str())?;

        run(registry, prefs, cli.command).await
    }
}

async fn run<S: PreferenceStore>(
    registry: SkyRegistry,
    store: S,
    command: SkyCommand,
) -> anyhow::Result<()> {
    let mut session = Session::open(registry, store, io::stdout()).await;

    match command {
        SkyCommand::Interactive => session.interact(BufReader::new(tokio::io::stdin())).await?,
        other => session.execute(other)?,
    }

    session.close().await.context("Failed to save the sky")?;
    Ok(())
}

fn init_logger(cfg: &LoggingConfig) -> anyhow::Result<Logger> {
    let mut builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(parse_level(&cfg.level)?);
    if let Some(directives) = &cfg.filter {
        builder = builder.directives(directives.as_str());
    }
    if let Some(dir) = &cfg.path {
        builder = builder.file(FileOutput::new(dir).json(cfg.json));
    }
    Ok(builder.init()?)
}
