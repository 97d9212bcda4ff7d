//! # Logger
//!
//! Process-wide `tracing` setup for the sky binaries.
//!
//! Console lines use the compact formatter. Adding a [`FileOutput`] starts a
//! non-blocking rolling file writer, plain or JSON. Without explicit
//! [`directives`](LoggerBuilder::directives), `RUST_LOG` overrides the configured level.
//!
//! ```rust
//! use sky_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder().name("sky").level(LevelFilter::DEBUG).init().unwrap();
//! tracing::debug!(stars = 0, "ready");
//! ```

mod error;
mod output;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::output::FileOutput;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Parses a textual level (`"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`, `"off"`).
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for anything else.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level.trim().parse::<LevelFilter>().map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{level}': {e}").into(),
        context: None,
    })
}

/// Builder state before [`LoggerBuilder::name`] is called.
#[derive(Debug)]
pub struct Unnamed;

/// Builder state carrying the logger name.
#[derive(Debug)]
pub struct Named(String);

/// Collects logger settings; only a named builder can [`init`](LoggerBuilder::init).
#[derive(Debug)]
pub struct LoggerBuilder<N = Unnamed> {
    name: N,
    level: LevelFilter,
    console: bool,
    directives: Option<String>,
    file: Option<FileOutput>,
}

impl LoggerBuilder<Unnamed> {
    /// Names the logger. The name also prefixes log file names.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        LoggerBuilder {
            name: Named(name.into()),
            level: self.level,
            console: self.console,
            directives: self.directives,
            file: self.file,
        }
    }
}

impl<N> LoggerBuilder<N> {
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Explicit filter directives such as `sky_registry=debug,sky_storage=warn`.
    ///
    /// They replace `RUST_LOG`; malformed directives make `init` fail.
    #[must_use]
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    #[must_use]
    pub fn file(mut self, output: FileOutput) -> Self {
        self.file = Some(output);
        self
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        let Some(directives) = &self.directives else {
            return Ok(builder.from_env_lossy());
        };

        builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Invalid directives '{directives}': {e}").into(),
            context: None,
        })
    }
}

impl LoggerBuilder<Named> {
    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive as long as file output is wanted; dropping it
    /// flushes and stops the background writer.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for an empty name, bad directives or no
    /// output at all, [`LoggerError::Appender`] when the log files cannot be opened, and
    /// [`LoggerError::Subscriber`] when a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.name.0.trim();
        if name.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }
        if !self.console && self.file.is_none() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Nothing to log to: enable the console or add a file output".into(),
                context: None,
            });
        }

        let filter = self.filter()?;
        let mut layers = Vec::with_capacity(2);

        if self.console {
            layers.push(fmt::layer().compact().boxed());
        }

        let guard = match &self.file {
            Some(output) => {
                let (writer, guard) = output.open(name)?;
                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                layers.push(if output.is_json() { layer.json().boxed() } else { layer.boxed() });
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(logger = name, file = guard.is_some(), "Logger installed");

        Ok(Logger { guard })
    }
}

/// Keeps the logging backend running.
#[must_use = "Dropping the logger stops the background file writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { name: Unnamed, level: LevelFilter::INFO, console: true, directives: None, file: None }
    }

    /// Whether a background file writer is attached.
    #[must_use]
    pub const fn has_file_output(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing log files");
        }
    }
}
