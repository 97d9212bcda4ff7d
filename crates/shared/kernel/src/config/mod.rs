use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Base name of the config file looked up when no path is given (`sky.toml`, `sky.json`, ...).
pub const DEFAULT_CONFIG_NAME: &str = "sky";
/// Prefix of environment overrides, e.g. `SKY__STORAGE__DATA_DIR`.
pub const ENV_PREFIX: &str = "SKY";

/// Custom error type for config loading.
#[sky_derive::sky_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file layered with environment overrides.
///
/// 1. **Base File**: `path` when given, otherwise the optional `sky.*` file in the working
///    directory. An explicitly named file must exist; the default one may be absent.
/// 2. **Environment Overrides**: variables prefixed with `SKY__`, nested with `__`
///    (`SKY__LOGGING__LEVEL=debug` maps to `logging.level`).
///
/// # Errors
/// Fails if an explicit file is missing, a source is malformed, or the merged values do
/// not match `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, None)
}

/// Same as [`load_config`], but reads overrides from `vars` instead of the process
/// environment.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    vars: Map<String, String>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, Some(vars))
}

fn load_layered<T>(
    path: Option<impl AsRef<Path>>,
    vars: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (file, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_NAME), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(file.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(vars),
        );

    if required {
        info!("Loading config from {}", file.display());
    } else {
        debug!("Looking for optional config '{}'", file.display());
    }

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
