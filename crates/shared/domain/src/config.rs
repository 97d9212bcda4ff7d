use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration of the sky application.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SkyConfigInner {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub registry: RegistryConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct SkyConfig {
    #[serde(flatten, default)]
    inner: Arc<SkyConfigInner>,
}

impl Deref for SkyConfig {
    type Target = SkyConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for SkyConfig {
    fn deref_mut(&mut self) -> &mut SkyConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where the preferences live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// Scopes the preferences file, like an application package name.
    pub namespace: String,
    pub compression: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    /// Directory for rolling log files; console only when unset.
    pub path: Option<PathBuf>,
    /// Extra filter directives, e.g. `sky_registry=debug`.
    pub filter: Option<String>,
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Fixed RNG seed for a reproducible sky.
    pub seed: Option<u64>,
}

// --- Default ---

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from(".sky"), namespace: "starproject".to_owned(), compression: false }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, path: None, filter: None }
    }
}
