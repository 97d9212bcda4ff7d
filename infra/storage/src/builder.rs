use crate::codec::Compression;
use crate::engine::{Storage, StorageInner};
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::fs;
use tracing::info;

/// Builder state before a root directory is chosen.
#[derive(Debug, Default)]
pub struct NoRoot;

/// Builder state holding the root directory.
#[derive(Debug)]
pub struct WithRoot(PathBuf);

/// Configures and opens a [`Storage`]; [`connect`](StorageBuilder::connect) needs a root.
#[derive(Debug)]
pub struct StorageBuilder<R = NoRoot> {
    root: R,
    compression: Compression,
    create: bool,
}

impl<R> StorageBuilder<R> {
    #[must_use]
    pub const fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Whether `connect` may create a missing root. On by default.
    #[must_use]
    pub const fn create(mut self, enable: bool) -> Self {
        self.create = enable;
        self
    }
}

impl StorageBuilder<NoRoot> {
    #[must_use]
    pub const fn new() -> Self {
        Self { root: NoRoot, compression: Compression::None, create: true }
    }

    #[must_use]
    pub fn root(self, path: impl Into<PathBuf>) -> StorageBuilder<WithRoot> {
        StorageBuilder { root: WithRoot(path.into()), compression: self.compression, create: self.create }
    }
}

impl Default for StorageBuilder<NoRoot> {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBuilder<WithRoot> {
    /// Opens the sandbox.
    ///
    /// The root is created if allowed, then canonicalized, and staging files orphaned
    /// by interrupted writes are purged.
    ///
    /// # Errors
    /// Returns [`StorageError::Io`] if the root cannot be created or resolved, e.g. it
    /// is missing and `create(false)` was set.
    pub async fn connect(self) -> Result<Storage, StorageError> {
        let WithRoot(root) = self.root;

        if self.create {
            fs::create_dir_all(&root).await.context(format!("Creating root {}", root.display()))?;
        }
        let root = fs::canonicalize(&root)
            .await
            .context(format!("Resolving root {}", root.display()))?;

        maintenance::purge_tmp(&root).await;
        info!(path = %root.display(), compression = ?self.compression, "Storage opened");

        Ok(Storage {
            inner: Arc::new(StorageInner {
                root,
                compression: self.compression,
                staged: AtomicU64::new(1),
            }),
        })
    }
}
