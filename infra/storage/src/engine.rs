//! The sandbox handle and its file operations.

use crate::builder::StorageBuilder;
use crate::codec::Compression;
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance::TMP_MARKER;
use crate::namespace::NamespaceName;
use crate::preferences::FilePreferences;
use crate::security;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

#[derive(Debug)]
pub(crate) struct StorageInner {
    /// Canonical root; sandbox checks compare against it.
    pub(crate) root: PathBuf,
    pub(crate) compression: Compression,
    pub(crate) staged: AtomicU64,
}

/// A cheap, cloneable handle to a storage sandbox.
///
/// Paths are relative to the root. Writes land in a staging file that is synced and
/// then renamed over the target, so a reader sees either the old or the new bytes.
///
/// ```rust
/// use sky_storage::{Compression, Storage, StorageError};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), StorageError> {
/// # let tmp = tempfile::tempdir().unwrap();
/// let storage = Storage::builder()
///     .root(tmp.path().join("sky"))
///     .compression(Compression::Lz4)
///     .connect()
///     .await?;
///
/// storage.write("backup/stars.json", b"[]").await?;
/// assert_eq!(storage.read("backup/stars.json").await?, b"[]");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    pub(crate) inner: Arc<StorageInner>,
}

impl Storage {
    #[must_use = "The storage engine is not initialized until you call .connect()"]
    pub fn builder() -> StorageBuilder {
        StorageBuilder::new()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    #[must_use]
    pub fn compression(&self) -> Compression {
        self.inner.compression
    }

    /// Opens the preference file of `namespace`.
    ///
    /// Package style names such as `com.example.app` are accepted; see [`NamespaceName`].
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidNamespace`] for empty names or names with
    /// characters outside `[A-Za-z0-9_.]`.
    pub fn preferences<N>(&self, namespace: N) -> Result<FilePreferences, StorageError>
    where
        N: TryInto<NamespaceName, Error = StorageError>,
    {
        Ok(FilePreferences::new(self.clone(), namespace.try_into()?))
    }

    /// Maps a relative path into the sandbox.
    ///
    /// # Errors
    /// Returns [`StorageError::PathTraversalAttempt`] if the path escapes the root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
        security::resolve_path(&self.inner.root, path)
    }

    /// Reads and decodes a whole file.
    ///
    /// # Errors
    /// [`StorageError::FileNotFound`] when nothing is stored at `path`,
    /// [`StorageError::Decompress`] when compressed content is damaged.
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, StorageError> {
        let target = self.resolve(path)?;
        let stored = fs::read(&target).await.map_err(|err| missing_or_io(err, &target, "read"))?;
        self.inner.compression.decode(stored)
    }

    /// Replaces the file at `path` with `data`, creating parent directories.
    ///
    /// # Errors
    /// [`StorageError::PathTraversalAttempt`] for paths outside the sandbox,
    /// [`StorageError::Io`] for disk failures.
    pub async fn write(&self, path: impl AsRef<Path>, data: &[u8]) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await.context(format!("Preparing {}", parent.display()))?;
        }

        let staged = self.stage(&target, &self.inner.compression.encode(data)).await?;
        commit(&staged, &target).await?;

        debug!(path = %target.display(), bytes = data.len(), "Stored");
        Ok(())
    }

    /// Deletes the file at `path`.
    ///
    /// # Errors
    /// [`StorageError::FileNotFound`] when there is nothing to delete.
    pub async fn delete(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        fs::remove_file(&target).await.map_err(|err| missing_or_io(err, &target, "delete"))?;
        debug!(path = %target.display(), "Deleted");
        Ok(())
    }

    /// Whether a regular file exists at `path`.
    ///
    /// # Errors
    /// Only when the path is rejected by the sandbox.
    pub fn exists(&self, path: impl AsRef<Path>) -> Result<bool, StorageError> {
        Ok(self.resolve(path)?.is_file())
    }

    /// Writes `payload` to a fresh sibling of `target` and syncs it.
    async fn stage(&self, target: &Path, payload: &[u8]) -> Result<PathBuf, StorageError> {
        let seq = self.inner.staged.fetch_add(1, Ordering::Relaxed);
        let name = target.file_name().and_then(|n| n.to_str()).unwrap_or("data");
        let staged = target.with_file_name(format!("{name}{TMP_MARKER}{}.{seq}", std::process::id()));

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&staged)
            .await
            .context(format!("Staging {}", staged.display()))?;

        let filled = match file.write_all(payload).await.context("Writing staged file") {
            Ok(()) => file.sync_all().await.context("Syncing staged file"),
            Err(e) => Err(e),
        };
        drop(file);

        match filled {
            Ok(()) => Ok(staged),
            Err(e) => {
                discard(&staged).await;
                Err(e)
            },
        }
    }
}

/// Renames the staged file over `target` and syncs the parent directory.
async fn commit(staged: &Path, target: &Path) -> Result<(), StorageError> {
    match fs::rename(staged, target).await {
        Ok(()) => {},
        // Some platforms refuse to rename over an existing file.
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            let replaced = match fs::remove_file(target).await {
                Ok(()) => fs::rename(staged, target).await,
                Err(e) => Err(e),
            };
            if let Err(err) = replaced {
                discard(staged).await;
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Replacing {}", target.display()).into()),
                });
            }
        },
        Err(err) => {
            discard(staged).await;
            return Err(StorageError::Io {
                source: err,
                context: Some(format!("Committing {}", target.display()).into()),
            });
        },
    }

    if let Some(parent) = target.parent() {
        let synced = match fs::File::open(parent).await {
            Ok(dir) => dir.sync_all().await,
            Err(err) => Err(err),
        };
        if let Err(err) = synced {
            warn!(path = %parent.display(), error = %err, "Directory sync failed");
        }
    }
    Ok(())
}

/// Removes a staging file after a failed write; leftovers are purged on the next connect.
async fn discard(staged: &Path) {
    match fs::remove_file(staged).await {
        Ok(()) => {},
        Err(err) if err.kind() == ErrorKind::NotFound => {},
        Err(err) => warn!(path = %staged.display(), error = %err, "Failed to remove staged file"),
    }
}

fn missing_or_io(err: io::Error, path: &Path, action: &str) -> StorageError {
    if err.kind() == ErrorKind::NotFound {
        StorageError::FileNotFound { message: path.display().to_string().into(), context: None }
    } else {
        StorageError::Io { source: err, context: Some(format!("{action} {}", path.display()).into()) }
    }
}
