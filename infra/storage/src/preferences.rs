//! Key-value preference stores.
//!
//! A preference store maps string keys to string values, the same shape an
//! application uses for small pieces of durable state. [`FilePreferences`] keeps one
//! JSON object per namespace inside a [`Storage`] sandbox; [`MemoryPreferences`] is a
//! process-local stand-in for tests and throwaway sessions.

use crate::engine::Storage;
use crate::error::{StorageError, StorageErrorExt};
use crate::namespace::NamespaceName;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, trace};

const PREFS_SUFFIX: &str = "prefs.json";

/// A string-keyed, string-valued store.
pub trait PreferenceStore: Send + Sync {
    /// Returns the value under `key`, or `None` when the key was never written.
    fn get_string(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn put_string(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Deletes `key`, reporting whether it was present.
    fn remove(&self, key: &str) -> impl Future<Output = Result<bool, StorageError>> + Send;

    fn contains(&self, key: &str) -> impl Future<Output = Result<bool, StorageError>> + Send {
        async move { Ok(self.get_string(key).await?.is_some()) }
    }
}

/// Preferences persisted as `<root>/<namespace>.prefs.json`.
///
/// Every mutation rewrites the whole file through [`Storage::write`], so the file on
/// disk is always a complete JSON object. Mutations through one handle (and its
/// clones) are serialized; separate handles on the same namespace are not.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    storage: Storage,
    namespace: NamespaceName,
    file: String,
    write_lock: Arc<Mutex<()>>,
}

impl FilePreferences {
    pub(crate) fn new(storage: Storage, namespace: NamespaceName) -> Self {
        let file = format!("{namespace}.{PREFS_SUFFIX}");
        Self { storage, namespace, file, write_lock: Arc::new(Mutex::new(())) }
    }

    #[must_use]
    pub const fn namespace(&self) -> &NamespaceName {
        &self.namespace
    }

    /// Returns every stored entry.
    ///
    /// # Errors
    /// Fails if the file exists but cannot be read or is not a JSON object of strings.
    pub async fn entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.storage.read(&self.file).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .context(format!("Decoding preferences '{}'", self.namespace)),
            Err(StorageError::FileNotFound { .. }) => {
                trace!(namespace = %self.namespace, "No preferences file yet");
                Ok(BTreeMap::new())
            },
            Err(err) => Err(err),
        }
    }

    /// Deletes every entry of this namespace.
    ///
    /// # Errors
    /// Fails on I/O errors other than the file already being absent.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        match self.storage.delete(&self.file).await {
            Ok(()) | Err(StorageError::FileNotFound { .. }) => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(entries)
            .context(format!("Encoding preferences '{}'", self.namespace))?;
        self.storage.write(&self.file, &bytes).await
    }
}

impl PreferenceStore for FilePreferences {
    async fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().await?.remove(key))
    }

    async fn put_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.entries().await?;
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries).await?;
        debug!(namespace = %self.namespace, key, bytes = value.len(), "Preference stored");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.entries().await?;
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.persist(&entries).await?;
        debug!(namespace = %self.namespace, key, "Preference removed");
        Ok(true)
    }
}

/// In-memory preferences. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    entries: Arc<RwLock<FxHashMap<String, String>>>,
}

impl MemoryPreferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl PreferenceStore for MemoryPreferences {
    async fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn put_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.write().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.write().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let prefs = MemoryPreferences::new();
        assert!(prefs.is_empty());

        prefs.put_string("k", "v").await.unwrap();
        assert_eq!(prefs.get_string("k").await.unwrap().as_deref(), Some("v"));
        assert!(prefs.contains("k").await.unwrap());

        assert!(prefs.remove("k").await.unwrap());
        assert!(!prefs.remove("k").await.unwrap());
        assert_eq!(prefs.get_string("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_clones_share_state() {
        let prefs = MemoryPreferences::new();
        let other = prefs.clone();
        prefs.put_string("shared", "yes").await.unwrap();
        assert_eq!(other.len(), 1);
    }
}
