//! Sandboxed durable storage and key-value preferences.
//!
//! # Core Features
//!
//! - **Sandbox Security**: Relative paths only; `..` escapes and symlinks leading outside
//!   the root are rejected.
//! - **Atomic Writes**: Unique temp file + `fsync` + `rename`, so a crash never leaves a
//!   half-written file behind.
//! - **Transparent Compression**: Optional LZ4 block compression.
//! - **Self-Healing**: Stale temporary files are purged when the sandbox is opened.
//! - **Preferences**: [`PreferenceStore`] abstracts a string key-value store, with a
//!   file-backed implementation scoped by namespace and an in-memory one.
//!
//! # Architectural Overview
//!
//! 1. **[`Storage`]**: The thread-safe sandbox handle.
//! 2. **[`StorageBuilder`]**: A typestate builder; a root is required before `connect`.
//! 3. **[`FilePreferences`]** / **[`MemoryPreferences`]**: Implementations of
//!    [`PreferenceStore`].
//!
//! # Example
//!
//! ```rust
//! use sky_storage::{PreferenceStore, Storage, StorageError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     let storage = Storage::builder().root(tmp.path()).connect().await?;
//!     let prefs = storage.preferences("starproject")?;
//!
//!     prefs.put_string("SAVED_STARS", "[]").await?;
//!     assert_eq!(prefs.get_string("SAVED_STARS").await?.as_deref(), Some("[]"));
//!     Ok(())
//! }
//! ```

mod builder;
mod codec;
mod engine;
mod error;
mod maintenance;
mod namespace;
mod preferences;
mod security;

pub use builder::StorageBuilder;
pub use codec::Compression;
pub use engine::Storage;
pub use error::{StorageError, StorageErrorExt};
pub use namespace::NamespaceName;
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore};
