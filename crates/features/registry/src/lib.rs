//! Sky registry feature slice.
//!
//! [`SkyRegistry`] owns an ordered list of at most [`MAX_STARS`] stars and a
//! [`Signal<bool>`](sky_signal::Signal) telling observers whether the sky is full.
//! Colors and brightness are drawn from an injectable [`Entropy`] source, and the list
//! is persisted as JSON under [`SAVED_STARS`] in any [`PreferenceStore`](sky_storage::PreferenceStore).
//!
//! ```rust
//! use sky_domain::StarSize;
//! use sky_registry::SkyRegistry;
//! use sky_storage::MemoryPreferences;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), sky_registry::RegistryError> {
//! let prefs = MemoryPreferences::new();
//! let mut sky = SkyRegistry::seeded(7);
//! sky.add_star(StarSize::Small);
//! sky.save(&prefs).await?;
//!
//! let mut restored = SkyRegistry::seeded(1);
//! restored.load(&prefs).await;
//! assert_eq!(restored.stars(), sky.stars());
//! # Ok(())
//! # }
//! ```

mod entropy;
mod error;
mod registry;
mod summary;

pub use entropy::{Entropy, pick_brightness, pick_color};
pub use error::{RegistryError, RegistryErrorExt};
pub use registry::{MAX_STARS, SAVED_STARS, SkyRegistry};
pub use summary::SkySummary;
