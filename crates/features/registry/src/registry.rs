use crate::entropy::{Entropy, pick_brightness, pick_color};
use crate::error::{RegistryError, RegistryErrorExt};
use crate::summary::SkySummary;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sky_domain::config::RegistryConfig;
use sky_domain::{Star, StarSize};
use sky_signal::Signal;
use sky_storage::PreferenceStore;
use std::fmt;
use tracing::{debug, info, warn};

/// Upper bound on stars held by one sky.
pub const MAX_STARS: usize = 10;
/// Preference key holding the serialized star list.
pub const SAVED_STARS: &str = "SAVED_STARS";

/// An owned sky: the ordered star list plus its fullness signal.
///
/// Mutations take `&mut self`, so a registry shared between tasks needs an outer lock.
/// The [`is_full`](Self::is_full) signal is written by [`add_star`](Self::add_star) and
/// [`capacity_check`](Self::capacity_check) only; [`reset_star`](Self::reset_star) leaves
/// it as it was until the next add.
pub struct SkyRegistry<E = StdRng> {
    stars: Vec<Star>,
    is_full: Signal<bool>,
    entropy: E,
}

impl SkyRegistry<StdRng> {
    /// Creates an empty sky with OS-seeded randomness.
    #[must_use]
    pub fn new() -> Self {
        Self::with_entropy(StdRng::from_os_rng())
    }

    /// Creates an empty sky whose draws are reproducible for a given `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_entropy(StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn from_config(config: &RegistryConfig) -> Self {
        config.seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for SkyRegistry<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entropy> SkyRegistry<E> {
    #[must_use]
    pub fn with_entropy(entropy: E) -> Self {
        Self { stars: Vec::with_capacity(MAX_STARS), is_full: Signal::new(false), entropy }
    }

    /// Adds a star of `size` with a random color and brightness, if there is room.
    ///
    /// A full sky is not an error: the list stays as it is and only the fullness
    /// signal reports it. The star that fills the last slot also publishes `true`.
    pub fn add_star(&mut self, size: StarSize) {
        if self.capacity_check() {
            let color = pick_color(size, &mut self.entropy);
            let brightness = pick_brightness(&mut self.entropy);
            self.stars.push(Star::new(size, color, brightness));
            if self.stars.len() >= MAX_STARS {
                self.is_full.set(true);
            }
        } else {
            debug!(%size, "Sky is full, star dropped");
        }
        self.summary().emit();
    }

    /// Logs the current list, then removes every star.
    pub fn reset_star(&mut self) {
        self.summary().emit();
        self.stars.clear();
    }

    /// Returns whether another star fits, and publishes the negation on
    /// [`is_full`](Self::is_full).
    pub fn capacity_check(&self) -> bool {
        let has_room = self.stars.len() < MAX_STARS;
        self.is_full.set(!has_room);
        has_room
    }
}

impl<E> SkyRegistry<E> {
    /// Writes the list as JSON under [`SAVED_STARS`].
    ///
    /// # Errors
    /// Returns [`RegistryError::Encode`] if the list cannot be serialized and
    /// [`RegistryError::Storage`] if the store rejects the write.
    pub async fn save<S: PreferenceStore>(&self, store: &S) -> Result<(), RegistryError> {
        let encoded = serde_json::to_string(&self.stars).context("Encoding stars")?;
        store.put_string(SAVED_STARS, &encoded).await.context("Saving stars")?;
        info!(stars = self.stars.len(), "Sky saved");
        Ok(())
    }

    /// Replaces the list with the one stored under [`SAVED_STARS`].
    ///
    /// A missing, empty or malformed entry leaves the current list untouched, as does a
    /// failing store. Those cases are logged and never reported to the caller.
    pub async fn load<S: PreferenceStore>(&mut self, store: &S) {
        let encoded = match store.get_string(SAVED_STARS).await {
            Ok(Some(encoded)) if !encoded.is_empty() => encoded,
            Ok(_) => {
                debug!("No saved sky");
                return;
            },
            Err(err) => {
                warn!(error = %err, "Reading saved sky failed, keeping current stars");
                return;
            },
        };

        match serde_json::from_str::<Vec<Star>>(&encoded) {
            Ok(stars) => {
                info!(stars = stars.len(), "Sky restored");
                self.stars = stars;
            },
            Err(err) => warn!(error = %err, "Saved sky is malformed, keeping current stars"),
        }
    }

    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// The fullness signal. Clone it to observe from elsewhere.
    #[must_use]
    pub const fn is_full(&self) -> &Signal<bool> {
        &self.is_full
    }

    #[must_use]
    pub fn bright_count(&self) -> usize {
        self.summary().bright_count()
    }

    #[must_use]
    pub fn summary(&self) -> SkySummary<'_> {
        SkySummary::new(&self.stars)
    }
}

impl<E> fmt::Debug for SkyRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkyRegistry")
            .field("stars", &self.stars)
            .field("is_full", &self.is_full.get())
            .finish_non_exhaustive()
    }
}
