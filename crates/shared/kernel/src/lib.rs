//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it owns layered config loading and re-exports the domain.
//!
//! ## Config loading
//! ```rust,no_run
//! use sky_kernel::config::load_config;
//! use sky_kernel::domain::config::SkyConfig;
//!
//! let cfg: SkyConfig = load_config(None::<&str>).unwrap_or_default();
//! assert!(!cfg.storage.namespace.is_empty());
//! ```
pub mod config;

pub use sky_domain as domain;
