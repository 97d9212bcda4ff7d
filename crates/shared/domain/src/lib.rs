//! # Domain Models
//!
//! Pure sky types with minimal dependencies (`serde` and the shared error attribute).
//! Keep it lean: no I/O or randomness here, just data and simple helpers.

pub mod config;
mod error;
pub mod star;

pub use error::{DomainError, DomainErrorExt};
pub use star::{Star, StarBrightness, StarColor, StarSize};
