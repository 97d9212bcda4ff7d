//! # Signal
//!
//! A single-slot observable value.
//!
//! ## Overview
//!
//! A [`Signal`] holds one current value. Writers replace it synchronously with
//! [`Signal::set`]; every write is delivered to all registered listeners and async
//! receivers, even when the new value equals the old one. Late subscribers never see
//! missed history, only the value that is current when they attach.
//!
//! Two ways to observe:
//!
//! * **Listeners** ([`Signal::observe`]): synchronous callbacks, invoked immediately with
//!   the current value and then on every write. The returned [`Observer`] unregisters
//!   the callback when dropped.
//! * **Receivers** ([`Signal::subscribe`]): a `tokio::sync::watch` backed handle for
//!   async consumers. [`SignalReceiver::current`] replays the latest value and
//!   [`SignalReceiver::changed`] waits for the next write.
//!
//! # Example
//!
//! ```rust
//! use sky_signal::Signal;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let full = Signal::new(false);
//! let seen = Arc::new(AtomicUsize::new(0));
//!
//! let counter = seen.clone();
//! let _observer = full.observe(move |_: &bool| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! full.set(true);
//! full.set(true);
//!
//! // One replay on attach plus two writes.
//! assert_eq!(seen.load(Ordering::SeqCst), 3);
//! assert!(full.get());
//! ```

mod receiver;
mod signal;

pub use receiver::SignalReceiver;
pub use signal::{Observer, Signal};
