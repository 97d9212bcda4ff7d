use std::fmt;
use tokio::sync::watch;
use tracing::debug;

/// An async view of a [`Signal`](crate::Signal).
///
/// The receiver starts positioned at the value current at subscription time, so
/// [`changed`](Self::changed) waits for the *next* write. Use
/// [`current`](Self::current) for the replayed value.
pub struct SignalReceiver<T> {
    inner: watch::Receiver<T>,
}

impl<T: fmt::Debug> fmt::Debug for SignalReceiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalReceiver").field("value", &*self.inner.borrow()).finish()
    }
}

impl<T: Clone> SignalReceiver<T> {
    pub(crate) const fn new(inner: watch::Receiver<T>) -> Self {
        Self { inner }
    }

    /// Returns the latest value without waiting.
    #[must_use]
    pub fn current(&self) -> T {
        self.inner.borrow().clone()
    }

    /// Waits for the next write and returns the value it stored.
    ///
    /// Several writes between two polls collapse into the latest one. Returns `None`
    /// once every [`Signal`](crate::Signal) handle has been dropped.
    pub async fn changed(&mut self) -> Option<T> {
        match self.inner.changed().await {
            Ok(()) => Some(self.inner.borrow_and_update().clone()),
            Err(_) => {
                debug!(value = std::any::type_name::<T>(), "Signal closed; receiver finished");
                None
            },
        }
    }

    /// Whether a write happened since the last [`changed`](Self::changed) call.
    ///
    /// A closed signal reports `false`.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.inner.has_changed().unwrap_or(false)
    }
}
