use crate::receiver::SignalReceiver;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tracing::trace;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct SignalInner<T> {
    sender: watch::Sender<T>,
    listeners: RwLock<FxHashMap<u64, Listener<T>>>,
    next_id: AtomicU64,
    /// Bumped on every write while the value slot is locked.
    writes: AtomicU64,
}

/// A cloneable handle to a shared, observable value.
///
/// All clones point at the same slot. The slot lives until the last `Signal`
/// clone is dropped; [`Observer`] guards and [`SignalReceiver`]s do not keep it alive.
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: Default + Clone + Send + Sync + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("value", &*self.inner.sender.borrow())
            .field("listeners", &self.inner.listeners.read().len())
            .field("receivers", &self.inner.sender.receiver_count())
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    /// Creates a signal holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            inner: Arc::new(SignalInner {
                sender,
                listeners: RwLock::new(FxHashMap::default()),
                next_id: AtomicU64::new(1),
                writes: AtomicU64::new(0),
            }),
        }
    }

    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.sender.borrow().clone()
    }

    /// Stores `value` and notifies every listener and receiver.
    ///
    /// Notifications are not deduplicated: writing the current value again still
    /// reaches every observer.
    pub fn set(&self, value: T) {
        let _ = self.replace(value);
    }

    /// Stores `value`, notifies observers, and returns the previous value.
    ///
    /// A listener may write back into the signal. That nested write notifies every
    /// listener itself, so delivery of the older value stops there and no listener is
    /// left holding a superseded value.
    pub fn replace(&self, value: T) -> T {
        let mut previous = None;
        let mut write = 0;
        self.inner.sender.send_modify(|slot| {
            previous = Some(std::mem::replace(slot, value.clone()));
            write = self.inner.writes.fetch_add(1, Ordering::AcqRel) + 1;
        });

        // Snapshot so listeners can write back into this signal without deadlocking.
        let listeners: Vec<Listener<T>> = self.inner.listeners.read().values().cloned().collect();
        trace!(listeners = listeners.len(), write, "Signal updated");
        for listener in listeners {
            if self.inner.writes.load(Ordering::Acquire) != write {
                trace!(write, "Delivery superseded by a newer write");
                break;
            }
            listener(&value);
        }

        previous.unwrap_or(value)
    }

    /// Registers a synchronous listener.
    ///
    /// The listener is called right away with the current value, then once per write.
    /// Dropping the returned [`Observer`] unregisters it.
    #[must_use = "Dropping the observer unregisters the listener immediately"]
    pub fn observe<F>(&self, listener: F) -> Observer<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let listener: Listener<T> = Arc::new(listener);
        self.inner.listeners.write().insert(id, Arc::clone(&listener));

        let current = self.get();
        listener(&current);

        Observer { id, signal: Arc::downgrade(&self.inner) }
    }

    /// Opens an async receiver positioned at the current value.
    #[must_use]
    pub fn subscribe(&self) -> SignalReceiver<T> {
        SignalReceiver::new(self.inner.sender.subscribe())
    }

    /// Number of registered synchronous listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.read().len()
    }

    /// Number of live async receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.inner.sender.receiver_count()
    }
}

/// Registration guard returned by [`Signal::observe`].
#[must_use = "Dropping the observer unregisters the listener immediately"]
pub struct Observer<T> {
    id: u64,
    signal: Weak<SignalInner<T>>,
}

impl<T> Observer<T> {
    /// Unregisters the listener now. Equivalent to dropping the guard.
    pub fn cancel(self) {}
}

impl<T> fmt::Debug for Observer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("id", &self.id)
            .field("attached", &(self.signal.strong_count() > 0))
            .finish()
    }
}

impl<T> Drop for Observer<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.signal.upgrade() {
            inner.listeners.write().remove(&self.id);
        }
    }
}
