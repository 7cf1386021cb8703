//! Value-change listener registry shared by the concrete fields.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Handle returned when a listener is registered, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

impl ListenerId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

/// Payload delivered to value-change listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChangeEvent<V> {
    /// Value before the change.
    pub old_value: V,
    /// Value after the change.
    pub value: V,
}

/// Boxed value-change callback.
pub type ValueChangeListener<V> = Arc<dyn Fn(&ValueChangeEvent<V>) + Send + Sync>;

/// Ordered set of value-change listeners.
///
/// Cloning shares the registry. Listeners are invoked in registration order
/// from a snapshot, so a listener may register or remove listeners (or call
/// back into its field) without deadlocking.
pub struct Listeners<V> {
    entries: Arc<RwLock<Vec<(ListenerId, ValueChangeListener<V>)>>>,
}

impl<V> Listeners<V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a listener.
    pub fn add(&self, listener: ValueChangeListener<V>) -> ListenerId {
        let id = ListenerId::new();
        if let Ok(mut guard) = self.entries.write() {
            guard.push((id, listener));
        }
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let Ok(mut guard) = self.entries.write() else {
            return false;
        };
        let before = guard.len();
        guard.retain(|(entry_id, _)| *entry_id != id);
        guard.len() != before
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver an event to every listener, synchronously.
    pub fn notify(&self, event: &ValueChangeEvent<V>) {
        let snapshot: Vec<ValueChangeListener<V>> = self
            .entries
            .read()
            .map(|guard| guard.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default();
        for listener in snapshot {
            listener(event);
        }
    }
}

impl<V> Clone for Listeners<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V> Default for Listeners<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for Listeners<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("len", &self.len()).finish()
    }
}
