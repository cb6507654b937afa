//! Listener registry for cart changes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use go_marketplace_core::CartState;

type Listener = Arc<dyn Fn(&CartState) + Send + Sync>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Listener)>>,
}

impl Listeners {
    fn entries(&self) -> MutexGuard<'_, Vec<(u64, Listener)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn register(self: &Arc<Self>, listener: Listener) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries().push((id, listener));
        Subscription {
            id,
            registry: Arc::downgrade(self),
        }
    }

    fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }

    /// Call every listener with `cart`, in registration order.
    ///
    /// The registry lock is released before any listener runs, so listeners
    /// may read the store or (un)subscribe.
    pub(crate) fn notify(&self, cart: &CartState) {
        let listeners: Vec<Listener> = self
            .entries()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(cart);
        }
    }
}

/// Handle for a registered cart listener.
///
/// The listener stays registered until [`Subscription::unsubscribe`] is called
/// or the handle is dropped.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<Listeners>,
}

impl Subscription {
    /// Unregister the listener. Returns `false` if it was already gone.
    #[allow(clippy::must_use_candidate)]
    pub fn unsubscribe(mut self) -> bool {
        self.detach_from_registry()
    }

    fn detach_from_registry(&mut self) -> bool {
        let registry = std::mem::take(&mut self.registry);
        registry.upgrade().is_some_and(|listeners| listeners.remove(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_from_registry();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
