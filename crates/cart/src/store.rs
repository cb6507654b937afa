//! The shared cart handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use go_marketplace_core::{CartChange, CartState, NewLineItem};
use tracing::{debug, info, instrument, warn};

use crate::config::CartConfig;
use crate::error::Result;
use crate::listeners::{Listeners, Subscription};
use crate::persist::Persister;
use crate::storage::{FileStore, KeyValueStore};

/// The cart shared across a running client.
///
/// `CartStore` is cheaply cloneable via `Arc`; every clone refers to the same
/// cart. Construct it once with [`CartStore::open`] and hand clones to the
/// code that needs it.
///
/// Mutations run synchronously and return a [`CartChange`]. When the cart
/// changed, listeners are notified with the new state and a snapshot is
/// queued for persistence. Unknown product ids are no-ops, not errors.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    key: String,
    current: Mutex<Current>,
    /// Highest version delivered to listeners.
    published: Mutex<u64>,
    listeners: Arc<Listeners>,
    persister: Persister,
}

struct Current {
    cart: Arc<CartState>,
    version: u64,
}

impl CartStore {
    /// Load the saved cart from `storage` and start the background writer.
    ///
    /// A missing, unreadable, or malformed saved cart yields an empty cart;
    /// the failure is logged and not returned. Must be called from within a
    /// tokio runtime.
    #[instrument(skip_all, fields(key = tracing::field::Empty))]
    pub async fn open<S: KeyValueStore>(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        tracing::Span::current().record("key", key.as_str());

        let storage: Arc<dyn KeyValueStore> = Arc::new(storage);
        let cart = match read_saved(storage.as_ref(), &key).await {
            Ok(Some(cart)) => {
                info!(lines = cart.len(), "Loaded saved cart");
                cart
            }
            Ok(None) => {
                debug!("No saved cart, starting empty");
                CartState::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load saved cart, starting empty");
                CartState::new()
            }
        };

        let cart = Arc::new(cart);
        let persister = Persister::spawn(Arc::clone(&storage), key.clone(), Arc::clone(&cart));

        Self {
            inner: Arc::new(CartStoreInner {
                key,
                current: Mutex::new(Current { cart, version: 0 }),
                published: Mutex::new(0),
                listeners: Arc::new(Listeners::default()),
                persister,
            }),
        }
    }

    /// Open a file-backed cart as described by `config`.
    pub async fn open_with_config(config: &CartConfig) -> Self {
        Self::open(
            FileStore::new(config.storage_dir.clone()),
            config.storage_key.clone(),
        )
        .await
    }

    /// Key the cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// The current cart.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CartState> {
        Arc::clone(&self.current().cart)
    }

    /// Add one unit of a product, appending it if it is not in the cart yet.
    pub fn add_to_cart(&self, item: NewLineItem) -> CartChange {
        self.mutate(|cart| cart.add(item))
    }

    /// Add one unit to the line for `id`. No-op if the product is not in the cart.
    pub fn increment(&self, id: &str) -> CartChange {
        self.mutate(|cart| cart.increment(id))
    }

    /// Remove one unit from the line for `id`, dropping the line at zero.
    /// No-op if the product is not in the cart.
    pub fn decrement(&self, id: &str) -> CartChange {
        self.mutate(|cart| cart.decrement(id))
    }

    /// Remove every line.
    pub fn clear(&self) -> CartChange {
        self.mutate(CartState::clear)
    }

    /// Register a listener called with the new cart after every change.
    ///
    /// Listeners run synchronously on the mutating thread after the store lock
    /// is released, and never see an older cart after a newer one. When
    /// mutations race on several threads a change already superseded by a
    /// delivered one is not delivered again. No-op mutations do not notify.
    ///
    /// A listener may read the store but must not mutate it.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&CartState) + Send + Sync + 'static,
    {
        self.inner.listeners.register(Arc::new(listener))
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    /// Wait until every change made so far has been written (or has failed).
    pub async fn flush(&self) {
        let version = self.current().version;
        self.inner.persister.wait_for(version).await;
    }

    fn current(&self) -> MutexGuard<'_, Current> {
        self.inner
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate(&self, op: impl FnOnce(&mut CartState) -> CartChange) -> CartChange {
        let (change, version, cart) = {
            let mut current = self.current();
            let mut next = CartState::clone(&current.cart);
            let change = op(&mut next);
            if !change.is_changed() {
                return change;
            }

            current.version += 1;
            current.cart = Arc::new(next);
            self.inner
                .persister
                .submit(current.version, Arc::clone(&current.cart));
            (change, current.version, Arc::clone(&current.cart))
        };

        debug!(?change, version, lines = cart.len(), "Cart updated");
        let mut published = self
            .inner
            .published
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if version > *published {
            *published = version;
            self.inner.listeners.notify(&cart);
        }
        change
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let current = self.current();
        f.debug_struct("CartStore")
            .field("key", &self.inner.key)
            .field("version", &current.version)
            .field("lines", &current.cart.len())
            .finish_non_exhaustive()
    }
}

/// Read and decode the cart saved under `key`.
///
/// Returns `Ok(None)` if nothing has been saved.
///
/// # Errors
///
/// Returns [`CartError::Storage`](crate::CartError::Storage) if the read fails
/// and [`CartError::Codec`](crate::CartError::Codec) if the saved data is not a
/// valid cart.
pub async fn read_saved(storage: &dyn KeyValueStore, key: &str) -> Result<Option<CartState>> {
    let Some(bytes) = storage.get(key).await? else {
        return Ok(None);
    };
    Ok(Some(CartState::from_json(&bytes)?))
}
