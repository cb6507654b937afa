//! Ordered write-behind for cart snapshots.
//!
//! A single background task owns all writes. Mutations drop their snapshot
//! into a one-slot `watch` channel; the task always picks up the newest one,
//! so intermediate snapshots may be skipped but an older cart is never
//! written after a newer one.

use std::sync::Arc;

use go_marketplace_core::CartState;
use tokio::sync::watch;
use tracing::{debug, error, instrument};

use crate::storage::KeyValueStore;

#[derive(Debug, Clone)]
struct Snapshot {
    version: u64,
    cart: Arc<CartState>,
}

pub(crate) struct Persister {
    pending: watch::Sender<Snapshot>,
    written: watch::Receiver<u64>,
}

impl Persister {
    /// Spawn the writer task. `initial` is treated as already persisted.
    pub(crate) fn spawn(
        storage: Arc<dyn KeyValueStore>,
        key: String,
        initial: Arc<CartState>,
    ) -> Self {
        let (pending, mut rx) = watch::channel(Snapshot {
            version: 0,
            cart: initial,
        });
        let (written_tx, written) = watch::channel(0_u64);

        tokio::spawn(async move {
            // Runs until the store is dropped; the last pending snapshot is
            // still delivered before `changed` reports the closed channel.
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow_and_update().clone();
                write_snapshot(storage.as_ref(), &key, &snapshot).await;
                written_tx.send_replace(snapshot.version);
            }
            debug!(key = %key, "Cart writer stopped");
        });

        Self { pending, written }
    }

    /// Queue `cart` as the newest snapshot. Versions must increase.
    pub(crate) fn submit(&self, version: u64, cart: Arc<CartState>) {
        self.pending.send_replace(Snapshot { version, cart });
    }

    /// Wait until a snapshot at or after `version` has been handled.
    pub(crate) async fn wait_for(&self, version: u64) {
        let mut written = self.written.clone();
        if written.wait_for(|done| *done >= version).await.is_err() {
            error!(version, "Cart writer exited before flushing");
        }
    }
}

#[instrument(skip_all, fields(key = %key, version = snapshot.version, lines = snapshot.cart.len()))]
async fn write_snapshot(storage: &dyn KeyValueStore, key: &str, snapshot: &Snapshot) {
    let bytes = match snapshot.cart.to_json() {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "Failed to encode cart snapshot");
            return;
        }
    };

    match storage.set(key, bytes).await {
        Ok(()) => debug!("Cart persisted"),
        Err(e) => error!(error = %e, "Failed to persist cart"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use go_marketplace_core::{NewLineItem, ProductId, UnitPrice};

    use super::*;
    use crate::storage::MemoryStore;

    fn cart_with(n: usize) -> Arc<CartState> {
        let mut cart = CartState::new();
        for i in 0..n {
            cart.add(NewLineItem::new(
                ProductId::parse(&format!("p{i}")).unwrap(),
                "item",
                "",
                UnitPrice::from_cents(100),
            ));
        }
        Arc::new(cart)
    }

    #[tokio::test]
    async fn test_initial_snapshot_not_written() {
        let storage = Arc::new(MemoryStore::new());
        let persister = Persister::spawn(storage.clone(), "k".to_string(), cart_with(1));

        persister.wait_for(0).await;
        tokio::task::yield_now().await;

        assert_eq!(storage.write_count(), 0);
    }

    #[tokio::test]
    async fn test_newest_snapshot_wins() {
        let storage = Arc::new(MemoryStore::new());
        storage.set_write_delay(Some(Duration::from_millis(20)));
        let persister = Persister::spawn(storage.clone(), "k".to_string(), cart_with(0));

        for version in 1..=10 {
            persister.submit(version, cart_with(usize::try_from(version).unwrap()));
        }
        persister.wait_for(10).await;

        let saved = CartState::from_json(&storage.value("k").unwrap()).unwrap();
        assert_eq!(saved.len(), 10);

        // Writes happen in issuance order even when some are skipped.
        let lens: Vec<usize> = storage
            .history()
            .iter()
            .map(|(_, bytes)| CartState::from_json(bytes).unwrap().len())
            .collect();
        assert!(
            lens.windows(2).all(|w| w.first() < w.get(1)),
            "out of order: {lens:?}"
        );
        assert!(storage.write_count() <= 10);
    }

    #[tokio::test]
    async fn test_failed_write_still_completes_flush() {
        let storage = Arc::new(MemoryStore::new());
        storage.set_fail_writes(true);
        let persister = Persister::spawn(storage.clone(), "k".to_string(), cart_with(0));

        persister.submit(1, cart_with(2));
        persister.wait_for(1).await;

        assert_eq!(storage.write_count(), 1);
        assert_eq!(storage.value("k"), None);
    }

    #[tokio::test]
    async fn test_pending_snapshot_written_after_drop() {
        let storage = Arc::new(MemoryStore::new());
        storage.set_write_delay(Some(Duration::from_millis(10)));
        let persister = Persister::spawn(storage.clone(), "k".to_string(), cart_with(0));
        let mut written = persister.written.clone();

        persister.submit(1, cart_with(3));
        drop(persister);

        // Sender dropped after the last write completes; the value is final.
        let _ = written.wait_for(|v| *v >= 1).await;
        let saved = CartState::from_json(&storage.value("k").unwrap()).unwrap();
        assert_eq!(saved.len(), 3);
    }
}
