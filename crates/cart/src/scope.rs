//! Task-local access to the active cart.
//!
//! Prefer passing a [`CartStore`] explicitly. `CartScope` exists for code that
//! sits several layers below whoever owns the store (view models, callbacks)
//! and needs "the" cart without threading it through every signature.
//!
//! The scope is task-local: it covers the future passed to [`CartScope::run`]
//! and does not follow work moved onto other tasks with `tokio::spawn`.

use std::future::Future;

use crate::error::{CartError, Result};
use crate::store::CartStore;

tokio::task_local! {
    static ACTIVE_CART: CartStore;
}

/// Entry points for scoped cart access.
pub struct CartScope;

impl CartScope {
    /// Run `future` with `store` as the active cart.
    pub async fn run<F: Future>(store: CartStore, future: F) -> F::Output {
        ACTIVE_CART.scope(store, future).await
    }

    /// Run `f` synchronously with `store` as the active cart.
    pub fn run_sync<R>(store: CartStore, f: impl FnOnce() -> R) -> R {
        ACTIVE_CART.sync_scope(store, f)
    }

    /// The active cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutsideScope`] when called outside
    /// [`CartScope::run`] or [`CartScope::run_sync`]. This is a programming
    /// error in the caller, not a runtime condition to recover from.
    pub fn current() -> Result<CartStore> {
        ACTIVE_CART
            .try_with(CartStore::clone)
            .map_err(|_| CartError::OutsideScope)
    }
}
