//! Go Marketplace Cart - Persistent cart store.
//!
//! Wraps the pure [`CartState`] from `go-marketplace-core` with everything a
//! running client needs:
//!
//! - [`CartStore`] - the shared cart handle: load once, mutate, publish, persist
//! - [`storage`] - the [`KeyValueStore`] contract plus memory and file backends
//! - [`Subscription`] - explicit listener registration for UI observers
//! - [`CartScope`] - task-local access for code that cannot be handed a store
//! - [`config`] - environment-driven configuration
//!
//! # Persistence
//!
//! Mutations are synchronous. Each changing mutation hands a snapshot to a
//! single background writer that always writes the newest snapshot, so an
//! older cart never overwrites a newer one. Write failures are logged and the
//! in-memory cart stays authoritative.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
mod listeners;
mod persist;
pub mod scope;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result};
pub use go_marketplace_core::{
    CartChange, CartState, LineItem, NewLineItem, ProductId, Quantity, UnitPrice,
};
pub use listeners::Subscription;
pub use scope::CartScope;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartStore, read_saved};
