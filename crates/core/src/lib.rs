//! Go Marketplace Core - Cart types and reconciliation rules.
//!
//! This crate provides the pure half of the cart:
//! - [`types`] - Newtype wrappers for product IDs, unit prices, and quantities
//! - [`cart`] - Line items, the ordered [`CartState`], and its JSON codec
//!
//! # Architecture
//!
//! The core crate contains only types and state transitions - no I/O, no async
//! runtime, no storage. Persistence, listeners, and scoping live in
//! `go-marketplace-cart`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::*;
pub use types::*;
