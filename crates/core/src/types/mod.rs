//! Core types for Go Marketplace.
//!
//! This module provides type-safe wrappers for the values a cart line carries.

pub mod id;
pub mod price;
pub mod quantity;

pub use id::{ProductId, ProductIdError};
pub use price::UnitPrice;
pub use quantity::{Quantity, QuantityError};
