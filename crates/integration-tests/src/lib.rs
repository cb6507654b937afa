//! Integration tests for Go Marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart survival across reopen with the file backend
//! - `cart_ordering` - Write ordering under slow storage
//! - `cart_scope` - Task-local cart access
//!
//! This library only holds shared fixtures.

use go_marketplace_core::{NewLineItem, ProductId, UnitPrice};
use rust_decimal::Decimal;

/// Key used by the mobile client.
pub const CART_KEY: &str = "@GoMarketplace:products";

/// Build a product with a whole-number price.
///
/// # Panics
///
/// Panics if `id` is empty.
#[must_use]
#[allow(clippy::expect_used)]
pub fn product(id: &str, title: &str, price: i64) -> NewLineItem {
    NewLineItem::new(
        ProductId::parse(id).expect("fixture ids are non-empty"),
        title,
        format!("https://img.example/{id}.png"),
        UnitPrice::new(Decimal::new(price, 0)),
    )
}
