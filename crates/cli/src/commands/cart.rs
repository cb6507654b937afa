//! Cart mutation commands.
//!
//! # Usage
//!
//! ```bash
//! gm-cart add --id p1 --title Shirt --image-url https://img.example/p1.png --price 10
//! gm-cart increment p1
//! gm-cart decrement p1
//! gm-cart clear
//! ```

use go_marketplace_cart::{CartChange, CartStore};
use go_marketplace_core::{NewLineItem, ProductId, UnitPrice};
use rust_decimal::Decimal;
use tracing::info;

use super::CommandError;

/// Fields for a product being added.
#[derive(Debug, Clone)]
pub struct AddArgs {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub price: Decimal,
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the id is empty or the price is negative.
pub fn add(store: &CartStore, args: AddArgs) -> Result<CartChange, CommandError> {
    if args.price.is_sign_negative() {
        return Err(CommandError::Price(format!(
            "{} is negative",
            args.price
        )));
    }

    let item = NewLineItem::new(
        ProductId::parse(&args.id)?,
        args.title,
        args.image_url,
        UnitPrice::new(args.price),
    );
    let change = store.add_to_cart(item);
    info!(product_id = %args.id, ?change, "Added to cart");
    Ok(change)
}

/// Add one unit to an existing line.
#[must_use]
pub fn increment(store: &CartStore, id: &str) -> CartChange {
    let change = store.increment(id);
    log_unchanged(id, &change);
    change
}

/// Remove one unit from an existing line.
#[must_use]
pub fn decrement(store: &CartStore, id: &str) -> CartChange {
    let change = store.decrement(id);
    log_unchanged(id, &change);
    change
}

/// Empty the cart.
#[must_use]
pub fn clear(store: &CartStore) -> CartChange {
    store.clear()
}

fn log_unchanged(id: &str, change: &CartChange) {
    if !change.is_changed() {
        info!(product_id = %id, "Product not in cart, nothing to do");
    }
}

/// One-line description of a change for the terminal.
#[must_use]
pub fn describe(change: &CartChange) -> String {
    match change {
        CartChange::Added(id) => format!("added {id}"),
        CartChange::Incremented { id, quantity } => format!("{id} -> {quantity}"),
        CartChange::Decremented { id, quantity } => format!("{id} -> {quantity}"),
        CartChange::Removed(id) => format!("removed {id}"),
        CartChange::Cleared { lines } => format!("cleared {lines} line(s)"),
        CartChange::Unchanged => "no change".to_string(),
    }
}
