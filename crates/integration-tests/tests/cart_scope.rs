//! Integration tests for scoped cart access.
//!
//! Code deep in a call stack reaches the cart through `CartScope::current()`;
//! outside a scope that must fail instead of handing back a default cart.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use go_marketplace_cart::{CartError, CartScope, CartStore, MemoryStore};
use go_marketplace_integration_tests::{CART_KEY, product};

/// Stand-in for a view model that only knows about the scoped cart.
fn add_shirt_from_button() -> Result<u64, CartError> {
    let cart = CartScope::current()?;
    cart.add_to_cart(product("p1", "Shirt", 10));
    Ok(cart.snapshot().total_quantity())
}

#[tokio::test]
async fn test_view_code_inside_scope() {
    let store = CartStore::open(MemoryStore::new(), CART_KEY).await;

    let badges = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&badges);
    let _sub = store.subscribe(move |cart| sink.lock().unwrap().push(cart.total_quantity()));

    let total = CartScope::run(store.clone(), async {
        add_shirt_from_button().unwrap();
        add_shirt_from_button()
    })
    .await
    .unwrap();

    assert_eq!(total, 2);
    assert_eq!(*badges.lock().unwrap(), [1, 2]);
}

#[test]
fn test_view_code_outside_scope_fails() {
    let err = add_shirt_from_button().unwrap_err();
    assert!(matches!(err, CartError::OutsideScope));
    assert!(err.to_string().contains("CartScope"));
}
