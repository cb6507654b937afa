//! Ordered cart state and its mutations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LineItem, NewLineItem};
use crate::types::{ProductId, Quantity};

/// Outcome of a cart mutation.
///
/// Anything other than [`CartChange::Unchanged`] means the cart is different
/// and should be published and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended with quantity one.
    Added(ProductId),
    /// An existing line's quantity went up.
    Incremented {
        /// Product whose line changed.
        id: ProductId,
        /// Quantity after the change.
        quantity: Quantity,
    },
    /// An existing line's quantity went down but stayed at least one.
    Decremented {
        /// Product whose line changed.
        id: ProductId,
        /// Quantity after the change.
        quantity: Quantity,
    },
    /// A line reached zero and left the cart.
    Removed(ProductId),
    /// Every line was removed.
    Cleared {
        /// Number of lines that were in the cart.
        lines: usize,
    },
    /// Nothing matched; the cart is untouched.
    Unchanged,
}

impl CartChange {
    /// Whether the mutation modified the cart.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// The full ordered collection of line items.
///
/// ## Invariants
///
/// - No two lines share a [`ProductId`].
/// - Every line has quantity ≥ 1 (enforced by [`Quantity`]).
/// - Existing lines keep their position; new lines are appended.
///
/// ## Examples
///
/// ```
/// use go_marketplace_core::{CartState, NewLineItem, ProductId, UnitPrice};
///
/// let shirt = NewLineItem::new(
///     ProductId::parse("p1").unwrap(),
///     "Shirt",
///     "x",
///     UnitPrice::from_cents(1000),
/// );
///
/// let mut cart = CartState::new();
/// cart.add(shirt.clone());
/// cart.add(shirt);
/// assert_eq!(cart.len(), 1);
/// assert_eq!(cart.get("p1").unwrap().quantity.get(), 2);
///
/// cart.decrement("p1");
/// cart.decrement("p1");
/// assert!(cart.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from a list of lines, merging duplicate ids.
    ///
    /// The first occurrence of an id keeps its position and fields; later
    /// occurrences only contribute their quantity.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut merged: Vec<LineItem> = Vec::with_capacity(items.len());
        for item in items {
            match merged.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => merged.push(item),
            }
        }
        Self { items: merged }
    }

    /// Lines in cart order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over lines in cart order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Sum of all quantities (the number shown on a cart badge).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity.get())).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity goes up by one and
    /// the stored title, image, and price are kept. Otherwise the product is
    /// appended with quantity one.
    pub fn add(&mut self, item: NewLineItem) -> CartChange {
        if self.position(item.id.as_str()).is_some() {
            return self.increment(item.id.as_str());
        }
        let id = item.id.clone();
        self.items.push(item.with_quantity(Quantity::ONE));
        CartChange::Added(id)
    }

    /// Add one unit to an existing line, in place.
    ///
    /// Unknown ids, and lines already at `u32::MAX`, leave the cart unchanged.
    pub fn increment(&mut self, id: &str) -> CartChange {
        let Some(line) = self.items.iter_mut().find(|item| item.id == id) else {
            return CartChange::Unchanged;
        };
        let next = line.quantity.incremented();
        if next == line.quantity {
            return CartChange::Unchanged;
        }
        line.quantity = next;
        CartChange::Incremented {
            id: line.id.clone(),
            quantity: line.quantity,
        }
    }

    /// Remove one unit from an existing line.
    ///
    /// A line at quantity one is removed entirely. Unknown ids leave the cart
    /// unchanged.
    pub fn decrement(&mut self, id: &str) -> CartChange {
        let Some(index) = self.position(id) else {
            return CartChange::Unchanged;
        };
        let Some(line) = self.items.get_mut(index) else {
            return CartChange::Unchanged;
        };

        if let Some(quantity) = line.quantity.decremented() {
            line.quantity = quantity;
            CartChange::Decremented {
                id: line.id.clone(),
                quantity,
            }
        } else {
            let removed = self.items.remove(index);
            CartChange::Removed(removed.id)
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) -> CartChange {
        if self.items.is_empty() {
            return CartChange::Unchanged;
        }
        let lines = self.items.len();
        self.items.clear();
        CartChange::Cleared { lines }
    }
}

impl From<Vec<LineItem>> for CartState {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<CartState> for Vec<LineItem> {
    fn from(cart: CartState) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::UnitPrice;

    fn product(id: &str) -> NewLineItem {
        NewLineItem::new(
            ProductId::parse(id).unwrap(),
            format!("Product {id}"),
            format!("https://img.example/{id}.png"),
            UnitPrice::from_cents(1000),
        )
    }

    fn quantities(cart: &CartState) -> Vec<(&str, u32)> {
        cart.iter()
            .map(|item| (item.id.as_str(), item.quantity.get()))
            .collect()
    }

    #[test]
    fn test_distinct_adds_each_quantity_one() {
        let mut cart = CartState::new();
        for id in ["a", "b", "c", "d"] {
            assert_eq!(cart.add(product(id)), CartChange::Added(ProductId::parse(id).unwrap()));
        }
        assert_eq!(
            quantities(&cart),
            [("a", 1), ("b", 1), ("c", 1), ("d", 1)]
        );
    }

    #[test]
    fn test_same_id_twice_merges() {
        let mut cart = CartState::new();
        cart.add(product("p1"));
        let change = cart.add(product("p1"));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("p1").unwrap().quantity.get(), 2);
        assert!(matches!(change, CartChange::Incremented { .. }));
    }

    #[test]
    fn test_add_existing_keeps_stored_fields() {
        let mut cart = CartState::new();
        cart.add(product("p1"));

        let mut renamed = product("p1");
        renamed.title = "Renamed".to_string();
        renamed.unit_price = UnitPrice::from_cents(1);
        cart.add(renamed);

        let line = cart.get("p1").unwrap();
        assert_eq!(line.title, "Product p1");
        assert_eq!(line.unit_price, UnitPrice::from_cents(1000));
    }

    #[test]
    fn test_increment_in_place() {
        let mut cart = CartState::new();
        for id in ["a", "b", "c"] {
            cart.add(product(id));
        }
        let before = cart.clone();

        cart.increment("b");

        assert_eq!(quantities(&cart), [("a", 1), ("b", 2), ("c", 1)]);
        let (old_b, new_b) = (before.get("b").unwrap(), cart.get("b").unwrap());
        assert_eq!(old_b.title, new_b.title);
        assert_eq!(old_b.image_url, new_b.image_url);
        assert_eq!(old_b.unit_price, new_b.unit_price);
        assert_eq!(before.get("a"), cart.get("a"));
        assert_eq!(before.get("c"), cart.get("c"));
    }

    #[test]
    fn test_increment_unknown_is_noop() {
        let mut cart = CartState::new();
        cart.add(product("a"));
        let before = cart.clone();

        assert_eq!(cart.increment("missing"), CartChange::Unchanged);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_increment_at_max_is_unchanged() {
        let full = product("p1").with_quantity(Quantity::new(u32::MAX).unwrap());
        let mut cart = CartState::from_items(vec![full]);
        let before = cart.clone();

        assert_eq!(cart.increment("p1"), CartChange::Unchanged);
        assert_eq!(cart.add(product("p1")), CartChange::Unchanged);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrement_at_one_removes() {
        let mut cart = CartState::new();
        cart.add(product("a"));
        cart.add(product("b"));

        let change = cart.decrement("a");

        assert_eq!(change, CartChange::Removed(ProductId::parse("a").unwrap()));
        assert_eq!(quantities(&cart), [("b", 1)]);
    }

    #[test]
    fn test_decrement_keeps_position() {
        let mut cart = CartState::new();
        cart.add(product("a"));
        cart.add(product("b"));
        cart.add(product("c"));
        cart.increment("b");
        cart.increment("b");

        cart.decrement("b");

        assert_eq!(quantities(&cart), [("a", 1), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn test_decrement_unknown_is_noop() {
        let mut cart = CartState::new();
        cart.add(product("a"));
        let before = cart.clone();

        assert_eq!(cart.decrement("zzz"), CartChange::Unchanged);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_shirt_scenario() {
        let mut cart = CartState::new();

        cart.add(product("p1"));
        assert_eq!(quantities(&cart), [("p1", 1)]);

        cart.add(product("p1"));
        assert_eq!(quantities(&cart), [("p1", 2)]);

        cart.decrement("p1");
        assert_eq!(quantities(&cart), [("p1", 1)]);

        cart.decrement("p1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = CartState::new();
        assert_eq!(cart.clear(), CartChange::Unchanged);

        cart.add(product("a"));
        cart.add(product("b"));
        assert_eq!(cart.clear(), CartChange::Cleared { lines: 2 });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = CartState::new();
        cart.add(product("a"));
        cart.add(product("a"));
        cart.add(NewLineItem::new(
            ProductId::parse("b").unwrap(),
            "B",
            "",
            UnitPrice::from_cents(250),
        ));

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal(), Decimal::new(2250, 2));
    }

    #[test]
    fn test_change_is_changed() {
        assert!(!CartChange::Unchanged.is_changed());
        assert!(CartChange::Cleared { lines: 1 }.is_changed());
    }
}
