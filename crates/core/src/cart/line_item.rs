//! Cart line item types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ProductId, Quantity, UnitPrice};

/// A product the caller wants to put in the cart.
///
/// This is a [`LineItem`] without a quantity: the cart decides the quantity
/// when it reconciles the request with existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    /// Product identity.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Price of one unit.
    pub unit_price: UnitPrice,
}

impl NewLineItem {
    /// Create a new line item request.
    #[must_use]
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        image_url: impl Into<String>,
        unit_price: UnitPrice,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            image_url: image_url.into(),
            unit_price,
        }
    }

    /// Turn the request into a line with the given quantity.
    #[must_use]
    pub fn with_quantity(self, quantity: Quantity) -> LineItem {
        LineItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            unit_price: self.unit_price,
            quantity,
        }
    }
}

/// One product entry in the cart.
///
/// Serialized field names (`id`, `title`, `imageUrl`, `unitPrice`,
/// `quantity`) are the persisted format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product identity. Unique within a cart.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Price of one unit.
    pub unit_price: UnitPrice,
    /// Units in the cart, always at least one.
    pub quantity: Quantity,
}

impl LineItem {
    /// Price of the whole line (`unit_price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * self.quantity
    }
}
