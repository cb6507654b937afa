//! Cart line items and reconciliation.
//!
//! [`CartState`] is the ordered, unique-by-id list of [`LineItem`]s. All
//! mutations are pure state transitions that report a [`CartChange`]; callers
//! decide what to publish or persist based on it.

pub mod codec;
pub mod line_item;
pub mod state;

pub use codec::CartCodecError;
pub use line_item::{LineItem, NewLineItem};
pub use state::{CartChange, CartState};
