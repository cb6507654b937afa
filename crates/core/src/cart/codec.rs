//! JSON encoding of the persisted cart.
//!
//! The persisted form is a JSON array of line item objects. Decoding merges
//! duplicate ids so a blob written by an older client still yields a
//! unique-by-id cart.

use thiserror::Error;

use super::CartState;

/// Errors from encoding or decoding a persisted cart.
#[derive(Debug, Error)]
pub enum CartCodecError {
    /// The blob was not a valid JSON array of line items.
    #[error("Malformed cart data: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The cart could not be serialized.
    #[error("Failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CartState {
    /// Serialize the cart to its persisted JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CartCodecError::Encode`] if serialization fails.
    pub fn to_json(&self) -> Result<Vec<u8>, CartCodecError> {
        serde_json::to_vec(self).map_err(CartCodecError::Encode)
    }

    /// Deserialize a cart from its persisted JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CartCodecError::Malformed`] if the bytes are not a JSON array
    /// of valid line items (including any line with quantity zero).
    pub fn from_json(bytes: &[u8]) -> Result<Self, CartCodecError> {
        serde_json::from_slice(bytes).map_err(CartCodecError::Malformed)
    }
}
