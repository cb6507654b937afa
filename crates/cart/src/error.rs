//! Cart error types.

use go_marketplace_core::CartCodecError;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by the cart runtime.
///
/// Read and write failures during normal operation are recovered inside
/// [`CartStore`](crate::CartStore) and only logged; these variants reach
/// callers through explicit inspection APIs and scope lookups.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart was accessed outside of an active [`CartScope`](crate::CartScope).
    #[error("cart accessed outside of an active CartScope")]
    OutsideScope,

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Saved cart data could not be decoded or encoded.
    #[error("Cart data error: {0}")]
    Codec(#[from] CartCodecError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
