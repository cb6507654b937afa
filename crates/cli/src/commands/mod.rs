//! Command implementations.
//!
//! Each command returns the text to print; `main` owns stdout.

pub mod cart;
pub mod report;

use go_marketplace_cart::CartError;
use go_marketplace_core::ProductIdError;
use thiserror::Error;

/// Errors a command can fail with.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid product id: {0}")]
    ProductId(#[from] ProductIdError),

    #[error("Invalid price: {0}")]
    Price(String),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}
