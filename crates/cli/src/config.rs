//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORAGE_DIR` - Directory for the saved cart (default: `.go-marketplace`)
//! - `CART_STORAGE_KEY` - Key the cart is saved under (default: `@GoMarketplace:products`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g., `development`)

use go_marketplace_cart::{CartConfig, ConfigError};

/// Configuration for the `gm-cart` binary.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Cart storage settings
    pub cart: CartConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl CliConfig {
    /// Load configuration from environment variables (and `.env`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the cart settings are invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cart = CartConfig::from_env()?;

        Ok(Self {
            cart,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}
