//! Read-only cart commands: listing, totals, and saved-data checks.

use go_marketplace_cart::{CartState, KeyValueStore, read_saved};

use super::CommandError;

/// Render the cart as an aligned table, or as the persisted JSON.
///
/// # Errors
///
/// Returns an error only if JSON rendering fails.
pub fn list(cart: &CartState, json: bool) -> Result<String, CommandError> {
    if json {
        return Ok(serde_json::to_string_pretty(cart)?);
    }
    if cart.is_empty() {
        return Ok("cart is empty".to_string());
    }

    let id_width = cart.iter().map(|item| item.id.as_str().len()).max().unwrap_or(0);
    let title_width = cart.iter().map(|item| item.title.len()).max().unwrap_or(0);

    let lines: Vec<String> = cart
        .iter()
        .map(|item| {
            format!(
                "{:<id_width$}  {:<title_width$}  {:>4} x {:>8}  = {:>9.2}",
                item.id.as_str(),
                item.title,
                item.quantity.get(),
                item.unit_price.to_string(),
                item.line_total(),
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Item count and subtotal.
#[must_use]
pub fn summary(cart: &CartState) -> String {
    format!(
        "{} product(s), {} item(s), subtotal {:.2}",
        cart.len(),
        cart.total_quantity(),
        cart.subtotal()
    )
}

/// Validate the saved cart without falling back to an empty one.
///
/// # Errors
///
/// Returns the storage or decoding error that a normal open would have
/// swallowed.
pub async fn check(storage: &dyn KeyValueStore, key: &str) -> Result<String, CommandError> {
    Ok(match read_saved(storage, key).await? {
        Some(cart) => format!("ok: {}", summary(&cart)),
        None => format!("ok: nothing saved under {key}"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use go_marketplace_cart::{CartError, MemoryStore};

    use super::*;

    const HAT: &str = r#"[{"id":"p2","title":"Hat","imageUrl":"y","unitPrice":5,"quantity":3}]"#;

    #[test]
    fn test_list_table() {
        let cart = CartState::from_json(HAT.as_bytes()).unwrap();
        let out = list(&cart, false).unwrap();
        assert!(out.starts_with("p2  Hat"));
        assert!(out.contains("3 x"));
        assert!(out.ends_with("15.00"));
    }

    #[test]
    fn test_list_json_is_persisted_format() {
        let cart = CartState::from_json(HAT.as_bytes()).unwrap();
        let out = list(&cart, true).unwrap();
        assert_eq!(CartState::from_json(out.as_bytes()).unwrap(), cart);
    }

    #[test]
    fn test_list_empty() {
        assert_eq!(list(&CartState::new(), false).unwrap(), "cart is empty");
    }

    #[test]
    fn test_summary() {
        let cart = CartState::from_json(HAT.as_bytes()).unwrap();
        assert_eq!(summary(&cart), "1 product(s), 3 item(s), subtotal 15.00");
    }

    #[tokio::test]
    async fn test_check() {
        let storage = MemoryStore::with_value("k", HAT);
        assert!(check(&storage, "k").await.unwrap().starts_with("ok: 1 product(s)"));
        assert_eq!(
            check(&storage, "none").await.unwrap(),
            "ok: nothing saved under none"
        );

        let broken = MemoryStore::with_value("k", "[{]");
        assert!(matches!(
            check(&broken, "k").await,
            Err(CommandError::Cart(CartError::Codec(_)))
        ));
    }
}
