//! Persisted cart encoding
//!
//! The cart is stored as a JSON array of items with camelCase keys, the same shape
//! a browser storefront keeps in local storage.

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use tracing::warn;

use crate::cart::{errors::PersistenceError, models::CartItem};

/// Serialize the items for storage.
///
/// # Errors
///
/// Returns [`PersistenceError::Encode`] if serialization fails.
pub fn encode(items: &[CartItem]) -> Result<Vec<u8>, PersistenceError> {
    serde_json::to_vec(items).map_err(PersistenceError::Encode)
}

/// Parse stored bytes back into items.
///
/// Entries that would break the cart's invariants are dropped: zero quantity,
/// blank product id, negative price, repeated product id (the first entry wins)
/// and any entry whose amount would push the cart total past [`Decimal::MAX`].
///
/// # Errors
///
/// Returns [`PersistenceError::StorageCorrupt`] if the bytes are not a valid
/// item array.
pub fn decode(bytes: &[u8]) -> Result<Vec<CartItem>, PersistenceError> {
    let items: Vec<CartItem> =
        serde_json::from_slice(bytes).map_err(PersistenceError::StorageCorrupt)?;

    let mut seen = FxHashSet::default();
    let mut amount = Decimal::ZERO;
    let total = items.len();

    let kept: Vec<CartItem> = items
        .into_iter()
        .filter(|item| {
            if item.quantity == 0
                || item.product_id.is_blank()
                || (item.unit_price.is_sign_negative() && !item.unit_price.is_zero())
                || seen.contains(&item.product_id)
            {
                return false;
            }

            let Some(next) = item
                .checked_line_total()
                .and_then(|line| amount.checked_add(line))
            else {
                return false;
            };

            amount = next;
            seen.insert(item.product_id.clone())
        })
        .collect();

    if kept.len() < total {
        warn!(
            dropped = total - kept.len(),
            "dropped invalid entries from persisted cart"
        );
    }

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::products::{ImageRef, ProductId};

    use super::*;

    fn item(id: impl Into<ProductId>, quantity: u32, price: i64) -> CartItem {
        CartItem {
            product_id: id.into(),
            name: "Rose".to_string(),
            category: "Flowers".to_string(),
            unit_price: Decimal::from(price),
            quantity,
            image_url: Some("https://shop.test/storage/rose.jpg".to_string()),
            image_path: Some("rose.jpg".to_string()),
            raw_images: vec![ImageRef::path("rose.jpg").primary(), ImageRef::url("b.jpg")],
        }
    }

    #[test]
    fn encoded_items_decode_identically() -> TestResult {
        let items = vec![item(1, 2, 100_000), item("bouquet-7", 1, 350_000)];

        assert_eq!(decode(&encode(&items)?)?, items);

        Ok(())
    }

    #[test]
    fn encodes_camel_case_keys() -> TestResult {
        let json: serde_json::Value = serde_json::from_slice(&encode(&[item(1, 2, 5)])?)?;

        let entry = json.get(0).ok_or("missing entry")?;

        assert_eq!(entry.get("productId"), Some(&serde_json::json!(1)));
        assert_eq!(entry.get("unitPrice"), Some(&serde_json::json!("5")));
        assert!(entry.get("rawImages").is_some());

        Ok(())
    }

    #[test]
    fn decodes_browser_shaped_blob() -> TestResult {
        let items = decode(
            br#"[{"productId":3,"name":"Lily","category":"Flowers","unitPrice":75000,"quantity":4}]"#,
        )?;

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|item| item.quantity), Some(4));
        assert_eq!(items.first().map(|item| item.unit_price), Some(Decimal::from(75_000)));

        Ok(())
    }

    #[test]
    fn garbage_is_corrupt() {
        assert!(matches!(
            decode(b"{not json"),
            Err(PersistenceError::StorageCorrupt(_))
        ));
        assert!(matches!(
            decode(br#"{"productId":1}"#),
            Err(PersistenceError::StorageCorrupt(_))
        ));
    }

    #[test]
    fn invalid_entries_are_dropped() -> TestResult {
        let items = vec![
            item(1, 2, 10),
            item(2, 0, 10),
            item(3, 1, -10),
            item(1, 5, 20),
        ];

        let decoded = decode(&encode(&items)?)?;

        assert_eq!(decoded, vec![item(1, 2, 10)]);

        Ok(())
    }

    #[test]
    fn blank_ids_are_dropped() -> TestResult {
        let items = vec![item("", 1, 10), item("  ", 1, 10), item("rose", 1, 10)];

        let decoded = decode(&encode(&items)?)?;

        assert_eq!(decoded, vec![item("rose", 1, 10)]);

        Ok(())
    }

    #[test]
    fn unrepresentable_amounts_are_dropped() -> TestResult {
        let decoded = decode(
            br#"[
                {"productId":1,"name":"Big","category":"Flowers","unitPrice":"79228162514264337593543950335","quantity":2},
                {"productId":2,"name":"Rose","category":"Flowers","unitPrice":"1","quantity":1},
                {"productId":3,"name":"Max","category":"Flowers","unitPrice":"79228162514264337593543950335","quantity":1},
                {"productId":4,"name":"Lily","category":"Flowers","unitPrice":"5","quantity":1}
            ]"#,
        )?;

        let ids: Vec<ProductId> = decoded.iter().map(|item| item.product_id.clone()).collect();

        assert_eq!(ids, vec![ProductId::Int(2), ProductId::Int(4)]);

        Ok(())
    }
}
