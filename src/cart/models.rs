//! Cart Models

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    images::{CanonicalImage, resolve_images},
    products::{ImageRef, ProductId},
};

/// One cart line, keyed by product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product this line refers to. Unique within a cart.
    pub product_id: ProductId,

    /// Product name at the last add
    pub name: String,

    /// Product category at the last add
    pub category: String,

    /// Unit price at the last add
    pub unit_price: Decimal,

    /// Quantity, always at least 1
    pub quantity: u32,

    /// Resolved display URL, `None` renders a placeholder
    #[serde(default)]
    pub image_url: Option<String>,

    /// Storage path the display URL was built from
    #[serde(default)]
    pub image_path: Option<String>,

    /// Images of the most recent snapshot
    #[serde(default)]
    pub raw_images: Vec<ImageRef>,
}

impl CartItem {
    /// `unit_price × quantity`, saturating at [`Decimal::MAX`].
    ///
    /// Lines held by a cart never saturate.
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }

    /// `unit_price × quantity`, or `None` if it is not representable.
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    /// Line total in `currency`.
    pub fn line_money(&self, currency: &'static Currency) -> Money<'static, Currency> {
        Money::from_decimal(self.line_total(), currency)
    }

    /// The resolved display image.
    pub fn image(&self) -> Option<CanonicalImage> {
        self.image_url.as_ref().map(|url| CanonicalImage {
            url: url.clone(),
            path: self.image_path.clone(),
        })
    }

    /// Resolve the display image again from the retained snapshot images.
    ///
    /// Useful when the storage base URL changed since the item was added.
    pub fn resolve_raw_image(&self, base_url: &str) -> Option<CanonicalImage> {
        resolve_images(&self.raw_images, None, self.image_path.as_deref(), base_url)
            .or_else(|| self.image())
    }

    pub(crate) fn set_image(&mut self, image: Option<CanonicalImage>) {
        match image {
            Some(CanonicalImage { url, path }) => {
                self.image_url = Some(url);
                self.image_path = path;
            }
            None => {
                self.image_url = None;
                self.image_path = None;
            }
        }
    }
}

/// Sum of the line totals, or `None` if any line or the sum is not representable.
pub fn checked_total<'a>(items: impl IntoIterator<Item = &'a CartItem>) -> Option<Decimal> {
    items.into_iter().try_fold(Decimal::ZERO, |total, item| {
        total.checked_add(item.checked_line_total()?)
    })
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::IDR;

    use super::*;

    fn rose(quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::Int(1),
            name: "Rose".to_string(),
            category: "Flowers".to_string(),
            unit_price: Decimal::from(100_000),
            quantity,
            image_url: None,
            image_path: None,
            raw_images: vec![ImageRef::path("rose.jpg")],
        }
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        assert_eq!(rose(3).line_total(), Decimal::from(300_000));
    }

    #[test]
    fn oversized_line_total_is_none() {
        let mut item = rose(2);
        item.unit_price = Decimal::MAX;

        assert_eq!(item.checked_line_total(), None);
        assert_eq!(item.line_total(), Decimal::MAX);
        assert_eq!(checked_total([&rose(1), &item]), None);
        assert_eq!(checked_total([&rose(1), &rose(2)]), Some(Decimal::from(300_000)));
    }

    #[test]
    fn line_money_uses_currency() {
        assert_eq!(
            rose(2).line_money(IDR),
            Money::from_decimal(Decimal::from(200_000), IDR)
        );
    }

    #[test]
    fn set_image_copies_url_and_path() {
        let mut item = rose(1);

        item.set_image(Some(CanonicalImage {
            url: "/storage/rose.jpg".to_string(),
            path: Some("rose.jpg".to_string()),
        }));

        assert_eq!(item.image_url.as_deref(), Some("/storage/rose.jpg"));
        assert_eq!(item.image_path.as_deref(), Some("rose.jpg"));

        item.set_image(None);

        assert_eq!(item.image(), None);
        assert_eq!(item.image_path, None);
    }

    #[test]
    fn raw_images_resolve_against_new_base() {
        let item = rose(1);

        assert_eq!(
            item.resolve_raw_image("https://cdn.test").map(|image| image.url),
            Some("https://cdn.test/rose.jpg".to_string())
        );
    }
}
