//! Products
//!
//! Product snapshots as handed to the cart by the catalog layer. Catalog data is
//! semi-structured, so every field other than `id`, `name` and `price` is optional
//! and image fields accept the handful of spellings seen in the wild.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::cart::errors::InvalidInput;

/// Product identifier, either numeric or textual.
///
/// `1` and `"1"` are distinct identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric identifier
    Int(i64),

    /// Textual identifier
    Text(String),
}

impl ProductId {
    /// Whether the identifier carries no value, i.e. an empty or blank string.
    pub fn is_blank(&self) -> bool {
        match self {
            ProductId::Int(_) => false,
            ProductId::Text(text) => text.trim().is_empty(),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Int(id) => write!(f, "{id}"),
            ProductId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId::Int(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId::Text(id)
    }
}

/// Price as delivered by the catalog, before coercion.
///
/// Anything a [`Decimal`] accepts directly lands in `Amount`; everything else is
/// kept as text and only rejected when the cart ingests it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    /// Already numeric amount
    Amount(Decimal),

    /// Numeric-like text, e.g. `"100000"`
    Text(String),
}

impl PriceInput {
    /// Coerce the input to a non-negative amount.
    ///
    /// # Errors
    ///
    /// - [`InvalidInput::InvalidPrice`]: the text is empty or not a number.
    /// - [`InvalidInput::NegativePrice`]: the amount is below zero.
    pub fn coerce(&self) -> Result<Decimal, InvalidInput> {
        let amount = match self {
            PriceInput::Amount(amount) => *amount,
            PriceInput::Text(text) => parse_price(text)?,
        };

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(InvalidInput::NegativePrice(amount));
        }

        Ok(amount.normalize())
    }
}

fn parse_price(text: &str) -> Result<Decimal, InvalidInput> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(InvalidInput::InvalidPrice(text.to_string()));
    }

    Decimal::from_str(trimmed)
        .or_else(|_err| Decimal::from_scientific(trimmed))
        .map_err(|_err| InvalidInput::InvalidPrice(text.to_string()))
}

impl From<Decimal> for PriceInput {
    fn from(amount: Decimal) -> Self {
        PriceInput::Amount(amount)
    }
}

impl From<u64> for PriceInput {
    fn from(amount: u64) -> Self {
        PriceInput::Amount(Decimal::from(amount))
    }
}

impl From<i64> for PriceInput {
    fn from(amount: i64) -> Self {
        PriceInput::Amount(Decimal::from(amount))
    }
}

impl From<&str> for PriceInput {
    fn from(text: &str) -> Self {
        PriceInput::Text(text.to_string())
    }
}

impl From<String> for PriceInput {
    fn from(text: String) -> Self {
        PriceInput::Text(text)
    }
}

/// A single image entry attached to a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    /// Absolute or relative URL
    #[serde(default, alias = "image_url", alias = "url")]
    pub image_url: Option<String>,

    /// Storage-relative path, joined to the storage base URL when displayed
    #[serde(default, alias = "image_path", alias = "path")]
    pub image_path: Option<String>,

    /// Primary image flag
    #[serde(default, alias = "is_primary", alias = "primary")]
    pub is_primary: bool,
}

impl ImageRef {
    /// Image addressed by URL.
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            image_url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Image addressed by storage path.
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            image_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Mark the image as primary.
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

/// Product data captured at the moment it is added to the cart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Product identifier, required by the cart
    #[serde(default)]
    pub id: Option<ProductId>,

    /// Product name
    pub name: String,

    /// Unit price, coerced on ingestion
    pub price: PriceInput,

    /// Product category
    #[serde(default)]
    pub category: Option<String>,

    /// Product images in catalog order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<ImageRef>,

    /// Top-level fallback image URL
    #[serde(default, alias = "image_url")]
    pub image_url: Option<String>,

    /// Top-level fallback image path
    #[serde(default, alias = "image_path")]
    pub image_path: Option<String>,

    /// Advisory stock level, never enforced
    #[serde(default)]
    pub stock: Option<i64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ImageRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ImageRef>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProductSnapshot {
    /// Create a snapshot with the required fields.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: impl Into<PriceInput>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            price: price.into(),
            category: None,
            images: Vec::new(),
            image_url: None,
            image_path: None,
            stock: None,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the image list.
    pub fn with_images(mut self, images: impl Into<Vec<ImageRef>>) -> Self {
        self.images = images.into();
        self
    }

    /// Set the top-level image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the top-level image path.
    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    /// Set the advisory stock level.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }
}
