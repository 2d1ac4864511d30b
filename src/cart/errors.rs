//! Cart Errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{products::ProductId, storage::StorageError};

/// Reasons an operation was rejected before touching the cart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidInput {
    /// The snapshot has no usable product id.
    #[error("product id is required")]
    MissingProductId,

    /// Items must be added with a quantity of at least one.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// The price could not be read as a number.
    #[error("invalid price: {0:?}")]
    InvalidPrice(String),

    /// The price is below zero.
    #[error("price must not be negative, got {0}")]
    NegativePrice(Decimal),

    /// The resulting quantity does not fit in a `u32`.
    #[error("quantity overflow")]
    QuantityOverflow,

    /// The line total or the cart total would exceed the largest representable
    /// amount.
    #[error("amount overflow")]
    AmountOverflow,
}

/// Errors returned by cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The input was rejected; nothing changed.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    /// No item exists for the product.
    #[error("product {0} is not in the cart")]
    NotFound(ProductId),
}

/// Errors raised while mirroring the cart to storage.
///
/// None of these reach callers of the mutation operations: restore failures
/// start an empty cart, write failures leave the cart degraded.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading persisted state failed.
    #[error("cart storage unavailable: {0}")]
    StorageUnavailable(#[source] StorageError),

    /// Persisted state could not be parsed.
    #[error("persisted cart is corrupt: {0}")]
    StorageCorrupt(#[source] serde_json::Error),

    /// Writing the cart failed after the mutation was applied.
    #[error("failed to write cart: {0}")]
    StorageWriteFailed(#[source] StorageError),

    /// The cart could not be serialized.
    #[error("failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),
}
