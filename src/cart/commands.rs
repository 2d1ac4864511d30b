//! Cart Commands

use crate::products::{ProductId, ProductSnapshot};

/// A single cart operation, as dispatched by UI event handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Add `quantity` of a product, merging with an existing line.
    Add {
        /// Snapshot to add
        product: ProductSnapshot,
        /// Quantity to add, at least 1
        quantity: u32,
    },

    /// Remove a product's line.
    Remove(ProductId),

    /// Set a product's quantity; 0 removes the line.
    UpdateQuantity(ProductId, u32),

    /// Add one to a product's quantity.
    Increment(ProductId),

    /// Take one from a product's quantity, removing the line at 0.
    Decrement(ProductId),

    /// Remove every line.
    Clear,
}

impl CartCommand {
    /// Add a single unit of `product`.
    pub fn add_one(product: ProductSnapshot) -> Self {
        CartCommand::Add {
            product,
            quantity: 1,
        }
    }

    /// Product the command targets, `None` for [`CartCommand::Clear`].
    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            CartCommand::Add { product, .. } => product.id.as_ref(),
            CartCommand::Remove(id)
            | CartCommand::UpdateQuantity(id, _)
            | CartCommand::Increment(id)
            | CartCommand::Decrement(id) => Some(id),
            CartCommand::Clear => None,
        }
    }
}
