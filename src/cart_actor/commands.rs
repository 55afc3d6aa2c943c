//! Commands understood by the cart store.
//!
//! Each command is handled by [`StoreState::handle`](store_framework::StoreState::handle)
//! on the [`Cart`](crate::model::Cart). See `entity.rs` for the rules.

use crate::model::ProductId;

/// Mutations a consumer can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add one unit of a product, appending a new line if it is not in the cart yet.
    AddProduct(ProductId),
    /// Delete the line for a product.
    RemoveProduct(ProductId),
    /// Set the amount of a product already in the cart.
    ///
    /// The amount is signed because it usually comes straight from a quantity input;
    /// values `<= 0` are ignored.
    UpdateProductAmount { product_id: ProductId, amount: i64 },
}

impl CartCommand {
    pub fn product_id(&self) -> ProductId {
        match self {
            CartCommand::AddProduct(id) | CartCommand::RemoveProduct(id) => *id,
            CartCommand::UpdateProductAmount { product_id, .. } => *product_id,
        }
    }
}

/// What a successful command did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// The cart changed, was persisted and published.
    Applied,
    /// Nothing happened: no lookup, no write, no notification.
    Ignored,
}
