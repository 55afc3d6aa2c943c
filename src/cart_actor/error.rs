//! Error types for the Cart actor.

use super::CartCommand;
use crate::model::ProductId;
use crate::services::{ServiceError, StorageError};
use thiserror::Error;

pub const OUT_OF_STOCK: &str = "Requested quantity is out of stock";
pub const ADD_FAILED: &str = "Failed to add product";
pub const REMOVE_FAILED: &str = "Failed to remove product";
pub const UPDATE_FAILED: &str = "Failed to update product quantity";
pub const PRODUCT_ADDED: &str = "Product added to cart";

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The amount asked for is more than the stock service has.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    StockExceeded {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// Remove or update of a product that has no line in the cart.
    #[error("Not in cart: {0}")]
    NotInCart(ProductId),

    /// The stock lookup failed.
    #[error("Stock lookup failed: {0}")]
    Stock(#[source] ServiceError),

    /// The catalog lookup failed.
    #[error("Catalog lookup failed: {0}")]
    Catalog(#[source] ServiceError),

    /// The new cart could not be written to storage.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    /// The message shown to the user when `command` fails with this error.
    pub fn user_message(&self, command: &CartCommand) -> &'static str {
        if let CartError::StockExceeded { .. } = self {
            return OUT_OF_STOCK;
        }
        match command {
            CartCommand::AddProduct(_) => ADD_FAILED,
            CartCommand::RemoveProduct(_) => REMOVE_FAILED,
            CartCommand::UpdateProductAmount { .. } => UPDATE_FAILED,
        }
    }
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
