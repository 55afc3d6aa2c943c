//! # Collaborators
//!
//! The cart store talks to four outside services, all injected as trait objects:
//!
//! - [`StockService`] - how many units of a product are available
//! - [`ProductCatalog`] - display data for a product
//! - [`KeyValueStore`] - where the serialized cart lives between sessions
//! - [`Notifier`] - transient user-facing messages
//!
//! [`InventoryApi`] implements the first two from a fixture file in the storefront API
//! format. [`MemoryStore`] and [`FileStore`] implement the third, [`TracingNotifier`] the
//! fourth. The [`mock`] module has test doubles for all of them.

pub mod inventory;
pub mod mock;
pub mod notifier;
pub mod storage;

pub use inventory::*;
pub use notifier::*;
pub use storage::*;

use crate::model::{Product, ProductId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by the stock and catalog services.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// The service has no record for this product.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The service answered with something that could not be understood.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The service could not be reached or failed internally.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Source of truth for available quantities.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Units of `id` currently available for purchase.
    async fn available(&self, id: ProductId) -> Result<u32, ServiceError>;
}

/// Source of product display data.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn product(&self, id: ProductId) -> Result<Product, ServiceError>;
}
