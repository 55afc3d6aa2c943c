//! In-process storefront API backed by a JSON fixture.
//!
//! The fixture has the same shape as the storefront's `db.json`:
//!
//! ```json
//! {
//!   "products": [{ "id": 1, "title": "Tênis", "price": 179.9, "image": "…" }],
//!   "stock": [{ "id": 1, "amount": 3 }]
//! }
//! ```

use super::{ProductCatalog, ServiceError, StockService};
use crate::model::{Product, ProductId, Stock};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct Fixture {
    products: Vec<Product>,
    #[serde(default)]
    stock: Vec<Stock>,
}

/// Products and stock levels answering both [`ProductCatalog`] and [`StockService`].
///
/// Stock levels can be changed at runtime with [`InventoryApi::set_stock`]; the product
/// list is fixed once loaded.
#[derive(Debug, Default)]
pub struct InventoryApi {
    products: HashMap<ProductId, Product>,
    stock: RwLock<HashMap<ProductId, u32>>,
}

impl InventoryApi {
    pub fn new(products: Vec<Product>, stock: Vec<Stock>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            stock: RwLock::new(stock.into_iter().map(|s| (s.id, s.amount)).collect()),
        }
    }

    /// Parses a fixture in the storefront API format.
    pub fn from_json(raw: &str) -> Result<Self, ServiceError> {
        let fixture: Fixture =
            serde_json::from_str(raw).map_err(|e| ServiceError::Malformed(e.to_string()))?;
        debug!(
            products = fixture.products.len(),
            stock = fixture.stock.len(),
            "Loaded inventory fixture"
        );
        Ok(Self::new(fixture.products, fixture.stock))
    }

    /// Sets the available amount for `id`, adding a stock record if there was none.
    pub fn set_stock(&self, id: ProductId, amount: u32) -> Result<(), ServiceError> {
        let mut stock = self
            .stock
            .write()
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;
        stock.insert(id, amount);
        Ok(())
    }

    /// All products, ordered by id.
    pub fn products(&self) -> Vec<Product> {
        let mut products: Vec<_> = self.products.values().cloned().collect();
        products.sort_by_key(|p| p.id);
        products
    }
}

#[async_trait]
impl StockService for InventoryApi {
    #[instrument(skip(self))]
    async fn available(&self, id: ProductId) -> Result<u32, ServiceError> {
        let stock = self
            .stock
            .read()
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;
        stock.get(&id).copied().ok_or(ServiceError::NotFound(id))
    }
}

#[async_trait]
impl ProductCatalog for InventoryApi {
    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.products
            .get(&id)
            .cloned()
            .ok_or(ServiceError::NotFound(id))
    }
}
