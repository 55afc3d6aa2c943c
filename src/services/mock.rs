//! # Service Test Doubles
//!
//! Stand-ins for the collaborators of the cart store, for tests that need to control
//! exactly what the outside world answers.
//!
//! - [`MockStockService`] answers from a queue of expectations and panics on anything it
//!   was not told to expect, like [`store_framework::mock::MockClient`].
//! - [`StaticCatalog`] answers from a fixed product list and counts lookups.
//! - [`RecordingNotifier`] keeps every message it was asked to show.
//! - [`FailingStore`] is a [`MemoryStore`] whose writes can be switched off.
//!
//! ```rust
//! use cart_recipe::model::ProductId;
//! use cart_recipe::services::mock::MockStockService;
//! use cart_recipe::services::{ServiceError, StockService};
//!
//! #[tokio::main]
//! async fn main() {
//!     let stock = MockStockService::new();
//!     stock.expect_available(ProductId(1)).return_ok(3);
//!     stock.expect_available(ProductId(2)).return_err(ServiceError::NotFound(ProductId(2)));
//!
//!     assert_eq!(stock.available(ProductId(1)).await, Ok(3));
//!     assert!(stock.available(ProductId(2)).await.is_err());
//!     stock.verify();
//! }
//! ```

use super::{KeyValueStore, MemoryStore, Notifier, ProductCatalog, ServiceError, StockService, StorageError};
use crate::model::{Product, ProductId};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// =============================================================================
// STOCK
// =============================================================================

struct StockExpectation {
    id: ProductId,
    response: Result<u32, ServiceError>,
}

/// Stock service answering from a queue of expectations.
#[derive(Default)]
pub struct MockStockService {
    expectations: Arc<Mutex<VecDeque<StockExpectation>>>,
    calls: Mutex<Vec<ProductId>>,
}

impl MockStockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a lookup for `id`.
    pub fn expect_available(&self, id: ProductId) -> StockExpectationBuilder {
        StockExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// The ids looked up so far, in order.
    pub fn calls(&self) -> Vec<ProductId> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all stock expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for stock expectations.
pub struct StockExpectationBuilder {
    id: ProductId,
    expectations: Arc<Mutex<VecDeque<StockExpectation>>>,
}

impl StockExpectationBuilder {
    pub fn return_ok(self, amount: u32) {
        self.push(Ok(amount));
    }

    pub fn return_err(self, error: ServiceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<u32, ServiceError>) {
        self.expectations.lock().unwrap().push_back(StockExpectation {
            id: self.id,
            response,
        });
    }
}

#[async_trait]
impl StockService for MockStockService {
    async fn available(&self, id: ProductId) -> Result<u32, ServiceError> {
        self.calls.lock().unwrap().push(id);
        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(StockExpectation { id: expected, response }) if expected == id => response,
            Some(StockExpectation { id: expected, .. }) => {
                panic!("Unexpected stock lookup for {id}, expected {expected}")
            }
            None => panic!("Unexpected stock lookup for {id}"),
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Catalog answering from a fixed product list.
#[derive(Default)]
pub struct StaticCatalog {
    products: HashMap<ProductId, Product>,
    failures: HashMap<ProductId, ServiceError>,
    lookups: AtomicUsize,
}

impl StaticCatalog {
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            ..Self::default()
        }
    }

    /// Makes every lookup of `id` fail with `error`.
    pub fn failing(mut self, id: ProductId, error: ServiceError) -> Self {
        self.failures.insert(id, error);
        self
    }

    /// Number of lookups made so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductCatalog for StaticCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failures.get(&id) {
            return Err(error.clone());
        }
        self.products
            .get(&id)
            .cloned()
            .ok_or(ServiceError::NotFound(id))
    }
}

// =============================================================================
// NOTIFIER
// =============================================================================

/// Notifier that remembers what it was asked to show.
#[derive(Default)]
pub struct RecordingNotifier {
    errors: Mutex<Vec<String>>,
    successes: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }
}

// =============================================================================
// STORAGE
// =============================================================================

/// In-memory store whose writes fail while [`FailingStore::set_failing`] is on.
/// Reads always succeed.
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
    failing: AtomicBool,
    writes: AtomicUsize,
}

impl FailingStore {
    /// A store that rejects writes from the start.
    pub fn new() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("write rejected".to_string()));
        }
        self.inner.set(key, value)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
