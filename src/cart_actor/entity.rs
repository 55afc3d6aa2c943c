//! StoreState implementation for the [`Cart`].
//!
//! Every command reads what it needs from the stock service and the catalog first,
//! then builds a candidate cart. The actor persists the candidate through
//! [`on_commit`](StoreState::on_commit) and only publishes it once the write succeeded,
//! so a failed command never leaves a trace in memory or in storage.

use super::{CartChange, CartCommand, CartError, PRODUCT_ADDED};
use crate::model::{Cart, ProductId};
use crate::services::{KeyValueStore, Notifier, ProductCatalog, ServiceError, StockService, StorageError};
use async_trait::async_trait;
use std::sync::Arc;
use store_framework::{StoreState, Transition};
use tracing::{debug, warn};

/// Services the cart store needs while handling commands.
#[derive(Clone)]
pub struct CartContext {
    pub stock: Arc<dyn StockService>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub storage: Arc<dyn KeyValueStore>,
    pub notifier: Arc<dyn Notifier>,
    /// Key under which the serialized cart is stored.
    pub storage_key: String,
}

impl Cart {
    /// Reads the cart a previous session stored under `key`.
    ///
    /// Only a storage failure is an error; missing or unreadable text gives an empty cart.
    pub fn load(storage: &dyn KeyValueStore, key: &str) -> Result<Self, StorageError> {
        let raw = storage.get(key)?;
        let cart = Cart::hydrate(raw.as_deref());
        debug!(key, size = cart.len(), "Loaded cart");
        Ok(cart)
    }

    /// Overwrites the value under `key` with this cart.
    pub fn save(&self, storage: &dyn KeyValueStore, key: &str) -> Result<(), StorageError> {
        let json = self.to_json()?;
        storage.set(key, &json)?;
        debug!(key, size = self.len(), "Saved cart");
        Ok(())
    }

    async fn plan_add(
        &self,
        id: ProductId,
        ctx: &CartContext,
    ) -> Result<Transition<Self, CartChange>, CartError> {
        let current = self.amount_of(id);
        let requested = u64::from(current) + 1;
        let available = ctx.stock.available(id).await.map_err(CartError::Stock)?;

        if requested > u64::from(available) {
            return Err(CartError::StockExceeded {
                product_id: id,
                requested,
                available,
            });
        }

        let state = match self.with_amount(id, current + 1) {
            Some(next) => next,
            None => {
                let product = ctx.catalog.product(id).await.map_err(CartError::Catalog)?;
                if product.id != id {
                    return Err(CartError::Catalog(ServiceError::Malformed(format!(
                        "asked for {id}, got {}",
                        product.id
                    ))));
                }
                self.with_appended(product)
            }
        };

        Ok(Transition::Commit {
            state,
            outcome: CartChange::Applied,
        })
    }

    fn plan_remove(&self, id: ProductId) -> Result<Transition<Self, CartChange>, CartError> {
        let state = self.without(id).ok_or(CartError::NotInCart(id))?;
        Ok(Transition::Commit {
            state,
            outcome: CartChange::Applied,
        })
    }

    async fn plan_update(
        &self,
        id: ProductId,
        amount: i64,
        ctx: &CartContext,
    ) -> Result<Transition<Self, CartChange>, CartError> {
        if amount <= 0 {
            debug!(product_id = %id, amount, "Ignoring non-positive amount");
            return Ok(Transition::Keep {
                outcome: CartChange::Ignored,
            });
        }

        let requested = amount.unsigned_abs();
        let available = ctx.stock.available(id).await.map_err(CartError::Stock)?;

        if requested > u64::from(available) {
            return Err(CartError::StockExceeded {
                product_id: id,
                requested,
                available,
            });
        }

        // Bounded by `available` above.
        let amount = requested as u32;
        let state = self
            .with_amount(id, amount)
            .ok_or(CartError::NotInCart(id))?;

        Ok(Transition::Commit {
            state,
            outcome: CartChange::Applied,
        })
    }
}

#[async_trait]
impl StoreState for Cart {
    type Command = CartCommand;
    type Outcome = CartChange;
    type Context = CartContext;
    type Error = CartError;

    async fn handle(
        &self,
        command: &CartCommand,
        ctx: &CartContext,
    ) -> Result<Transition<Self, CartChange>, CartError> {
        match command {
            CartCommand::AddProduct(id) => self.plan_add(*id, ctx).await,
            CartCommand::RemoveProduct(id) => self.plan_remove(*id),
            CartCommand::UpdateProductAmount { product_id, amount } => {
                self.plan_update(*product_id, *amount, ctx).await
            }
        }
    }

    /// Persists the candidate cart. A failed write aborts the command.
    fn on_commit(&self, ctx: &CartContext) -> Result<(), CartError> {
        self.save(ctx.storage.as_ref(), &ctx.storage_key)?;
        Ok(())
    }

    fn on_committed(&self, command: &CartCommand, ctx: &CartContext) {
        if let CartCommand::AddProduct(_) = command {
            ctx.notifier.success(PRODUCT_ADDED);
        }
    }

    /// Tells the user what went wrong. Collaborator detail stays in the log.
    fn on_failure(&self, command: &CartCommand, error: &CartError, ctx: &CartContext) {
        let message = error.user_message(command);
        warn!(
            product_id = %command.product_id(),
            %error,
            user_message = message,
            "Cart command rejected"
        );
        ctx.notifier.error(message);
    }
}
