use crate::cart_actor::{self, CartContext, CartError};
use crate::clients::CartClient;
use crate::lifecycle::CartConfig;
use crate::model::Cart;
use crate::services::{InventoryApi, KeyValueStore, Notifier, ProductCatalog, StockService};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{error, info};

/// The outside services a cart store is wired to.
#[derive(Clone)]
pub struct CartServices {
    pub stock: Arc<dyn StockService>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub storage: Arc<dyn KeyValueStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl CartServices {
    /// Uses one [`InventoryApi`] for both stock and catalog lookups.
    pub fn from_inventory(
        inventory: Arc<InventoryApi>,
        storage: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            stock: inventory.clone(),
            catalog: inventory,
            storage,
            notifier,
        }
    }
}

/// Runs the cart store for one application session.
///
/// # Example
///
/// ```ignore
/// let system = CartSystem::start(&CartConfig::from_env()?, services)?;
///
/// system.cart_client.add_product(ProductId(1)).await?;
/// let cart = system.cart_client.cart();
///
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    /// Client for interacting with the Cart actor
    pub cart_client: CartClient,

    /// Task handle of the running actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl CartSystem {
    /// Hydrates the cart from storage and spawns the store.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// [`CartError::Storage`] if the stored cart could not be read. Text that is stored
    /// but unreadable is not an error; the store starts empty.
    pub fn start(config: &CartConfig, services: CartServices) -> Result<Self, CartError> {
        let initial = Cart::load(services.storage.as_ref(), &config.storage_key)?;
        info!(
            key = %config.storage_key,
            size = initial.len(),
            "Hydrated cart"
        );

        let (actor, cart_client) = cart_actor::new(initial, config.buffer_size);
        let context = CartContext {
            stock: services.stock,
            catalog: services.catalog,
            storage: services.storage,
            notifier: services.notifier,
            storage_key: config.storage_key.clone(),
        };
        let handle = tokio::spawn(actor.run(context));

        Ok(Self {
            cart_client,
            handle,
        })
    }

    /// Gracefully shuts down the store.
    ///
    /// Drops the system's client and waits for the actor to drain its queue. Clones of
    /// the client handed out earlier keep the store alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down cart store...");
        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Cart actor task failed: {:?}", e);
            return Err(e);
        }

        info!("Cart store shutdown complete.");
        Ok(())
    }
}
