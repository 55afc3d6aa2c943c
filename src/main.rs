//! # Cart Recipe Demo
//!
//! Runs a short shopping session against the bundled inventory fixture:
//!
//! 1. Add the same sneaker twice, then ask for more than the stock allows.
//! 2. Add a product the catalog does not know.
//! 3. Remove a line and print what is left.
//!
//! Set `CART_STORAGE_DIR` to keep the cart between runs; the next run starts from it.

use cart_recipe::lifecycle::{CartConfig, CartServices, CartSystem};
use cart_recipe::model::ProductId;
use cart_recipe::services::{InventoryApi, TracingNotifier};
use std::sync::Arc;
use store_framework::tracing::setup_tracing;
use store_framework::StoreHandle;
use tracing::{info, warn, Instrument};

const INVENTORY: &str = include_str!("../fixtures/inventory.json");

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = CartConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting cart demo");

    let inventory = Arc::new(InventoryApi::from_json(INVENTORY).map_err(|e| e.to_string())?);
    let storage = config.open_storage().map_err(|e| e.to_string())?;
    let services = CartServices::from_inventory(inventory, storage, Arc::new(TracingNotifier));

    let system = CartSystem::start(&config, services).map_err(|e| e.to_string())?;
    let cart = system.cart_client.clone();

    // Print every committed cart as it is published
    let mut feed = cart.subscribe();
    let watcher = tokio::spawn(async move {
        while feed.changed().await.is_ok() {
            let snapshot = feed.borrow_and_update().clone();
            info!(
                lines = snapshot.len(),
                items = snapshot.total_items(),
                subtotal = snapshot.subtotal(),
                "Cart changed"
            );
        }
    });

    let sneaker = ProductId(2);
    async {
        for _ in 0..2 {
            if let Err(e) = cart.add_product(sneaker).await {
                warn!(error = %e, "Add failed");
            }
        }
        if let Err(e) = cart.update_product_amount(sneaker, 10).await {
            warn!(error = %e, "Update failed");
        }
        info!(amount = cart.cart().amount_of(sneaker), "After update");
    }
    .instrument(tracing::info_span!("stock_limits"))
    .await;

    async {
        if let Err(e) = cart.add_product(ProductId(4)).await {
            warn!(error = %e, "Add failed");
        }
    }
    .instrument(tracing::info_span!("unknown_product"))
    .await;

    async {
        if let Err(e) = cart.remove_product(sneaker).await {
            warn!(error = %e, "Remove failed");
        }
    }
    .instrument(tracing::info_span!("removal"))
    .await;

    for item in &cart.cart() {
        info!(
            product_id = %item.id(),
            title = %item.product.title,
            amount = item.amount,
            "Remaining line"
        );
    }

    drop(cart);
    system.shutdown().await.map_err(|e| e.to_string())?;
    // The feed closes once the actor is gone
    let _ = watcher.await;

    Ok(())
}
