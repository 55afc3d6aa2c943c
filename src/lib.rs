#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Cart Recipe
//!
//! > **Shopping-cart state for a storefront, kept behind an actor.**
//!
//! The cart is one value with one writer and many readers. Consumers add products,
//! remove them and change quantities; every change is checked against a stock service,
//! written to a durable key-value store, and only then published to everyone watching.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One Owner, Many Readers
//! The [`Cart`](model::Cart) lives inside a [`StoreActor`](store_framework::StoreActor).
//! Commands are processed one at a time, including the stock and catalog lookups they
//! await, so two clicks on "add" can never both read the same old amount.
//! Readers get snapshots from a `tokio::sync::watch` channel and never block the writer.
//!
//! ### Persist, Then Publish
//! A command builds a *candidate* cart. The candidate is written to storage first; if the
//! write fails the live cart is untouched and the user is told the operation failed.
//! Memory and storage therefore never disagree about a committed change.
//!
//! ### Explicit Failures
//! Each operation returns `Result<CartChange, CartError>`. The user-facing message is
//! sent through the [`Notifier`](services::Notifier) inside the store, so a caller that
//! ignores the result still leaves the user informed.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! - **Key items**: [`Cart`](model::Cart), [`LineItem`](model::LineItem),
//!   [`Product`](model::Product).
//! - Hydration from stored text is the pure function [`Cart::hydrate`](model::Cart::hydrate).
//!
//! ### 2. The Rules ([`cart_actor`])
//! - **Role**: the [`StoreState`](store_framework::StoreState) implementation deciding
//!   what each [`CartCommand`](cart_actor::CartCommand) does.
//!
//! ### 3. The Interface ([`clients`])
//! - **Key items**: [`CartClient`](clients::CartClient).
//!
//! ### 4. The Outside World ([`services`])
//! - Stock, catalog, storage and notification traits, with in-process implementations
//!   and test doubles.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! - **Key items**: [`CartConfig`](lifecycle::CartConfig),
//!   [`CartSystem`](lifecycle::CartSystem).
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use cart_recipe::lifecycle::{CartConfig, CartServices, CartSystem};
//! use cart_recipe::model::{Product, ProductId, Stock};
//! use cart_recipe::services::{InventoryApi, MemoryStore, TracingNotifier};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let inventory = Arc::new(InventoryApi::new(
//!         vec![Product::new(1, "Tênis de Caminhada", 179.9, "https://cdn.example/1.jpg")],
//!         vec![Stock { id: ProductId(1), amount: 5 }],
//!     ));
//!     let services = CartServices::from_inventory(
//!         inventory,
//!         Arc::new(MemoryStore::new()),
//!         Arc::new(TracingNotifier),
//!     );
//!
//!     let system = CartSystem::start(&CartConfig::default(), services).unwrap();
//!     system.cart_client.add_product(ProductId(1)).await.unwrap();
//!     assert_eq!(system.cart_client.cart().amount_of(ProductId(1)), 1);
//!
//!     system.shutdown().await.unwrap();
//! }
//! ```
//!
//! ### Running the Demo
//!
//! ```bash
//! # Run with info logs
//! RUST_LOG=info cargo run
//!
//! # Keep the cart between runs
//! CART_STORAGE_DIR=/tmp/cart RUST_LOG=info cargo run
//! ```

pub mod cart_actor;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod services;
