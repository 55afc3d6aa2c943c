//! Runtime orchestration and lifecycle management.
//!
//! - [`CartConfig`] - where the cart is stored and how the store is sized
//! - [`CartSystem`] - hydrates the cart, wires the services and runs the store
//!
//! Log output is configured with [`store_framework::tracing::setup_tracing`].

pub mod cart_system;
pub mod config;

pub use cart_system::*;
pub use config::*;
