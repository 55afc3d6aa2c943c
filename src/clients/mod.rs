//! Type-safe wrappers around [`StoreClient`](store_framework::StoreClient).

pub mod cart_client;

pub use cart_client::*;
