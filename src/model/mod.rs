//! Pure data structures: catalog records and the cart value managed by the
//! [`StoreActor`](store_framework::StoreActor).

pub mod cart;
pub mod product;

pub use cart::*;
pub use product::*;
