//! Cart store logic: commands, errors and the [`StoreState`](store_framework::StoreState)
//! implementation for [`Cart`].

mod commands;
pub mod entity;
pub mod error;

pub use commands::*;
pub use entity::CartContext;
pub use error::*;

use crate::clients::CartClient;
use crate::model::Cart;
use store_framework::StoreActor;

/// Request channel capacity used when none is configured.
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Creates a new Cart actor holding `initial`, and its client.
pub fn new(initial: Cart, buffer_size: usize) -> (StoreActor<Cart>, CartClient) {
    let (actor, generic_client) = StoreActor::new(initial, buffer_size);
    let client = CartClient::new(generic_client);

    (actor, client)
}
