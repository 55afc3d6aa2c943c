use crate::cart_actor::{CartChange, CartCommand, CartError};
use crate::model::{Cart, ProductId};
use async_trait::async_trait;
use store_framework::{FrameworkError, StoreClient, StoreHandle};
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
///
/// Cheap to clone; every clone talks to the same store. Reads come from
/// [`StoreHandle`]: `cart()` for the latest published cart, `get()` for a cart ordered
/// after every queued command, `subscribe()` to follow changes.
///
/// Failed commands have already been reported to the user through the
/// [`Notifier`](crate::services::Notifier) by the time the error comes back here.
#[derive(Clone)]
pub struct CartClient {
    inner: StoreClient<Cart>,
}

impl CartClient {
    pub fn new(inner: StoreClient<Cart>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<CartChange, CartError> {
        debug!("Sending request");
        self.send(CartCommand::AddProduct(product_id)).await
    }

    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<CartChange, CartError> {
        debug!("Sending request");
        self.send(CartCommand::RemoveProduct(product_id)).await
    }

    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<CartChange, CartError> {
        debug!("Sending request");
        self.send(CartCommand::UpdateProductAmount { product_id, amount })
            .await
    }

    /// The latest published cart.
    pub fn cart(&self) -> Cart {
        self.snapshot()
    }

    async fn send(&self, command: CartCommand) -> Result<CartChange, CartError> {
        self.inner.dispatch(command).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl StoreHandle<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &StoreClient<Cart> {
        &self.inner
    }

    /// Recovers the [`CartError`] a command failed with; anything else means the store
    /// itself is unreachable.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::StateError(inner) => match inner.downcast::<CartError>() {
                Ok(cart_error) => *cart_error,
                Err(other) => CartError::ActorCommunicationError(other.to_string()),
            },
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}
