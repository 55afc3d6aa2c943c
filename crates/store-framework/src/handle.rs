//! # StoreHandle Trait
//!
//! Provides a common interface for domain-specific store clients, adding default read
//! methods built on top of a generic `StoreClient`.
use crate::{FrameworkError, StoreClient, StoreState};
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for domain clients to inherit the read side of a store.
///
/// A wrapper only has to expose its inner client and say how framework errors map onto
/// its own error type; `get`, `snapshot` and `subscribe` come for free.
///
/// # Example
///
/// ```rust
/// use store_framework::{FrameworkError, StoreClient, StoreHandle, StoreState, Transition};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug, Default)]
/// struct Tally(u32);
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct TallyError(String);
///
/// #[async_trait]
/// impl StoreState for Tally {
///     type Command = ();
///     type Outcome = ();
///     type Context = ();
///     type Error = TallyError;
///
///     async fn handle(&self, _: &(), _: &()) -> Result<Transition<Self, ()>, TallyError> {
///         Ok(Transition::Commit { state: Tally(self.0 + 1), outcome: () })
///     }
/// }
///
/// struct TallyClient {
///     inner: StoreClient<Tally>,
/// }
///
/// #[async_trait]
/// impl StoreHandle<Tally> for TallyClient {
///     type Error = TallyError;
///
///     fn inner(&self) -> &StoreClient<Tally> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         TallyError(e.to_string())
///     }
/// }
///
/// async fn usage(client: TallyClient) {
///     // get(), snapshot() and subscribe() are provided automatically!
///     let _ = client.get().await;
///     let _ = client.snapshot();
/// }
/// ```
#[async_trait]
pub trait StoreHandle<S: StoreState>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<S>;

    /// Map framework errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch the state, ordered after every command already queued.
    #[tracing::instrument(skip(self))]
    async fn get(&self) -> Result<S, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get().await.map_err(Self::map_error)
    }

    /// The last published state.
    fn snapshot(&self) -> S {
        self.inner().snapshot()
    }

    /// Follow committed states as they are published.
    fn subscribe(&self) -> watch::Receiver<S> {
        self.inner().subscribe()
    }
}
