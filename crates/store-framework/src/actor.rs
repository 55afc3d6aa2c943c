//! # Store Actor
//!
//! This module defines the `StoreActor`, the "server" half of a store. It owns the one
//! live state value, processes requests sequentially, and publishes every committed
//! state on a `watch` channel so any number of readers can follow along.

use crate::client::StoreClient;
use crate::error::FrameworkError;
use crate::message::StoreRequest;
use crate::state::{StoreState, Transition};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// The actor that owns a single state value.
///
/// # Concurrency Model
/// Requests are handled one at a time, and a command keeps the actor busy until it has
/// committed or failed, including every `.await` inside [`StoreState::handle`]. Two
/// commands therefore never interleave: the second one always sees the state the first
/// one left behind. No `Mutex` is needed around the state because nothing else can
/// reach it.
///
/// # Usage Pattern
///
/// 1. **Create**: `StoreActor::new(initial, buffer)` returns the actor and a client.
/// 2. **Wire**: pass the dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a Tokio task.
///
/// ```rust
/// use store_framework::{StoreActor, StoreState, Transition};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug, Default)]
/// struct Counter(u32);
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("counter error")]
/// struct CounterError;
///
/// #[async_trait]
/// impl StoreState for Counter {
///     type Command = u32;
///     type Outcome = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     async fn handle(&self, by: &u32, _: &()) -> Result<Transition<Self, u32>, CounterError> {
///         let next = self.0 + by;
///         Ok(Transition::Commit { state: Counter(next), outcome: next })
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::new(Counter::default(), 10);
///     tokio::spawn(actor.run(()));
///
///     assert_eq!(client.dispatch(2).await.unwrap(), 2);
///     assert_eq!(client.snapshot().0, 2);
/// }
/// ```
pub struct StoreActor<S: StoreState> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: S,
    publisher: watch::Sender<S>,
}

impl<S: StoreState> StoreActor<S> {
    /// Creates a new `StoreActor` holding `initial`, and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `initial` - The state the store starts from. Subscribers see it immediately.
    /// * `buffer_size` - The capacity of the request channel. When it is full, callers
    ///   wait until there is space.
    pub fn new(initial: S, buffer_size: usize) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, snapshots) = watch::channel(initial.clone());
        let actor = Self {
            receiver,
            state: initial,
            publisher,
        };
        let client = StoreClient::new(sender, snapshots);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every hook of the state. It is supplied here rather than
    /// in `new()` so that the services it holds can be built after the client exists.
    pub async fn run(mut self, context: S::Context) {
        // Extract just the type name (e.g., "Cart" instead of "cart_recipe::model::cart::Cart")
        let state_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(state_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Dispatch {
                    command,
                    respond_to,
                } => {
                    debug!(state_type, ?command, "Dispatch");
                    let result = self.apply(&command, &context).await;
                    match &result {
                        Ok(outcome) => {
                            debug!(state_type, ?outcome, "Dispatch ok");
                        }
                        Err(e) => {
                            debug!(state_type, ?command, error = %e, "Dispatch failed");
                            self.state.on_failure(&command, e, &context);
                        }
                    }
                    let _ = respond_to.send(
                        result.map_err(|e| FrameworkError::StateError(Box::new(e))),
                    );
                }
                StoreRequest::Get { respond_to } => {
                    debug!(state_type, "Get");
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
            }
        }

        info!(state_type, "Shutdown");
    }

    async fn apply(
        &mut self,
        command: &S::Command,
        context: &S::Context,
    ) -> Result<S::Outcome, S::Error> {
        match self.state.handle(command, context).await? {
            Transition::Commit { state, outcome } => {
                state.on_commit(context)?;
                self.state = state;
                self.publisher.send_replace(self.state.clone());
                info!(receivers = self.publisher.receiver_count(), "Committed");
                self.state.on_committed(command, context);
                Ok(outcome)
            }
            Transition::Keep { outcome } => Ok(outcome),
        }
    }
}
