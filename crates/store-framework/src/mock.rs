//! # Mock Framework & Testing Guide
//!
//! The `MockClient<S>` type hands out a real `StoreClient<S>` whose requests are answered
//! from a queue of expectations instead of by a running `StoreActor`. It lets you test the
//! code *around* a store client (domain wrappers, error mapping, UI glue) without running
//! any state logic.
//!
//! ## When to use Mocks vs a Real Store
//!
//! | Feature | MockClient | Real StoreActor |
//! |---------|------------|-----------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Depends on the injected context |
//! | **State** | Whatever you `publish` | Real state transitions |
//! | **Use Case** | Testing client wrappers | Testing the state logic itself |
//! | **Error Injection** | Easy (`return_err`) | Requires failing collaborators |
//!
//! ## Pattern 0: Client Logic Test (Pure Mock)
//!
//! ```rust
//! use store_framework::mock::MockClient;
//! use store_framework::{FrameworkError, StoreState, Transition};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Tally(u32);
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("tally error")]
//! struct TallyError;
//!
//! #[async_trait]
//! impl StoreState for Tally {
//!     type Command = u32;
//!     type Outcome = u32;
//!     type Context = ();
//!     type Error = TallyError;
//!     async fn handle(&self, by: &u32, _: &()) -> Result<Transition<Self, u32>, TallyError> {
//!         Ok(Transition::Commit { state: Tally(self.0 + by), outcome: self.0 + by })
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::new(Tally::default());
//!     mock.expect_dispatch().return_ok(7);
//!     mock.expect_dispatch().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.dispatch(7).await.unwrap(), 7);
//!     assert!(matches!(client.dispatch(1).await, Err(FrameworkError::ActorClosed)));
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and a raw receiver, or use the fluent
//! [`MockClient`] API.

use crate::client::StoreClient;
use crate::error::FrameworkError;
use crate::message::StoreRequest;
use crate::state::StoreState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
enum Expectation<S: StoreState> {
    Dispatch {
        response: Result<S::Outcome, FrameworkError>,
    },
    Get {
        response: Result<S, FrameworkError>,
    },
}

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::new(Cart::default());
/// mock.expect_dispatch().return_ok(CartChange::Applied);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<S: StoreState> {
    client: StoreClient<S>,
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
    dispatched: Arc<Mutex<Vec<S::Command>>>,
    publisher: watch::Sender<S>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: StoreState> MockClient<S> {
    /// Creates a new mock client with no expectations, publishing `initial`.
    pub fn new(initial: S) -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<S>>(100);
        let (publisher, snapshots) = watch::channel(initial);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();
        let dispatched = Arc::new(Mutex::new(Vec::new()));
        let dispatched_clone = dispatched.clone();

        // Spawn background task to answer requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut exps = expectations_clone.lock().unwrap();
                let expectation = exps.pop_front();
                drop(exps);

                match (request, expectation) {
                    (
                        StoreRequest::Dispatch {
                            command,
                            respond_to,
                        },
                        Some(Expectation::Dispatch { response }),
                    ) => {
                        dispatched_clone.lock().unwrap().push(command);
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Get { respond_to }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender, snapshots),
            expectations,
            dispatched,
            publisher,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<S> {
        self.client.clone()
    }

    /// Expects a `dispatch` operation.
    pub fn expect_dispatch(&mut self) -> DispatchExpectationBuilder<S> {
        DispatchExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self) -> GetExpectationBuilder<S> {
        GetExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Pushes a state onto the change feed, as a real store does after a commit.
    pub fn publish(&self, state: S) {
        self.publisher.send_replace(state);
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<S: StoreState> MockClient<S>
where
    S::Command: Clone,
{
    /// The commands received so far, in arrival order.
    pub fn dispatched(&self) -> Vec<S::Command> {
        self.dispatched.lock().unwrap().clone()
    }
}

/// Builder for `dispatch` expectations.
pub struct DispatchExpectationBuilder<S: StoreState> {
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
}

impl<S: StoreState> DispatchExpectationBuilder<S> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, outcome: S::Outcome) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Dispatch {
            response: Ok(outcome),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Dispatch {
            response: Err(error),
        });
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<S: StoreState> {
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
}

impl<S: StoreState> GetExpectationBuilder<S> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, state: S) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get { response: Ok(state) });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            response: Err(error),
        });
    }
}

// =============================================================================
// RAW HELPERS
// =============================================================================

/// Creates a client and a receiver for asserting requests by hand.
///
/// # Testing Strategy
/// The client sends messages to a channel the test controls (`receiver`). The test then
/// pulls each request off the channel, inspects it, and answers through its responder.
/// This allows simulating success, failure and delays deterministically.
///
/// The snapshot feed of the returned client stays at `initial`.
///
/// **Note**: Consider using [`MockClient`] for a more fluent API.
pub fn create_mock_client<S: StoreState>(
    buffer_size: usize,
    initial: S,
) -> (StoreClient<S>, mpsc::Receiver<StoreRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_publisher, snapshots) = watch::channel(initial);
    (StoreClient::new(sender, snapshots), receiver)
}

/// Helper to verify that the next message is a Dispatch request
pub async fn expect_dispatch<S: StoreState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<(S::Command, oneshot::Sender<Result<S::Outcome, FrameworkError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Dispatch {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<S: StoreState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<oneshot::Sender<Result<S, FrameworkError>>> {
    match receiver.recv().await {
        Some(StoreRequest::Get { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Transition;
    use async_trait::async_trait;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Playlist {
        tracks: Vec<String>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum PlaylistCommand {
        Append(String),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Playlist error")]
    struct PlaylistError;

    #[async_trait]
    impl StoreState for Playlist {
        type Command = PlaylistCommand;
        type Outcome = usize;
        type Context = ();
        type Error = PlaylistError;

        async fn handle(
            &self,
            command: &PlaylistCommand,
            _ctx: &(),
        ) -> Result<Transition<Self, usize>, PlaylistError> {
            let PlaylistCommand::Append(track) = command;
            let mut next = self.clone();
            next.tracks.push(track.clone());
            let len = next.tracks.len();
            Ok(Transition::Commit {
                state: next,
                outcome: len,
            })
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Playlist>(10, Playlist::default());

        let dispatch_task = tokio::spawn(async move {
            client
                .dispatch(PlaylistCommand::Append("intro".to_string()))
                .await
        });

        let (command, responder) = expect_dispatch(&mut receiver)
            .await
            .expect("Expected Dispatch request");
        assert_eq!(command, PlaylistCommand::Append("intro".to_string()));
        responder.send(Ok(1)).unwrap();

        let result = dispatch_task.await.unwrap();
        assert!(matches!(result, Ok(1)));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::new(Playlist::default());

        mock.expect_dispatch().return_ok(1);
        mock.expect_get().return_ok(Playlist {
            tracks: vec!["intro".to_string()],
        });

        let client = mock.client();

        let len = client
            .dispatch(PlaylistCommand::Append("intro".to_string()))
            .await
            .unwrap();
        assert_eq!(len, 1);

        let fetched = client.get().await.unwrap();
        assert_eq!(fetched.tracks, vec!["intro".to_string()]);

        assert_eq!(
            mock.dispatched(),
            vec![PlaylistCommand::Append("intro".to_string())]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_publish_reaches_subscribers() {
        let mock = MockClient::new(Playlist::default());
        let client = mock.client();
        let mut feed = client.subscribe();

        mock.publish(Playlist {
            tracks: vec!["outro".to_string()],
        });

        feed.changed().await.unwrap();
        assert_eq!(feed.borrow().tracks, vec!["outro".to_string()]);
        assert_eq!(client.snapshot().tracks, vec!["outro".to_string()]);
    }

    #[tokio::test]
    async fn test_raw_get_helper() {
        let (client, mut receiver) = create_mock_client::<Playlist>(10, Playlist::default());

        let get_task = tokio::spawn(async move { client.get().await });

        let responder = expect_get(&mut receiver).await.expect("Expected Get request");
        responder.send(Err(FrameworkError::ActorDropped)).unwrap();

        let result = get_task.await.unwrap();
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
