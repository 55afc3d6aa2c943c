//! # Store Messages
//!
//! The request types exchanged between a [`StoreClient`](crate::StoreClient) and its
//! [`StoreActor`](crate::StoreActor).

use crate::error::FrameworkError;
use crate::state::StoreState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// There are only two things a caller can ask a store for: run a command, or hand back
/// the state as of this point in the queue. Reads that don't need queue ordering go
/// through the snapshot feed instead (see [`StoreClient::snapshot`](crate::StoreClient::snapshot)).
#[derive(Debug)]
pub enum StoreRequest<S: StoreState> {
    Dispatch {
        command: S::Command,
        respond_to: Response<S::Outcome>,
    },
    Get {
        respond_to: Response<S>,
    },
}
