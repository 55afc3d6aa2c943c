//! # Store Client
//!
//! This module defines the client half of a store.

use crate::error::FrameworkError;
use crate::message::StoreRequest;
use crate::state::StoreState;
use tokio::sync::{mpsc, oneshot, watch};

/// ## StoreClient
///
/// The `StoreClient<S>` provides a type-safe, async API for talking to a `StoreActor<S>`.
/// Commands go over a Tokio mpsc channel and come back through oneshot channels;
/// committed states arrive on a `watch` channel that every clone shares.
///
/// * **Cloneable** – holds only a sender and a watch receiver.
/// * **Two read paths** – [`get`](Self::get) is queued behind pending commands,
///   [`snapshot`](Self::snapshot) returns the last published state without waiting.
#[derive(Clone)]
pub struct StoreClient<S: StoreState> {
    sender: mpsc::Sender<StoreRequest<S>>,
    snapshots: watch::Receiver<S>,
}

impl<S: StoreState> StoreClient<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>, snapshots: watch::Receiver<S>) -> Self {
        Self { sender, snapshots }
    }

    pub async fn dispatch(&self, command: S::Command) -> Result<S::Outcome, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Dispatch {
                command,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self) -> Result<S, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// The most recently published state.
    pub fn snapshot(&self) -> S {
        self.snapshots.borrow().clone()
    }

    /// A fresh receiver on the change feed. Use `changed().await` to wait for the
    /// next committed state.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.snapshots.clone()
    }
}
