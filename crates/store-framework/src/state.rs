//! # StoreState Trait
//!
//! The `StoreState` trait is the contract a piece of application state implements to be
//! owned by a [`StoreActor`](crate::StoreActor). The actor keeps exactly one value of the
//! state, feeds it commands one at a time, and only ever replaces it with a value the
//! state itself produced.
//!
//! # Command Lifecycle
//!
//! Every command goes through the same steps inside a single actor turn:
//!
//! 1. [`StoreState::handle`] computes a [`Transition`] from the current state. It may
//!    await external collaborators (found in the `Context`). It receives `&self`, so it
//!    cannot mutate the live state.
//! 2. On [`Transition::Commit`], [`StoreState::on_commit`] runs on the *candidate* state.
//!    This is where a durable copy gets written.
//! 3. Only if the commit hook succeeds does the candidate become the live state and get
//!    published to subscribers, followed by [`StoreState::on_committed`].
//! 4. If any step fails, [`StoreState::on_failure`] runs on the untouched live state.
//!
//! # Provided Methods (Hooks)
//! `on_commit`, `on_committed` and `on_failure` have default implementations that do
//! nothing. Override them when the state has side effects to perform.

use async_trait::async_trait;
use std::fmt::Debug;

/// The result of handling a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<S, O> {
    /// Replace the current state with `state` and reply with `outcome`.
    Commit { state: S, outcome: O },
    /// Leave the current state as it is and reply with `outcome`.
    Keep { outcome: O },
}

/// Trait that any state value must implement to be managed by a `StoreActor`.
///
/// # Async & Context
/// `handle` is async so a command can consult other services before deciding.
/// The `Context` type carries those services and is injected when the actor is started
/// (`actor.run(context)`), not when it is constructed.
#[async_trait]
pub trait StoreState: Clone + Send + Sync + 'static {
    /// The commands this state understands (e.g., `AddProduct`).
    type Command: Send + Sync + Debug;

    /// The value returned to the caller when a command succeeds.
    type Outcome: Send + Sync + Debug;

    /// The runtime dependencies injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this state.
    ///
    /// One enum covers every command. Callers match on the variant they care about.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decide what a command does to the current state.
    async fn handle(
        &self,
        command: &Self::Command,
        ctx: &Self::Context,
    ) -> Result<Transition<Self, Self::Outcome>, Self::Error>;

    /// Called on the candidate state before it replaces the live one.
    /// Returning an error aborts the command and leaves the live state untouched.
    fn on_commit(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called on the new live state after it has been published.
    fn on_committed(&self, _command: &Self::Command, _ctx: &Self::Context) {}

    /// Called on the live state when `handle` or `on_commit` failed.
    fn on_failure(&self, _command: &Self::Command, _error: &Self::Error, _ctx: &Self::Context) {}
}
