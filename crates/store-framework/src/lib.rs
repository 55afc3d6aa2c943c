//! # Store Framework
//!
//! This crate provides the building blocks for keeping a single piece of application
//! state behind an actor: one task owns the value, every change goes through a command,
//! and every committed value is broadcast to whoever is watching.
//!
//! ## Why an Actor for One Value?
//!
//! UI-facing state (a shopping cart, a session, a preferences blob) usually has:
//!
//! - one logical writer that must validate changes against outside services,
//! - many readers that only want "the current value, and tell me when it changes",
//! - a durable mirror that has to stay in step with memory.
//!
//! Putting the value inside an actor gives all three without locks:
//!
//! - **Serialized commands**: the actor handles one request at a time, including the
//!   `.await`s a command makes, so no two commands ever interleave.
//! - **Commit before publish**: the durable write happens on the candidate value; the
//!   live value only changes once that write succeeded.
//! - **Change feed**: committed values go out on a `tokio::sync::watch` channel. Readers
//!   never block the writer.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **State Layer** ([`StoreState`]) - your value and the rules for changing it
//! 2. **Runtime Layer** ([`StoreActor`]) - the request loop, commit ordering, publishing
//! 3. **Interface Layer** ([`StoreClient`], [`StoreHandle`]) - type-safe access for callers
//!
//! ## Example
//!
//! ```rust
//! use store_framework::{StoreActor, StoreState, Transition};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, Default)]
//! struct Votes {
//!     yes: u32,
//!     no: u32,
//! }
//!
//! #[derive(Debug)]
//! enum Ballot {
//!     Yes,
//!     No,
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("voting is closed")]
//! struct Closed;
//!
//! #[async_trait]
//! impl StoreState for Votes {
//!     type Command = Ballot;
//!     type Outcome = u32;
//!     type Context = ();
//!     type Error = Closed;
//!
//!     async fn handle(&self, ballot: &Ballot, _: &()) -> Result<Transition<Self, u32>, Closed> {
//!         let mut next = self.clone();
//!         match ballot {
//!             Ballot::Yes => next.yes += 1,
//!             Ballot::No => next.no += 1,
//!         }
//!         let total = next.yes + next.no;
//!         Ok(Transition::Commit { state: next, outcome: total })
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::new(Votes::default(), 10);
//!     tokio::spawn(actor.run(()));
//!
//!     let mut feed = client.subscribe();
//!     client.dispatch(Ballot::Yes).await.unwrap();
//!
//!     feed.changed().await.unwrap();
//!     assert_eq!(feed.borrow().yes, 1);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a `StoreClient` from a queue of expectations, for testing
//! client wrappers without running any state logic. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod error;
pub mod handle;
pub mod message;
pub mod mock;
pub mod state;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::StoreClient;
pub use error::FrameworkError;
pub use handle::StoreHandle;
pub use message::{Response, StoreRequest};
pub use state::{StoreState, Transition};
