//! # Framework Errors
//!
//! Errors raised by the store plumbing itself. Domain failures produced by a
//! [`StoreState`](crate::StoreState) travel inside [`FrameworkError::StateError`]
//! and can be recovered with `downcast`.

/// Errors that can occur within the store framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("State error: {0}")]
    StateError(Box<dyn std::error::Error + Send + Sync>),
}
