//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for anything built on this crate.
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: `Store started` and `Shutdown` with the state type name
//! - **Commands**: `Committed` at info level; `Dispatch`, `Dispatch ok` and `Dispatch failed`
//!   at debug level. Reporting a failure to users is left to the state's `on_failure` hook.
//! - **Reads**: `Get` requests at debug level
//!
//! ## Usage Examples
//!
//! ```bash
//! # Commits and lifecycle
//! RUST_LOG=info cargo run
//!
//! # Full command payloads
//! RUST_LOG=debug cargo run
//!
//! # Only the framework
//! RUST_LOG=store_framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a failed command looks like:
//!
//! ```text
//! DEBUG Dispatch failed state_type="Cart" command=RemoveProduct(ProductId(9)) error=Not in cart: product_9
//! ```

/// Initializes the tracing subscriber for the application.
///
/// - **Environment-based filtering** via `RUST_LOG`
/// - **Compact format** that shows spans inline (e.g., `add_product:Dispatch`)
/// - Module paths hidden, the `state_type` field identifies the store instead
///
/// Call it once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
