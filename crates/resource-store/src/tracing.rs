//! # Observability
//!
//! Structured logging for every collection and for the processes built on top of them.
//!
//! The actor loop emits one event per request with an `entity_type` field (`Customer`,
//! `Shop`, …), so the module path is hidden from output (`with_target(false)`).
//!
//! ```bash
//! # lifecycle events only
//! RUST_LOG=info cargo run
//!
//! # request payloads and subscription churn
//! RUST_LOG=debug cargo run
//!
//! # one crate only
//! RUST_LOG=delivery=debug cargo run
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global compact subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Call once, from a binary's `main`.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
