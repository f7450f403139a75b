//! # Resource Store
//!
//! An in-memory document store built from actors. Every document collection is owned by one
//! [`ResourceActor`] running in its own Tokio task; callers talk to it through a cloneable
//! [`ResourceClient`].
//!
//! ## What a collection supports
//!
//! - **CRUD**: `create`, `get`, `update`, `delete`.
//! - **Actions**: document-specific operations declared by the [`ActorEntity`] implementation
//!   (e.g. "record a completed order" on a customer).
//! - **Queries**: `query(filter)` returns a snapshot of every document matching a [`Filter`].
//! - **Live subscriptions**: `subscribe(filter)` returns a [`Subscription`] that holds the
//!   current matching snapshot and is re-delivered a fresh one after every change to a document
//!   it matches (before or after the change).
//!
//! ## Concurrency Model
//!
//! Each actor processes its requests sequentially, so the store needs no locks. Subscriptions
//! are backed by `tokio::sync::watch` channels: a slow consumer only ever sees the latest
//! snapshot, never a backlog. Dropping a [`Subscription`] releases it; the actor prunes
//! released subscribers on its next broadcast.
//!
//! ## Observability
//!
//! The actor loop logs lifecycle events with `tracing` using an `entity_type` field. Call
//! [`tracing::setup_tracing`] once from a binary to install a compact, `RUST_LOG`-filtered
//! subscriber.
//!
//! ## Testing
//!
//! See [`mock`] for [`MockClient`](mock::MockClient), which answers requests from a queue of
//! expectations instead of a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod subscription;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
pub use subscription::Subscription;
