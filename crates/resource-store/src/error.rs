//! # Store Errors

/// Errors raised by the store itself rather than by a document's own validation.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    /// The actor's request channel is closed; the collection has shut down.
    #[error("Actor closed")]
    ActorClosed,
    /// The actor accepted the request but dropped the reply.
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    /// The collection stopped publishing snapshots to this subscription.
    #[error("Subscription closed")]
    SubscriptionClosed,
    /// A document hook rejected the request.
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
