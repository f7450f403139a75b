//! # ActorEntity
//!
//! The contract a document type signs to be stored by a [`ResourceActor`](crate::ResourceActor).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored document must implement.
///
/// The associated types pin down, per document type, which payload creates it, which payload
/// updates it, and which custom actions it answers. A customer collection cannot be sent a
/// shop payload; the compiler rejects it.
///
/// # Context
/// Hooks receive a `Context` injected when the actor is started with `run(context)`. Documents
/// that need to call other collections (an order looking up its customer) receive those
/// clients here instead of at construction time.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Document identifier. Generated by the actor from a `u32` counter; `Ord` keeps query
    /// results and subscription snapshots in creation order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a document.
    type Create: Send + Sync + Debug;

    /// Payload applied by an update.
    type Update: Send + Sync + Debug;

    /// Document-specific operations.
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` when there are none.
    type Context: Send + Sync;

    /// One error enum for the whole document type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the document from its freshly generated ID and the create payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether `action` can change the document.
    ///
    /// Subscribers are only re-notified after mutating actions. Read-only actions should
    /// return `false`.
    fn action_mutates(_action: &Self::Action) -> bool {
        true
    }

    /// Runs after `from_create_params`, before the document is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before the document is removed. Returning an error keeps it.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
