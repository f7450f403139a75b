//! # Shop Actor
//!
//! Owns the shop collection: names, locations and weekly working hours.
//!
//! Hours are validated on write and evaluated on read. Both custom actions are read-only, so
//! they never wake subscribers; a shop's live status changes with time, which is the job of
//! [`ShopStatusWatcher`](crate::watch::ShopStatusWatcher).
//!
//! - [`entity`] - [`ActorEntity`](resource_store::ActorEntity) implementation for [`Shop`]
//! - [`actions`] - [`ShopAction`] and [`ShopActionResult`]
//! - [`error`] - [`ShopError`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ShopClient;
use crate::model::Shop;
use resource_store::ResourceActor;

/// Creates a new Shop actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Shop>, ShopClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ShopClient::new(generic_client))
}
