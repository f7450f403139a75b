//! Documents stored by the delivery collections.
//!
//! Each type here is managed by a [`ResourceActor`](resource_store::ResourceActor); the
//! [`ActorEntity`](resource_store::ActorEntity) implementations live in the matching
//! `*_actor` module.

pub mod customer;
pub mod order;
pub mod shop;

pub use customer::*;
pub use order::*;
pub use shop::*;
