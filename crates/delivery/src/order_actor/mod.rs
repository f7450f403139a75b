//! # Order Actor
//!
//! Owns the order collection. Its context is the customer and shop clients, wired in by
//! [`DeliverySystem`](crate::lifecycle::DeliverySystem):
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new(32);
//! tokio::spawn(order_actor.run((customer_client.clone(), shop_client.clone())));
//! ```
//!
//! A placed order either gets delivered, which bumps the customer's lifetime statistics and
//! may promote their tier, or cancelled. Both are final.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use resource_store::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
