//! # Customer Actor
//!
//! Owns the customer collection: profiles, lifetime order statistics and the cached
//! membership tier.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_store::ActorEntity) implementation for [`Customer`]
//! - [`actions`] - [`CustomerAction`] and [`CustomerActionResult`]
//! - [`error`] - [`CustomerError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use delivery::customer_actor;
//! use delivery::model::CustomerCreate;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = customer_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_customer(CustomerCreate {
//!             name: "Ayse".to_string(),
//!             email: "ayse@example.com".to_string(),
//!         })
//!         .await?;
//!     let tier = client.record_completed_order(id, Decimal::from(40)).await?;
//!     println!("{id} is now {tier}");
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CustomerClient;
use crate::model::Customer;
use resource_store::ResourceActor;

/// Creates a new Customer actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Customer>, CustomerClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CustomerClient::new(generic_client))
}
