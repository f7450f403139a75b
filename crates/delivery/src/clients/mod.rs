//! Typed wrappers around the generic [`ResourceClient`](resource_store::ResourceClient)s.
//!
//! Each client exposes domain methods (`record_completed_order`, `availability`, ...) and
//! implements [`ActorClient`](resource_store::ActorClient) for the shared `get`, `delete`,
//! `query` and `subscribe`. Store errors are mapped into the collection's own error type;
//! a rejection raised by a document hook comes back as that hook's original error.

pub mod customer_client;
pub mod order_client;
pub mod shop_client;

pub use customer_client::CustomerClient;
pub use order_client::OrderClient;
pub use shop_client::ShopClient;
