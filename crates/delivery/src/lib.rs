//! # Delivery
//!
//! Core of a restaurant delivery back end: customers, shops and orders kept in in-memory
//! collections, plus the three rules the rest of the system is built around.
//!
//! - [`membership`]: loyalty tier from lifetime order count and spend.
//! - [`hours`]: live open/closed status from a shop's weekly schedule.
//! - [`geo`]: distance between a delivery address and a shop.
//!
//! These are pure functions. Around them:
//!
//! - [`model`]: the stored documents ([`Customer`](model::Customer), [`Shop`](model::Shop),
//!   [`Order`](model::Order)).
//! - [`customer_actor`], [`shop_actor`], [`order_actor`]: document behaviour inside the store.
//! - [`clients`]: typed clients for each collection.
//! - [`watch`]: projections kept current from live subscriptions and a timer.
//! - [`lifecycle`]: [`DeliverySystem`](lifecycle::DeliverySystem), which wires and stops
//!   everything.
//! - [`config`]: environment settings.

pub mod clients;
pub mod config;
pub mod customer_actor;
pub mod geo;
pub mod hours;
pub mod lifecycle;
pub mod membership;
pub mod model;
pub mod order_actor;
pub mod shop_actor;
pub mod watch;
