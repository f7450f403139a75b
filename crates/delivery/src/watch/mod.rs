//! # Live Projections
//!
//! Watchers turn document subscriptions into derived values that stay current on their own:
//!
//! - [`ShopStatusWatcher`] re-evaluates a shop's open/closed status when the shop document
//!   changes and on a fixed timer, since the status also changes with the time of day.
//! - [`ProfileWatcher`] recomputes a customer's tier and progress from every customer
//!   snapshot, ignoring the cached tier.
//!
//! Each watcher owns one subscription and one spawned task and publishes on a
//! `tokio::sync::watch` channel. Consumers are woken only when the derived value actually
//! changes. Dropping a watcher stops its task and releases the subscription.
//!
//! [`ShopCard`] is the one-shot counterpart for listings: availability plus distance for a
//! single render.

pub mod clock;
pub mod profile;
pub mod shop_card;
pub mod shop_status;

pub use clock::{Clock, ManualClock, SystemClock};
pub use profile::{ProfileSummary, ProfileWatcher};
pub use shop_card::ShopCard;
pub use shop_status::ShopStatusWatcher;
