//! Custom actions for the Shop actor. Both are read-only.

use crate::hours::ShopAvailability;
use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub enum ShopAction {
    /// Live open/closed status at local time `now`.
    Availability { now: NaiveDateTime },
    /// Whether the shop opens on any day of the week.
    HasOpenHours,
}

/// Results from ShopActions - variants match 1:1 with ShopAction
#[derive(Debug, Clone, PartialEq)]
pub enum ShopActionResult {
    Availability(ShopAvailability),
    HasOpenHours(bool),
}
