use crate::geo::GeoPoint;
use crate::membership::{compute_tier, Tier, TierProgress};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub u32);

impl From<u32> for CustomerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "customer_{}", self.0)
    }
}

/// A delivery address. Replaced as a whole, never edited field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub label: String,
    pub location: GeoPoint,
}

impl Address {
    pub fn new(label: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            label: label.into(),
            location,
        }
    }
}

/// A registered customer.
///
/// `membership_tier` is a cache of [`compute_tier`] over the two lifetime counters. Readers
/// that need the tier should call [`Customer::computed_tier`]; the stored value can lag
/// behind until the next refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub lifetime_order_count: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub lifetime_spend: Decimal,
    pub membership_tier: Tier,
    pub selected_address: Option<Address>,
}

/// Payload for registering a customer.
#[derive(Debug, Clone)]
pub struct CustomerCreate {
    pub name: String,
    pub email: String,
}

/// Profile changes. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    /// `Some(None)` clears the selected address.
    pub selected_address: Option<Option<Address>>,
}

impl Customer {
    /// A new customer with no order history.
    pub fn new(id: CustomerId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            lifetime_order_count: 0,
            lifetime_spend: Decimal::ZERO,
            membership_tier: Tier::Bronze,
            selected_address: None,
        }
    }

    /// The tier the lifetime counters qualify for, regardless of the cached value.
    pub fn computed_tier(&self) -> Tier {
        compute_tier(self.lifetime_order_count, self.lifetime_spend)
    }

    pub fn tier_progress(&self) -> TierProgress {
        self.computed_tier().progress(self.lifetime_order_count)
    }

    /// Whether the cached tier disagrees with the counters.
    pub fn tier_is_stale(&self) -> bool {
        self.membership_tier != self.computed_tier()
    }

    pub fn delivery_location(&self) -> Option<GeoPoint> {
        self.selected_address.as_ref().map(|a| a.location)
    }
}
