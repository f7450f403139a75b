use crate::geo::GeoPoint;
use crate::hours::{evaluate, has_any_open_hours, ShopAvailability, WeeklyHours};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Shops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShopId(pub u32);

impl From<u32> for ShopId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ShopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shop_{}", self.0)
    }
}

/// A restaurant taking orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub hours: WeeklyHours,
}

/// Payload for registering a shop. Hours start at the standard schedule.
#[derive(Debug, Clone)]
pub struct ShopCreate {
    pub name: String,
    pub location: Option<GeoPoint>,
}

/// Owner edits. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ShopUpdate {
    pub name: Option<String>,
    pub location: Option<GeoPoint>,
    pub hours: Option<WeeklyHours>,
}

impl Shop {
    pub fn new(id: ShopId, name: impl Into<String>, location: Option<GeoPoint>) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            hours: WeeklyHours::standard(),
        }
    }

    pub fn availability(&self, now: NaiveDateTime) -> ShopAvailability {
        evaluate(&self.hours, now)
    }

    /// Whether the shop opens on at least one day of the week.
    pub fn has_open_hours(&self) -> bool {
        has_any_open_hours(&self.hours)
    }
}
