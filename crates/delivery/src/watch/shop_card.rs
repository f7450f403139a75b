//! Listing card for one shop, as seen by one customer.

use crate::geo::{distance_between, format_distance, GeoPoint};
use crate::model::{Shop, ShopId};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopCard {
    pub shop_id: ShopId,
    pub name: String,
    pub is_open_now: bool,
    pub status_label: String,
    pub distance_km: Option<f64>,
    /// `None` when the customer has no address selected or the shop has no location.
    pub distance_label: Option<String>,
}

impl ShopCard {
    pub fn build(shop: &Shop, customer_location: Option<GeoPoint>, now: NaiveDateTime) -> Self {
        let availability = shop.availability(now);
        let distance_km = distance_between(customer_location, shop.location);
        Self {
            shop_id: shop.id,
            name: shop.name.clone(),
            is_open_now: availability.is_open_now,
            status_label: availability.status_label(),
            distance_km,
            distance_label: distance_km.map(format_distance),
        }
    }
}
