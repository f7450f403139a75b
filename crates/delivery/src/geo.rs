//! # Distance
//!
//! Great-circle distance between a customer's delivery address and a shop.

use serde::{Deserialize, Serialize};

/// Mean earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees. Not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Unrounded haversine distance in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Haversine distance rounded to one decimal place.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    (haversine_km(a, b) * 10.0).round() / 10.0
}

pub fn format_distance(km: f64) -> String {
    format!("{km:.1} km")
}

/// Distance when both ends are known. Never falls back to a placeholder coordinate.
pub fn distance_between(from: Option<GeoPoint>, to: Option<GeoPoint>) -> Option<f64> {
    Some(distance_km(from?, to?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAKSIM: GeoPoint = GeoPoint::new(41.0370, 28.9850);
    const KADIKOY: GeoPoint = GeoPoint::new(40.9900, 29.0290);

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(distance_km(TAKSIM, TAKSIM), 0.0);
        assert_eq!(format_distance(distance_km(KADIKOY, KADIKOY)), "0.0 km");
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(haversine_km(TAKSIM, KADIKOY), haversine_km(KADIKOY, TAKSIM));
        assert_eq!(distance_km(TAKSIM, KADIKOY), distance_km(KADIKOY, TAKSIM));
    }

    #[test]
    fn test_istanbul_reference_pair() {
        let km = haversine_km(TAKSIM, KADIKOY);
        assert!((km - 6.4).abs() < 0.2, "got {km}");
        assert_eq!(format_distance(distance_km(TAKSIM, KADIKOY)), "6.4 km");
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let km = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((km - 111.19).abs() < 0.01, "got {km}");
    }

    #[test]
    fn test_missing_location_gives_none() {
        assert_eq!(distance_between(None, Some(TAKSIM)), None);
        assert_eq!(distance_between(Some(TAKSIM), None), None);
        assert_eq!(distance_between(None, None), None);
        assert_eq!(
            distance_between(Some(TAKSIM), Some(KADIKOY)),
            Some(distance_km(TAKSIM, KADIKOY))
        );
    }

    #[test]
    fn test_format_rounds_to_one_decimal() {
        assert_eq!(format_distance(3.0), "3.0 km");
        assert_eq!(format_distance(12.345), "12.3 km");
    }
}
