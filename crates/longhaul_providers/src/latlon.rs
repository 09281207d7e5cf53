use serde::{Deserialize, Serialize};

const EARTH_RADIUS_MILES: f64 = 3_958.8;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance in miles.
    pub fn haversine_miles(&self, other: &LatLon) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_MILES * c
    }
}

impl From<LatLon> for geo_types::Point {
    fn from(value: LatLon) -> Self {
        geo_types::Point::new(value.lon, value.lat)
    }
}

impl From<geo_types::Point> for LatLon {
    fn from(point: geo_types::Point) -> Self {
        LatLon {
            lat: point.y(),
            lon: point.x(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LatLon;

    #[test]
    fn haversine_distance_between_known_cities() {
        let new_york = LatLon::new(40.7128, -74.0060);
        let los_angeles = LatLon::new(34.0522, -118.2437);

        let distance = new_york.haversine_miles(&los_angeles);

        assert!((distance - 2445.0).abs() < 15.0, "got {distance}");
    }

    #[test]
    fn haversine_distance_is_symmetric() {
        let a = LatLon::new(41.8781, -87.6298);
        let b = LatLon::new(29.7604, -95.3698);

        assert!((a.haversine_miles(&b) - b.haversine_miles(&a)).abs() < 1e-9);
    }

    #[test]
    fn haversine_distance_to_self_is_zero() {
        let point = LatLon::new(39.7392, -104.9903);

        assert_eq!(point.haversine_miles(&point), 0.0);
    }

    #[test]
    fn point_conversion_swaps_axis_order() {
        let point: geo_types::Point = LatLon::new(40.0, -75.0).into();

        assert_eq!(point.x(), -75.0);
        assert_eq!(point.y(), 40.0);
        assert_eq!(LatLon::from(point), LatLon::new(40.0, -75.0));
    }
}
