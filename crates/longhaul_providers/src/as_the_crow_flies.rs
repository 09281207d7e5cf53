use geo_types::Point;

use crate::{latlon::LatLon, route_leg::RouteLeg};

/// Roads are not straight; highway routes run roughly 1.2-1.4x the
/// great-circle distance, so 1.3 is used as the average.
pub const ROAD_CURVATURE_FACTOR: f64 = 1.3;

pub const CROW_FLIES_AVERAGE_SPEED_MPH: f64 = 60.0;

const CROW_FLIES_GEOMETRY_POINTS: usize = 5;

/// Deterministic offline route estimate between two coordinates.
///
/// Distance is the haversine great-circle length scaled by the road
/// curvature factor, duration assumes the fixed average truck speed, and the
/// geometry is a short interpolated path between the endpoints.
pub fn as_the_crow_flies_leg(from: LatLon, to: LatLon) -> RouteLeg {
    let distance_miles = from.haversine_miles(&to) * ROAD_CURVATURE_FACTOR;

    // The (1 - t) * a + t * b form keeps the endpoints exact.
    let geometry = (0..CROW_FLIES_GEOMETRY_POINTS)
        .map(|i| {
            let t = i as f64 / (CROW_FLIES_GEOMETRY_POINTS - 1) as f64;
            Point::new(
                (1.0 - t) * from.lon + t * to.lon,
                (1.0 - t) * from.lat + t * to.lat,
            )
        })
        .collect();

    RouteLeg {
        distance_miles,
        duration_hours: distance_miles / CROW_FLIES_AVERAGE_SPEED_MPH,
        geometry,
    }
}
