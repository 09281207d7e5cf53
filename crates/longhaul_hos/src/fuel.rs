use geo_types::Point;
use longhaul_providers::{latlon::LatLon, route_leg::RouteLeg};
use serde::Serialize;

use crate::limits::{FUEL_STOP_DURATION_HOURS, FUEL_STOP_INTERVAL_MILES};

/// A scheduled 30-minute refueling stop along one leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelStop {
    #[serde(rename = "location")]
    pub label: String,

    pub coordinates: LatLon,

    #[serde(rename = "distance_from_start")]
    pub distance_from_start_miles: f64,

    #[serde(rename = "duration")]
    pub duration_hours: f64,
}

/// Plans refueling stops at fixed mileage intervals along one leg.
///
/// A stop is required once cumulative distance would otherwise exceed the
/// interval, and thereafter every additional interval. Stops snap to the
/// sampled road geometry when one is available, and fall back to linear
/// interpolation between the endpoints of a two-point geometry.
pub fn plan_fuel_stops(leg: &RouteLeg) -> Vec<FuelStop> {
    let stop_count = ((leg.distance_miles - FUEL_STOP_INTERVAL_MILES) / FUEL_STOP_INTERVAL_MILES)
        .ceil()
        .max(0.0) as usize;

    (0..stop_count)
        .map(|i| {
            let target_miles = (i + 1) as f64 * FUEL_STOP_INTERVAL_MILES;
            let progress = target_miles / leg.distance_miles;

            FuelStop {
                label: format!("Fuel Stop {}", i + 1),
                coordinates: place_stop(&leg.geometry, progress).into(),
                distance_from_start_miles: target_miles,
                duration_hours: FUEL_STOP_DURATION_HOURS,
            }
        })
        .collect()
}

fn place_stop(geometry: &[Point], progress: f64) -> Point {
    if geometry.len() > 2 {
        let index = (progress * (geometry.len() - 1) as f64).round() as usize;
        geometry[index.min(geometry.len() - 1)]
    } else {
        let start = geometry[0];
        let end = geometry[geometry.len() - 1];
        Point::new(
            start.x() + (end.x() - start.x()) * progress,
            start.y() + (end.y() - start.y()) * progress,
        )
    }
}
