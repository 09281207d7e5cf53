use jiff::Timestamp;
use longhaul_providers::{nominatim::GeocodedLocation, route_leg::RouteLeg};
use serde::Serialize;

use crate::{
    fuel::{FuelStop, plan_fuel_stops},
    timeline::{TimelineBuilder, TimelineSegment},
};

/// One stop of the trip: where it resolved to and what the caller asked for.
#[derive(Debug, Clone, Serialize)]
pub struct TripStop {
    pub coords: GeocodedLocation,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TripLocations {
    pub current: TripStop,
    pub pickup: TripStop,
    pub dropoff: TripStop,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    #[serde(rename = "total_distance")]
    pub total_distance_miles: f64,

    #[serde(rename = "total_driving_time")]
    pub total_driving_hours: f64,

    /// Both legs' geometry concatenated, as [lon, lat] positions.
    pub geometry: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub locations: TripLocations,
    pub route: RouteSummary,
    pub fuel_stops: Vec<FuelStop>,
    pub timeline: Vec<TimelineSegment>,
}

/// Everything the planner needs, already resolved: the simulation itself
/// performs no lookups.
pub struct TripInput {
    pub current: TripStop,
    pub pickup: TripStop,
    pub dropoff: TripStop,
    pub leg_to_pickup: RouteLeg,
    pub leg_to_dropoff: RouteLeg,
    pub cycle_hours_used: f64,
    pub start: Timestamp,
}

/// Assembles the full trip plan. Pure: identical inputs (legs, cycle figure,
/// start time) produce an identical plan.
pub fn plan_trip(input: TripInput) -> TripPlan {
    let fuel_stops_to_pickup = plan_fuel_stops(&input.leg_to_pickup);
    let fuel_stops_to_dropoff = plan_fuel_stops(&input.leg_to_dropoff);

    let mut builder = TimelineBuilder::new(input.cycle_hours_used, input.start);
    builder.drive_leg(&input.leg_to_pickup, &fuel_stops_to_pickup);
    builder.pickup(&input.pickup.name);
    builder.drive_leg(&input.leg_to_dropoff, &fuel_stops_to_dropoff);
    builder.dropoff(&input.dropoff.name);

    let geometry = input
        .leg_to_pickup
        .geometry
        .iter()
        .chain(input.leg_to_dropoff.geometry.iter())
        .map(|point| [point.x(), point.y()])
        .collect();

    TripPlan {
        route: RouteSummary {
            total_distance_miles: round_to_tenth(
                input.leg_to_pickup.distance_miles + input.leg_to_dropoff.distance_miles,
            ),
            total_driving_hours: round_to_tenth(
                input.leg_to_pickup.duration_hours + input.leg_to_dropoff.duration_hours,
            ),
            geometry,
        },
        fuel_stops: fuel_stops_to_pickup
            .into_iter()
            .chain(fuel_stops_to_dropoff)
            .collect(),
        locations: TripLocations {
            current: input.current,
            pickup: input.pickup,
            dropoff: input.dropoff,
        },
        timeline: builder.into_segments(),
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
