use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use jiff::Timestamp;
use longhaul_hos::limits::CYCLE_BUDGET_HOURS;
use longhaul_hos::trip::{TripInput, TripPlan, TripStop, plan_trip};
use longhaul_providers::geocode_cache::Geocoder;
use serde::Deserialize;
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[serde_as]
#[derive(Deserialize)]
pub struct CalculateTripRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,

    /// Accepts a bare number or a numeric string.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub current_cycle_used: f64,
}

pub async fn calculate_trip_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CalculateTripRequest>, JsonRejection>,
) -> Result<Json<TripPlan>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    if !(0.0..=CYCLE_BUDGET_HOURS).contains(&body.current_cycle_used) {
        return Err(ApiError::BadRequest(format!(
            "current_cycle_used must be between 0 and {CYCLE_BUDGET_HOURS}"
        )));
    }

    let current = resolve_stop(&state.geocoder, "current", &body.current_location).await?;
    let pickup = resolve_stop(&state.geocoder, "pickup", &body.pickup_location).await?;
    let dropoff = resolve_stop(&state.geocoder, "dropoff", &body.dropoff_location).await?;

    let leg_to_pickup = state
        .route_estimator
        .estimate(current.coords.point, pickup.coords.point)
        .await;
    let leg_to_dropoff = state
        .route_estimator
        .estimate(pickup.coords.point, dropoff.coords.point)
        .await;

    info!(
        total_miles = leg_to_pickup.distance_miles + leg_to_dropoff.distance_miles,
        cycle_hours_used = body.current_cycle_used,
        "routes estimated, planning timeline"
    );

    let plan = plan_trip(TripInput {
        current,
        pickup,
        dropoff,
        leg_to_pickup,
        leg_to_dropoff,
        cycle_hours_used: body.current_cycle_used,
        start: Timestamp::now(),
    });

    Ok(Json(plan))
}

async fn resolve_stop(
    geocoder: &Geocoder,
    role: &str,
    query: &str,
) -> Result<TripStop, ApiError> {
    let coords = geocoder.resolve(query).await.map_err(|error| {
        ApiError::BadRequest(format!(
            "Unable to resolve {role} location \"{query}\": {error}"
        ))
    })?;

    Ok(TripStop {
        coords,
        name: query.to_owned(),
    })
}
