mod calculate_trip;
mod error;
mod health;
mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::http::Method;
use axum::routing::{get, post};
use axum::{Router, serve};
use longhaul_providers::geocode_cache::Geocoder;
use longhaul_providers::nominatim::{
    DEFAULT_NOMINATIM_URL, NominatimClient, NominatimClientParams,
};
use longhaul_providers::osrm::{DEFAULT_OSRM_URL, OsrmRouteClient, OsrmRouteClientParams};
use longhaul_providers::route_estimator::RouteEstimator;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use crate::calculate_trip::calculate_trip_handler;
use crate::health::health_handler;
use crate::state::AppState;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const USER_AGENT: &str = "longhaul/0.1 (truck trip planner)";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let nominatim_url = std::env::var("LONGHAUL_NOMINATIM_URL")
        .unwrap_or_else(|_| DEFAULT_NOMINATIM_URL.to_owned());
    let osrm_url = std::env::var("LONGHAUL_OSRM_URL").unwrap_or_else(|_| DEFAULT_OSRM_URL.to_owned());

    let state = Arc::new(AppState {
        geocoder: Geocoder::new(NominatimClient::new(NominatimClientParams {
            base_url: nominatim_url,
            user_agent: USER_AGENT.to_owned(),
            min_request_interval: Duration::from_secs(1),
            rate_limit_backoff: Duration::from_secs(5),
        })),
        route_estimator: RouteEstimator::new(OsrmRouteClient::new(OsrmRouteClientParams {
            base_url: osrm_url,
            user_agent: USER_AGENT.to_owned(),
        })),
    });

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/calculate-trip", post(calculate_trip_handler))
        .route("/api/health", get(health_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state);

    let bind_addr =
        std::env::var("LONGHAUL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(%bind_addr, "listening");

    serve(listener, app).await?;

    Ok(())
}
