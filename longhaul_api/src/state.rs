use longhaul_providers::geocode_cache::Geocoder;
use longhaul_providers::route_estimator::RouteEstimator;

pub struct AppState {
    pub geocoder: Geocoder,
    pub route_estimator: RouteEstimator,
}
