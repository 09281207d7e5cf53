pub mod as_the_crow_flies;
pub mod geocode_cache;
pub mod latlon;
pub mod nominatim;
pub mod osrm;
pub mod pacing;
pub mod route_estimator;
pub mod route_leg;
