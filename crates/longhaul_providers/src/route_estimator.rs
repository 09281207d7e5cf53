use tracing::warn;

use crate::{
    as_the_crow_flies::as_the_crow_flies_leg, latlon::LatLon, osrm::OsrmRouteClient,
    route_leg::RouteLeg,
};

/// Resolves road routes through OSRM, degrading to the offline great-circle
/// estimate when the router is unreachable or rejects the pair.
///
/// Estimation therefore never fails; degradation is visible only in the
/// logs.
pub struct RouteEstimator {
    osrm_client: OsrmRouteClient,
}

impl RouteEstimator {
    pub fn new(osrm_client: OsrmRouteClient) -> Self {
        Self { osrm_client }
    }

    pub async fn estimate(&self, from: LatLon, to: LatLon) -> RouteLeg {
        match self.osrm_client.fetch_route(from, to).await {
            Ok(leg) => leg,
            Err(error) => {
                warn!(%error, "osrm routing unavailable, using crow-flies estimate");
                as_the_crow_flies_leg(from, to)
            }
        }
    }
}
