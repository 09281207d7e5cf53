use geo_types::Point;
use serde::Deserialize;
use thiserror::Error;

use crate::{latlon::LatLon, route_leg::RouteLeg};

#[derive(Debug, Error)]
pub enum OsrmError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("routing failed with code {0}")]
    NoRoute(String),

    #[error("incomplete response")]
    IncompleteResponse,
}

const METERS_PER_MILE: f64 = 1_609.34;
const SECONDS_PER_HOUR: f64 = 3_600.0;

#[derive(Deserialize)]
struct OsrmRouteResponse {
    code: String,

    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    /// Meters
    distance: f64,

    /// Seconds
    duration: f64,

    geometry: OsrmGeometry,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    /// GeoJSON positions, [lon, lat]
    coordinates: Vec<[f64; 2]>,
}

pub struct OsrmRouteClientParams {
    pub base_url: String,
    pub user_agent: String,
}

pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";

pub const OSRM_ROUTE_API_PATH: &str = "/route/v1/driving/";

pub struct OsrmRouteClient {
    params: OsrmRouteClientParams,
    client: reqwest::Client,
}

impl OsrmRouteClient {
    pub fn new(params: OsrmRouteClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub async fn fetch_route(&self, from: LatLon, to: LatLon) -> Result<RouteLeg, OsrmError> {
        let mut url = self.params.base_url.clone();
        url.push_str(OSRM_ROUTE_API_PATH);
        url.push_str(&format!(
            "{},{};{},{}",
            from.lon, from.lat, to.lon, to.lat
        ));

        let response = self
            .client
            .get(url)
            .query(&[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("steps", "false"),
            ])
            .header(reqwest::header::USER_AGENT, &self.params.user_agent)
            .send()
            .await?;

        let body: OsrmRouteResponse = response.error_for_status()?.json().await?;

        leg_from_response(body)
    }
}

fn leg_from_response(body: OsrmRouteResponse) -> Result<RouteLeg, OsrmError> {
    if body.code != "Ok" {
        return Err(OsrmError::NoRoute(body.code));
    }

    let route = body
        .routes
        .into_iter()
        .next()
        .ok_or(OsrmError::IncompleteResponse)?;

    if route.geometry.coordinates.len() < 2 {
        return Err(OsrmError::IncompleteResponse);
    }

    Ok(RouteLeg {
        distance_miles: route.distance / METERS_PER_MILE,
        duration_hours: route.duration / SECONDS_PER_HOUR,
        geometry: route
            .geometry
            .coordinates
            .iter()
            .map(|position| Point::new(position[0], position[1]))
            .collect(),
    })
}
