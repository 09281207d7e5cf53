use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{latlon::LatLon, pacing::RequestPacer};

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("no results for \"{query}\"")]
    NoResults { query: String },

    #[error("unparseable coordinates in result for \"{query}\"")]
    InvalidCoordinates { query: String },
}

/// One resolved location. Immutable once produced.
#[derive(Debug, Clone, Serialize)]
pub struct GeocodedLocation {
    #[serde(flatten)]
    pub point: LatLon,
    pub display_name: String,
}

/// Nominatim serializes coordinates as JSON strings.
#[derive(Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

pub struct NominatimClientParams {
    pub base_url: String,
    pub user_agent: String,

    /// Nominatim's usage policy allows one request per second per client.
    pub min_request_interval: Duration,

    /// How long to hold off before the single retry after a 429.
    pub rate_limit_backoff: Duration,
}

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

pub const NOMINATIM_SEARCH_API_PATH: &str = "/search";

pub struct NominatimClient {
    params: NominatimClientParams,
    pacer: RequestPacer,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(params: NominatimClientParams) -> Self {
        let pacer = RequestPacer::new(params.min_request_interval);

        Self {
            params,
            pacer,
            client: reqwest::Client::new(),
        }
    }

    pub async fn search(&self, query: &str) -> Result<GeocodedLocation, GeocodeError> {
        let mut url = self.params.base_url.clone();
        url.push_str(NOMINATIM_SEARCH_API_PATH);

        self.pacer.acquire().await;
        debug!(query, "geocoding");

        let mut response = self.send_search(&url, query).await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!(query, "rate limited by nominatim, retrying once");
            tokio::time::sleep(self.params.rate_limit_backoff).await;
            self.pacer.acquire().await;
            response = self.send_search(&url, query).await?;
        }

        let places: Vec<NominatimPlace> = response.error_for_status()?.json().await?;

        let location = location_from_places(places, query)?;
        debug!(query, display_name = %location.display_name, "geocoded");

        Ok(location)
    }

    async fn send_search(&self, url: &str, query: &str) -> Result<reqwest::Response, GeocodeError> {
        let response = self
            .client
            .get(url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .header(reqwest::header::USER_AGENT, &self.params.user_agent)
            .send()
            .await?;

        Ok(response)
    }
}

fn location_from_places(
    places: Vec<NominatimPlace>,
    query: &str,
) -> Result<GeocodedLocation, GeocodeError> {
    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NoResults {
            query: query.to_owned(),
        })?;

    let (Ok(lat), Ok(lon)) = (place.lat.parse::<f64>(), place.lon.parse::<f64>()) else {
        return Err(GeocodeError::InvalidCoordinates {
            query: query.to_owned(),
        });
    };

    Ok(GeocodedLocation {
        point: LatLon::new(lat, lon),
        display_name: place.display_name.unwrap_or_else(|| query.to_owned()),
    })
}

#[cfg(test)]
mod tests {
    use super::{GeocodeError, NominatimPlace, location_from_places};

    fn decode_places(body: &str) -> Vec<NominatimPlace> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn decodes_the_first_place_with_string_coordinates() {
        let places = decode_places(
            r#"[{"lat": "41.8755616", "lon": "-87.6244212", "display_name": "Chicago, Cook County, Illinois, United States"}]"#,
        );

        let location = location_from_places(places, "Chicago, IL").unwrap();

        assert_eq!(location.point.lat, 41.8755616);
        assert_eq!(location.point.lon, -87.6244212);
        assert_eq!(
            location.display_name,
            "Chicago, Cook County, Illinois, United States"
        );
    }

    #[test]
    fn falls_back_to_the_query_when_the_display_name_is_missing() {
        let places = decode_places(r#"[{"lat": "1.0", "lon": "2.0"}]"#);

        let location = location_from_places(places, "somewhere").unwrap();

        assert_eq!(location.display_name, "somewhere");
    }

    #[test]
    fn empty_result_list_is_a_no_results_error() {
        let error = location_from_places(Vec::new(), "nowhere, XX").unwrap_err();

        assert!(matches!(error, GeocodeError::NoResults { query } if query == "nowhere, XX"));
    }

    #[test]
    fn garbage_coordinates_are_rejected() {
        let places = decode_places(r#"[{"lat": "not-a-number", "lon": "2.0"}]"#);

        let error = location_from_places(places, "bad").unwrap_err();

        assert!(matches!(error, GeocodeError::InvalidCoordinates { .. }));
    }
}
