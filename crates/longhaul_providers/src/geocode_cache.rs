use std::sync::Arc;

use fxhash::FxHashMap;
use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::nominatim::{GeocodeError, GeocodedLocation, NominatimClient};

/// Process-lifetime cache of resolved locations, keyed by the normalized
/// query string.
///
/// Concurrent lookups of the same key coalesce onto a single upstream
/// request via the per-key cell; a failed resolution leaves the cell empty so
/// a later request may retry.
pub struct GeocodeCache {
    entries: Mutex<FxHashMap<String, Arc<OnceCell<GeocodedLocation>>>>,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn normalize(query: &str) -> String {
        query.trim().to_lowercase()
    }

    pub async fn get_or_resolve<F, Fut>(
        &self,
        query: &str,
        resolve: F,
    ) -> Result<GeocodedLocation, GeocodeError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<GeocodedLocation, GeocodeError>>,
    {
        let cell = {
            let mut entries = self.entries.lock();
            Arc::clone(entries.entry(Self::normalize(query)).or_default())
        };

        if let Some(location) = cell.get() {
            debug!(query, "geocode cache hit");
            return Ok(location.clone());
        }

        let location = cell.get_or_try_init(resolve).await?;

        Ok(location.clone())
    }
}

impl Default for GeocodeCache {
    fn default() -> Self {
        Self::new()
    }
}

/// The only geocoding surface the rest of the system sees: a Nominatim
/// client behind the shared cache.
pub struct Geocoder {
    client: NominatimClient,
    cache: GeocodeCache,
}

impl Geocoder {
    pub fn new(client: NominatimClient) -> Self {
        Self {
            client,
            cache: GeocodeCache::new(),
        }
    }

    pub async fn resolve(&self, query: &str) -> Result<GeocodedLocation, GeocodeError> {
        self.cache
            .get_or_resolve(query, || self.client.search(query))
            .await
    }
}
