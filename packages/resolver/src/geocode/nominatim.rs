//! Nominatim (OpenStreetMap) geocoding client.

use serde::Deserialize;
use tracing::{debug, warn};

use super::{ServiceError, ServiceResult};
use crate::types::Coordinate;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = "BCVolunteerHub/1.0 (Volunteer Coordination Platform)";

/// Nominatim API response row
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

/// Thin typed client over the public Nominatim search endpoint.
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NominatimClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (tests, self-hosted mirror).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Geocode a query string, returning the top result's coordinate.
    pub async fn geocode(&self, query: &str) -> ServiceResult<Option<Coordinate>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );

        debug!(query = %query, "geocoding address");

        let places: Vec<NominatimPlace> = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let place = match places.first() {
            Some(p) => p,
            None => {
                warn!(query = %query, "no geocoding result");
                return Ok(None);
            }
        };

        let lat: f64 = place
            .lat
            .parse()
            .map_err(|e| ServiceError::Shape(format!("invalid latitude: {}", e)))?;
        let lon: f64 = place
            .lon
            .parse()
            .map_err(|e| ServiceError::Shape(format!("invalid longitude: {}", e)))?;

        debug!(
            query = %query,
            lat,
            lon,
            display_name = %place.display_name,
            "geocoded"
        );

        Ok(Some(Coordinate { lat, lon }))
    }
}
