//! Electoral-boundary containment client (Represent-style API).
//!
//! Two endpoints: point-in-polygon containment scoped to the provincial
//! electoral-district set, and postal-code centroid matching.

use serde::Deserialize;
use tracing::debug;

use super::ServiceResult;
use crate::types::Coordinate;

const DEFAULT_BASE_URL: &str = "https://represent.opennorth.ca";
const DEFAULT_BOUNDARY_SET: &str = "bc-electoral-districts";

/// One boundary row from the service.
#[derive(Debug, Clone, Deserialize)]
pub struct BoundaryObject {
    pub name: String,
    #[serde(default)]
    pub external_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BoundaryList {
    #[serde(default)]
    objects: Vec<BoundaryObject>,
}

#[derive(Debug, Deserialize)]
struct PostcodeResponse {
    #[serde(default)]
    boundaries_centroid: Vec<BoundaryObject>,
}

/// Typed client over the boundary-containment service.
pub struct BoundaryClient {
    client: reqwest::Client,
    base_url: String,
    boundary_set: String,
}

impl Default for BoundaryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundaryClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            boundary_set: DEFAULT_BOUNDARY_SET.to_string(),
        }
    }

    /// Point the client at a different endpoint (tests, mirrors).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a different boundary set slug.
    pub fn with_boundary_set(mut self, set: impl Into<String>) -> Self {
        self.boundary_set = set.into();
        self
    }

    /// Find the electoral boundary containing a coordinate, if any.
    pub async fn containing(&self, coord: Coordinate) -> ServiceResult<Option<BoundaryObject>> {
        let url = format!(
            "{}/boundaries/{}/?contains={},{}",
            self.base_url, self.boundary_set, coord.lat, coord.lon
        );

        debug!(lat = coord.lat, lon = coord.lon, "boundary containment query");

        let list: BoundaryList = self
            .client
            .get(&url)
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(list.objects.into_iter().next())
    }

    /// Look up a postal code's centroid boundary within the electoral set.
    ///
    /// `postal_code` must already be compact uppercase (no space).
    pub async fn postcode(&self, postal_code: &str) -> ServiceResult<Option<BoundaryObject>> {
        let url = format!(
            "{}/postcodes/{}/?sets={}",
            self.base_url, postal_code, self.boundary_set
        );

        debug!(postal_code = %postal_code, "postal-code boundary query");

        let response: PostcodeResponse = self
            .client
            .get(&url)
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.boundaries_centroid.into_iter().next())
    }
}
