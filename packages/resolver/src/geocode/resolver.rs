//! Confidence-graded riding resolution without a browser.

use tracing::{debug, warn};

use super::boundary::{BoundaryClient, BoundaryObject};
use super::nominatim::NominatimClient;
use super::postal;
use crate::normalize::normalize;
use crate::types::{Confidence, LookupSource, Resolution};

/// Label when the geocoder has no result for the address.
pub const ADDRESS_NOT_FOUND: &str = "Riding not found (address could not be located)";
/// Label when a geocoded point sits outside every known boundary.
pub const OUTSIDE_BOUNDARIES: &str = "Outside defined boundaries";
/// Label when the geocoder or boundary service failed.
pub const SERVICE_ERROR: &str = "Riding lookup service error";
/// Label for an in-region postal code no source could place.
pub const UNKNOWN_IN_REGION: &str = "Unknown riding (BC postal code)";
/// Label for a postal code outside the service region.
pub const OUTSIDE_REGION: &str = "Outside British Columbia";

/// Chains the geocoder and the boundary service into riding lookups.
///
/// Both entry points are infallible by contract: every internal failure
/// degrades to a none-confidence [`Resolution`] instead of propagating.
pub struct RidingResolver {
    geocoder: NominatimClient,
    boundaries: BoundaryClient,
}

impl Default for RidingResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RidingResolver {
    pub fn new() -> Self {
        Self {
            geocoder: NominatimClient::new(),
            boundaries: BoundaryClient::new(),
        }
    }

    /// Swap the geocoder client (tests, mirrors).
    pub fn with_geocoder(mut self, geocoder: NominatimClient) -> Self {
        self.geocoder = geocoder;
        self
    }

    /// Swap the boundary client (tests, mirrors).
    pub fn with_boundaries(mut self, boundaries: BoundaryClient) -> Self {
        self.boundaries = boundaries;
        self
    }

    /// Resolve a riding from a free-text address.
    pub async fn lookup_by_address(&self, address: &str) -> Resolution {
        let query = normalize(address);

        let coord = match self.geocoder.geocode(&query).await {
            Ok(Some(coord)) => coord,
            Ok(None) => {
                return Resolution::new(ADDRESS_NOT_FOUND, Confidence::None, LookupSource::Address)
            }
            Err(e) => {
                warn!(error = %e, query = %query, "geocoding failed");
                return Resolution::new(SERVICE_ERROR, Confidence::None, LookupSource::Address);
            }
        };

        match self.boundaries.containing(coord).await {
            Ok(Some(boundary)) => Resolution::new(
                format_boundary(&boundary),
                Confidence::High,
                LookupSource::Address,
            ),
            Ok(None) => {
                debug!(lat = coord.lat, lon = coord.lon, "point outside all boundaries");
                Resolution::new(OUTSIDE_BOUNDARIES, Confidence::Low, LookupSource::Address)
            }
            Err(e) => {
                warn!(error = %e, "boundary containment failed");
                Resolution::new(SERVICE_ERROR, Confidence::None, LookupSource::Address)
            }
        }
    }

    /// Resolve a riding from a postal code.
    ///
    /// The static prefix table is consulted before any network call.
    pub async fn lookup_by_postal_code(&self, postal_code: &str) -> Resolution {
        let compact = postal_code.trim().replace(' ', "").to_uppercase();
        let fsa: String = compact.chars().take(3).collect();

        if let Some(riding) = postal::prefix_riding(&fsa) {
            debug!(fsa = %fsa, riding, "postal prefix cache hit");
            return Resolution::new(riding, Confidence::Medium, LookupSource::PostalCode);
        }

        match self.boundaries.postcode(&compact).await {
            Ok(Some(boundary)) => {
                return Resolution::new(
                    boundary.name,
                    Confidence::Medium,
                    LookupSource::PostalCode,
                )
            }
            Ok(None) => debug!(postal_code = %compact, "no centroid boundary match"),
            Err(e) => warn!(error = %e, postal_code = %compact, "postal-code lookup failed"),
        }

        // Last resort: the province letter
        if postal::in_service_region(&fsa) {
            Resolution::new(UNKNOWN_IN_REGION, Confidence::Low, LookupSource::PostalCode)
        } else {
            Resolution::new(OUTSIDE_REGION, Confidence::None, LookupSource::PostalCode)
        }
    }
}

/// `"Name (CODE)"` when the boundary carries an external code, else the
/// bare name.
fn format_boundary(boundary: &BoundaryObject) -> String {
    match &boundary.external_id {
        Some(code) if !code.is_empty() => format!("{} ({})", boundary.name, code),
        _ => boundary.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver_for(server: &MockServer) -> RidingResolver {
        RidingResolver::new()
            .with_geocoder(NominatimClient::new().with_base_url(server.uri()))
            .with_boundaries(BoundaryClient::new().with_base_url(server.uri()))
    }

    async fn mock_geocode_hit(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"lat": "49.1551", "lon": "-122.8579", "display_name": "14408 Chartwell Dr, Surrey, BC"}
            ])))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_address_resolves_with_code_and_high_confidence() {
        let server = MockServer::start().await;
        mock_geocode_hit(&server).await;
        Mock::given(method("GET"))
            .and(path("/boundaries/bc-electoral-districts/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "objects": [{"name": "Surrey-Fleetwood", "external_id": "SRF"}]
            })))
            .mount(&server)
            .await;

        let r = resolver_for(&server)
            .lookup_by_address("14408 Chartwell Dr, Surrey")
            .await;

        assert_eq!(r.value, "Surrey-Fleetwood (SRF)");
        assert_eq!(r.confidence, Confidence::High);
        assert_eq!(r.source, LookupSource::Address);
        assert!(!r.needs_review);
    }

    #[tokio::test]
    async fn test_boundary_without_code_uses_bare_name() {
        let server = MockServer::start().await;
        mock_geocode_hit(&server).await;
        Mock::given(method("GET"))
            .and(path("/boundaries/bc-electoral-districts/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "objects": [{"name": "Surrey-Fleetwood"}]
            })))
            .mount(&server)
            .await;

        let r = resolver_for(&server).lookup_by_address("14408 Chartwell Dr").await;
        assert_eq!(r.value, "Surrey-Fleetwood");
        assert_eq!(r.confidence, Confidence::High);
    }

    #[tokio::test]
    async fn test_geocode_miss_is_not_found_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let r = resolver_for(&server)
            .lookup_by_address("123 Unknown St, Nowhere")
            .await;

        assert!(r.value.contains("not found"));
        assert_eq!(r.confidence, Confidence::None);
        assert!(r.needs_review);
    }

    #[tokio::test]
    async fn test_point_outside_boundaries_is_low() {
        let server = MockServer::start().await;
        mock_geocode_hit(&server).await;
        Mock::given(method("GET"))
            .and(path("/boundaries/bc-electoral-districts/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"objects": []})))
            .mount(&server)
            .await;

        let r = resolver_for(&server).lookup_by_address("Jasper, Alberta").await;
        assert!(r.value.contains("Outside defined boundaries"));
        assert_eq!(r.confidence, Confidence::Low);
    }

    #[tokio::test]
    async fn test_service_failure_degrades_to_none() {
        // Nothing mounted: every request 404s
        let server = MockServer::start().await;

        let r = resolver_for(&server).lookup_by_address("14408 Chartwell Dr").await;
        assert_eq!(r.value, SERVICE_ERROR);
        assert_eq!(r.confidence, Confidence::None);
    }

    #[tokio::test]
    async fn test_postal_prefix_cache_hit_makes_no_network_call() {
        let server = MockServer::start().await;

        let r = resolver_for(&server).lookup_by_postal_code("V6B 1A1").await;

        assert_eq!(r.value, "Vancouver-False Creek");
        assert_eq!(r.confidence, Confidence::Medium);
        assert_eq!(r.source, LookupSource::PostalCode);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_postal_centroid_match_is_medium() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/postcodes/V3X1P3/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "boundaries_centroid": [{"name": "Surrey-Panorama"}]
            })))
            .mount(&server)
            .await;

        let r = resolver_for(&server).lookup_by_postal_code("v3x 1p3").await;
        assert_eq!(r.value, "Surrey-Panorama");
        assert_eq!(r.confidence, Confidence::Medium);
    }

    #[tokio::test]
    async fn test_unknown_bc_postal_code_is_low() {
        let server = MockServer::start().await;

        let r = resolver_for(&server).lookup_by_postal_code("V9Z 9Z9").await;
        assert_eq!(r.value, UNKNOWN_IN_REGION);
        assert_eq!(r.confidence, Confidence::Low);
    }

    #[tokio::test]
    async fn test_out_of_province_postal_code_is_none() {
        let server = MockServer::start().await;

        let r = resolver_for(&server).lookup_by_postal_code("T5K 2B4").await;
        assert_eq!(r.value, OUTSIDE_REGION);
        assert_eq!(r.confidence, Confidence::None);
    }

    // Live-service coverage; skipped unless the network is welcome
    #[tokio::test]
    async fn test_live_address_lookup() {
        if std::env::var("SKIP_GEOCODING_TESTS").is_ok() {
            return;
        }

        let r = RidingResolver::new()
            .lookup_by_address("14408 Chartwell Dr, Surrey, BC")
            .await;

        // Either a real containment hit or a graceful degradation;
        // never a panic
        assert!(!r.value.is_empty());
    }
}
