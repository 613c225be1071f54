//! Network-only resolution path: geocoder + boundary containment.
//!
//! Independent of the browser components. The [`RidingResolver`] facade
//! never returns an error — service failures degrade to none-confidence
//! results the caller can flag for review.

pub mod boundary;
pub mod nominatim;
pub mod postal;
pub mod resolver;

use thiserror::Error;

pub use boundary::{BoundaryClient, BoundaryObject};
pub use nominatim::NominatimClient;
pub use resolver::RidingResolver;

/// Errors from the external geocoding/boundary services.
///
/// Internal to this module's clients; the facade converts every one of
/// these into a degraded [`crate::types::Resolution`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP request failed or returned a non-success status
    #[error("service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsed but did not have the expected shape
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// Result type alias for service-client operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
