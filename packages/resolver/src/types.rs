//! Shared result vocabulary for every resolution path.

use serde::{Deserialize, Serialize};

/// How trustworthy a resolved riding or assessed value is.
///
/// Ordinal: `None < Low < Medium < High` (declaration order drives the
/// derived `Ord`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    None,
    Low,
    Medium,
    High,
}

/// Which kind of input produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    Address,
    PostalCode,
}

/// A confidence-graded resolution, handed to the caller for persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// Riding name (optionally with short code) or assessed value
    pub value: String,
    pub confidence: Confidence,
    /// True whenever confidence is below [`Confidence::High`]
    pub needs_review: bool,
    pub source: LookupSource,
}

impl Resolution {
    /// Build a resolution, deriving `needs_review` from the confidence.
    pub fn new(value: impl Into<String>, confidence: Confidence, source: LookupSource) -> Self {
        Self {
            value: value.into(),
            confidence,
            needs_review: confidence < Confidence::High,
            source,
        }
    }
}

/// A free-text address split into its normalized pieces.
///
/// Created per request and discarded after normalization; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressParts {
    /// Input as received
    pub raw: String,
    /// Canonical `unit-number street` form (best effort)
    pub canonical: String,
    /// Suite/apartment/unit identifier, when one was recognized
    pub unit: Option<String>,
}

/// An ephemeral geocoder coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_total_order() {
        assert!(Confidence::High > Confidence::Medium);
        assert!(Confidence::Medium > Confidence::Low);
        assert!(Confidence::Low > Confidence::None);
    }

    #[test]
    fn test_needs_review_follows_confidence() {
        let high = Resolution::new("Vancouver-Hastings", Confidence::High, LookupSource::Address);
        assert!(!high.needs_review);

        for c in [Confidence::Medium, Confidence::Low, Confidence::None] {
            let r = Resolution::new("x", c, LookupSource::PostalCode);
            assert!(r.needs_review);
        }
    }

    #[test]
    fn test_serialized_shape() {
        let r = Resolution::new("Surrey-Fleetwood (SRF)", Confidence::Medium, LookupSource::PostalCode);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["confidence"], "medium");
        assert_eq!(json["source"], "postal_code");
        assert_eq!(json["needs_review"], true);
    }
}
