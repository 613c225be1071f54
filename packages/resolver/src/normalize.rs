//! Address normalization.
//!
//! Third-party lookup sites want `unit-number street` ("2104-738 Broughton
//! Street"), while volunteers type whatever their lease says. This is a
//! best-effort canonicalizer: anything it does not recognize comes back
//! merely trimmed.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::AddressParts;

lazy_static! {
    // Suite/apartment/unit marker anchored after a separator,
    // e.g. ", Suite 2104", " Apt 3B", " #205"
    static ref UNIT_MARKER: Regex = Regex::new(
        r"(?i)[,\s]+(?:suite|apt\.?|unit|#)\s*#?\s*([A-Za-z0-9-]+)"
    ).unwrap();

    // Already-canonical "unit-number street" prefix
    static ref CANONICAL_PREFIX: Regex = Regex::new(r"^\d+-\d+\s").unwrap();

    // Leading civic street number
    static ref LEADING_STREET_NUMBER: Regex = Regex::new(r"^(\d+)\s+(.+)$").unwrap();

    // Leftover unit token at the very start of the address
    static ref LEADING_UNIT_TOKEN: Regex = Regex::new(
        r"(?i)^(?:(?:suite|apt\.?|unit)\s+\S+|#\s*\S+)[\s,]+"
    ).unwrap();
}

/// Normalize a free-text address into the canonical query form.
///
/// Never fails; unrecognized formats are returned trimmed.
pub fn normalize(address: &str) -> String {
    extract_parts(address).canonical
}

/// Split an address into raw / canonical / extracted unit.
pub fn extract_parts(address: &str) -> AddressParts {
    let raw = address.to_string();
    let trimmed = address.trim();

    if let Some(caps) = UNIT_MARKER.captures(trimmed) {
        let unit = caps[1].to_string();
        let matched = caps.get(0).expect("match 0 always present");

        // Remove the matched fragment, keeping what surrounds it
        let mut remaining = String::with_capacity(trimmed.len());
        remaining.push_str(&trimmed[..matched.start()]);
        remaining.push_str(&trimmed[matched.end()..]);
        let remaining = remaining.trim().to_string();

        if let Some(street) = LEADING_STREET_NUMBER.captures(&remaining) {
            let number = &street[1];
            // Street portion only; the comma-separated tail (city etc.)
            // is dropped
            let rest = street[2].split(',').next().unwrap_or("").trim();
            return AddressParts {
                raw,
                canonical: format!("{}-{} {}", unit, number, rest).trim().to_string(),
                unit: Some(unit),
            };
        }

        // No leading street number to attach the unit to
        return AddressParts {
            raw,
            canonical: remaining,
            unit: Some(unit),
        };
    }

    // Already in unit-street form: leave untouched
    if CANONICAL_PREFIX.is_match(trimmed) {
        return AddressParts {
            raw,
            canonical: trimmed.to_string(),
            unit: None,
        };
    }

    // Final cleanup: a unit token the marker pass could not anchor on
    let cleaned = LEADING_UNIT_TOKEN.replace(trimmed, "");
    AddressParts {
        raw,
        canonical: cleaned.trim().to_string(),
        unit: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_moved_to_unit_prefix() {
        assert_eq!(
            normalize("738 Broughton Street, Suite 2104, Vancouver"),
            "2104-738 Broughton Street"
        );
    }

    #[test]
    fn test_canonical_form_unchanged() {
        assert_eq!(normalize("123-456 Main St"), "123-456 Main St");
    }

    #[test]
    fn test_hash_marker() {
        assert_eq!(
            normalize("738 Broughton St #205, Vancouver"),
            "205-738 Broughton St"
        );
    }

    #[test]
    fn test_apt_marker_without_commas() {
        let parts = extract_parts("920 Yates Street Apt 12");
        assert_eq!(parts.unit.as_deref(), Some("12"));
        assert_eq!(parts.canonical, "12-920 Yates Street");
    }

    #[test]
    fn test_leading_unit_token_stripped() {
        assert_eq!(normalize("Unit 5, 738 Broughton St"), "738 Broughton St");
    }

    #[test]
    fn test_unrecognized_format_trimmed() {
        assert_eq!(normalize("  General Delivery, Wells BC  "), "General Delivery, Wells BC");
    }

    #[test]
    fn test_never_panics_on_junk() {
        for s in ["", "   ", "#", "Suite", "----", "1"] {
            let _ = normalize(s);
        }
    }
}
