//! Static postal-prefix lookup table.
//!
//! Forward sortation areas that sit cleanly inside one riding can be
//! answered without a network call. Prefixes that straddle riding
//! boundaries are deliberately absent — those fall through to the
//! boundary service.

/// Riding for a 3-character postal prefix, when the prefix maps cleanly.
pub fn prefix_riding(fsa: &str) -> Option<&'static str> {
    let riding = match fsa {
        "V6B" => "Vancouver-False Creek",
        "V6Z" => "Vancouver-False Creek",
        "V6E" => "Vancouver-West End",
        "V6G" => "Vancouver-West End",
        "V5K" => "Vancouver-Hastings",
        "V5L" => "Vancouver-Hastings",
        "V5T" => "Vancouver-Mount Pleasant",
        "V6J" => "Vancouver-Point Grey",
        "V6R" => "Vancouver-Point Grey",
        "V5C" => "Burnaby North",
        "V3S" => "Surrey-Cloverdale",
        "V4A" => "Surrey-White Rock",
        "V8V" => "Victoria-Beacon Hill",
        "V8W" => "Victoria-Beacon Hill",
        "V8P" => "Oak Bay-Gordon Head",
        "V9A" => "Esquimalt-Colwood",
        "V1Y" => "Kelowna-Mission",
        _ => return None,
    };
    Some(riding)
}

/// Whether a postal prefix plausibly belongs to the service region (BC
/// postal codes start with V).
pub fn in_service_region(fsa: &str) -> bool {
    fsa.starts_with('V')
}
