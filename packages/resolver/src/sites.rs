//! Per-site pattern tables for the two automation targets.
//!
//! Neither site has an API, so everything here — entry URLs, selector
//! candidates, marker phrases, extraction regexes, timing budgets — is a
//! snapshot of third-party markup. Markup drift breaks lookups; when it
//! does, the fix is editing this table (and bumping `version`), not
//! changing workflow logic. That fragility is inherent, not a bug.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;

/// Pattern table for the electoral-district lookup site.
pub struct ElectoralSite {
    pub name: &'static str,
    /// Markup snapshot this table was written against
    pub version: &'static str,
    pub url: &'static str,
    /// Ordered probe list; the first selector matching an element wins
    pub input_selectors: &'static [&'static str],
    pub suggestion_selectors: &'static [&'static str],
    /// Phrase that signals the result sentence has rendered
    pub result_marker: &'static str,
    /// Anchored on the site's result-sentence template
    pub sentence_pattern: Regex,
    /// Looser fallback: any "Name (CODE)" substring
    pub loose_pattern: Regex,
    pub nav_timeout: Duration,
    pub input_wait: Duration,
    pub suggestion_settle: Duration,
    pub result_wait: Duration,
}

/// Pattern table for the property-assessment site.
pub struct AssessmentSite {
    pub name: &'static str,
    pub version: &'static str,
    pub url: &'static str,
    /// Disclaimer interstitial controls; absence is tolerated
    pub agree_selectors: &'static [&'static str],
    pub agree_wait: Duration,
    pub agree_settle: Duration,
    /// The search box has a stable id on this site
    pub input_selector: &'static str,
    pub input_wait: Duration,
    pub suggestion_selectors: &'static [&'static str],
    pub suggestion_settle: Duration,
    /// Labeled element holding the assessed value, checked before the
    /// currency regex
    pub value_element: &'static str,
    pub currency_pattern: Regex,
    pub nav_timeout: Duration,
    pub poll_attempts: u32,
    pub poll_interval: Duration,
}

lazy_static! {
    /// Elections BC "Where to Vote" lookup.
    pub static ref ELECTORAL_LOOKUP: ElectoralSite = ElectoralSite {
        name: "wheretovote.elections.bc.ca",
        version: "2024-10",
        url: "https://wheretovote.elections.bc.ca/",
        input_selectors: &[
            "input[placeholder*='address' i]",
            "input[aria-label*='address' i]",
            "#address-search",
            "input[type='text']",
            "input",
        ],
        suggestion_selectors: &[
            "[role='option']",
            ".pac-item",
            ".suggestion-item",
            ".autocomplete-item",
        ],
        result_marker: "electoral district",
        sentence_pattern: Regex::new(
            r"(?i)electoral district[^:\n]*will be:\s*([A-Za-z][A-Za-z .'\-]*(?:\s*\([A-Z]{2,4}\))?)"
        ).unwrap(),
        loose_pattern: Regex::new(r"([A-Z][a-z']+(?:[ \-][A-Z][a-z']+)*\s*\([A-Z]{3}\))").unwrap(),
        nav_timeout: Duration::from_secs(15),
        input_wait: Duration::from_secs(5),
        suggestion_settle: Duration::from_millis(1500),
        result_wait: Duration::from_secs(10),
    };

    /// BC Assessment address search.
    pub static ref PROPERTY_ASSESSMENT: AssessmentSite = AssessmentSite {
        name: "www.bcassessment.ca",
        version: "2024-10",
        url: "https://www.bcassessment.ca/",
        agree_selectors: &[
            "#btnAgree",
            "button[id*='agree' i]",
            "input[value*='agree' i]",
        ],
        agree_wait: Duration::from_secs(2),
        agree_settle: Duration::from_millis(500),
        input_selector: "#rsbSearch",
        input_wait: Duration::from_secs(5),
        suggestion_selectors: &[
            "[role='option']",
            ".ui-menu-item",
            ".autocomplete-suggestion",
        ],
        suggestion_settle: Duration::from_millis(1500),
        value_element: "#lblTotalAssessedValue",
        currency_pattern: Regex::new(r"\$\s?\d{1,3}(?:,\d{3})+").unwrap(),
        nav_timeout: Duration::from_secs(20),
        poll_attempts: 10,
        poll_interval: Duration::from_secs(1),
    };
}
