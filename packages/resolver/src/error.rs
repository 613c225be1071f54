//! Typed errors for the resolution library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match
//! on the failure kind — the HTTP layer maps `ValueNotFound` to 404 and
//! everything else to 500.

use thiserror::Error;

/// Errors raised by the browser-automation resolution paths.
///
/// The geocode fallback path never surfaces these: it degrades to a
/// none-confidence [`crate::types::Resolution`] instead.
#[derive(Debug, Error)]
pub enum AutomationError {
    /// Browser process failed to launch or configure
    #[error("browser launch failed: {0}")]
    Launch(String),

    /// DevTools protocol or element interaction failure
    #[error("browser protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    /// An evaluated page expression returned an unexpected payload
    #[error("page evaluation returned unexpected payload: {0}")]
    Evaluation(String),

    /// A hard-bounded wait expired
    #[error("timed out after {ms}ms waiting for {what}")]
    Timeout { what: String, ms: u64 },

    /// None of the candidate search-input selectors matched
    #[error("no search input found on {site}")]
    InputNotFound { site: &'static str },

    /// Page text matched none of the riding extraction patterns
    #[error("result text on {site} was not parseable")]
    NotParseable { site: &'static str },

    /// Assessed value never appeared within the polling budget.
    ///
    /// Distinguished from other automation failures so callers can map it
    /// to a not-found status rather than a generic failure.
    #[error("assessed value not found after {attempts} checks")]
    ValueNotFound { attempts: u32 },
}

impl AutomationError {
    /// Whether this error means "the lookup worked but found nothing",
    /// as opposed to the automation itself breaking.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AutomationError::ValueNotFound { .. })
    }
}

/// Result type alias for automation operations.
pub type AutomationResult<T> = std::result::Result<T, AutomationError>;
