//! Assessed-value extraction against the property-assessment site.
//!
//! Differs from the riding flow: a disclaimer interstitial may need
//! dismissing, the search box has a stable id, and results render
//! asynchronously — so acquisition is a bounded polling loop rather than
//! a single marker wait.

use tracing::{debug, info};

use crate::browser::{PageDriver, Tolerance};
use crate::error::{AutomationError, AutomationResult};
use crate::normalize::normalize;
use crate::sites::{self, AssessmentSite};

/// Resolve the government-assessed value for a free-text address.
///
/// Exhausting the polling budget raises [`AutomationError::ValueNotFound`],
/// which callers map to a not-found status distinct from automation
/// breakage.
pub async fn extract_assessed_value(
    driver: &dyn PageDriver,
    address: &str,
) -> AutomationResult<String> {
    let site: &AssessmentSite = &sites::PROPERTY_ASSESSMENT;
    let query = normalize(address);
    info!(site = site.name, query = %query, "assessed-value extraction starting");

    driver
        .navigate(site.url, site.nav_timeout, Tolerance::Soft)
        .await?;

    // Disclaimer interstitial; absence is tolerated
    if let Some(agree) = driver.wait_for_any(site.agree_selectors, site.agree_wait).await? {
        debug!(selector = %agree, "dismissing disclaimer");
        driver.click(&agree).await?;
        driver.settle(site.agree_settle).await;
    }

    let input = driver
        .wait_for_any(&[site.input_selector], site.input_wait)
        .await?
        .ok_or(AutomationError::InputNotFound { site: site.name })?;

    driver.clear_and_type(&input, &query).await?;
    driver.settle(site.suggestion_settle).await;

    match driver.find_first(site.suggestion_selectors).await? {
        Some(suggestion) => driver.click(&suggestion).await?,
        None => driver.press_enter(&input).await?,
    }

    // Results render asynchronously; poll on a fixed budget
    for attempt in 1..=site.poll_attempts {
        driver.settle(site.poll_interval).await;

        if let Some(label) = driver.element_text(site.value_element).await? {
            if let Some(value) = parse_assessed_value(&label) {
                info!(value = %value, attempt, "assessed value found in labeled element");
                return Ok(value);
            }
        }

        let text = driver.body_text().await?;
        if let Some(value) = parse_assessed_value(&text) {
            info!(value = %value, attempt, "assessed value found in page text");
            return Ok(value);
        }

        debug!(attempt, of = site.poll_attempts, "assessed value not visible yet");
    }

    Err(AutomationError::ValueNotFound {
        attempts: site.poll_attempts,
    })
}

/// Extract the first currency-shaped value from text.
pub fn parse_assessed_value(text: &str) -> Option<String> {
    let site: &AssessmentSite = &sites::PROPERTY_ASSESSMENT;
    site.currency_pattern
        .find(text)
        .map(|m| m.as_str().to_string())
}
