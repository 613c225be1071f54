//! Electoral-district extraction against the where-to-vote site.
//!
//! Pipeline: navigate → locate input → type query → await suggestions →
//! select-or-submit → await result → extract. Navigation and result waits
//! are soft (partial content is still worth parsing); a missing search
//! input or unparseable result text aborts with a typed error.

use tracing::{debug, info};

use crate::browser::{PageDriver, Tolerance};
use crate::error::{AutomationError, AutomationResult};
use crate::normalize::normalize;
use crate::sites::{self, ElectoralSite};

/// Resolve the riding for a free-text address by driving the lookup site.
///
/// Success implies high confidence — this path either matches a known
/// result pattern or fails.
pub async fn extract_riding(driver: &dyn PageDriver, address: &str) -> AutomationResult<String> {
    let site: &ElectoralSite = &sites::ELECTORAL_LOOKUP;
    let query = normalize(address);
    info!(site = site.name, query = %query, "riding extraction starting");

    driver
        .navigate(site.url, site.nav_timeout, Tolerance::Soft)
        .await?;

    let input = driver
        .wait_for_any(site.input_selectors, site.input_wait)
        .await?
        .ok_or(AutomationError::InputNotFound { site: site.name })?;

    driver.clear_and_type(&input, &query).await?;

    // Let the autocomplete widget settle before checking for suggestions
    driver.settle(site.suggestion_settle).await;

    match driver.find_first(site.suggestion_selectors).await? {
        Some(suggestion) => {
            debug!(selector = %suggestion, "clicking first suggestion");
            driver.click(&suggestion).await?;
        }
        None => {
            debug!("no suggestions, submitting with Enter");
            driver.press_enter(&input).await?;
        }
    }

    driver
        .wait_for_text(site.result_marker, site.result_wait, Tolerance::Soft)
        .await?;

    let text = driver.body_text().await?;
    let riding = parse_riding(&text).ok_or(AutomationError::NotParseable { site: site.name })?;

    info!(riding = %riding, "riding extracted");
    Ok(riding)
}

/// Extract a riding name from rendered page text.
///
/// Tries the anchored result-sentence pattern first, then the looser
/// `Name (CODE)` fallback. Exposed separately so pattern drift can be
/// caught without a browser.
pub fn parse_riding(text: &str) -> Option<String> {
    let site: &ElectoralSite = &sites::ELECTORAL_LOOKUP;

    if let Some(caps) = site.sentence_pattern.captures(text) {
        return Some(caps[1].trim().to_string());
    }

    site.loose_pattern
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockPage, PageCall};

    #[test]
    fn test_parse_riding_sentence() {
        let text = "Your electoral district for the 2024 Provincial General Election will be: Surrey-Fleetwood (SRF)";
        assert_eq!(parse_riding(text).as_deref(), Some("Surrey-Fleetwood (SRF)"));
    }

    #[test]
    fn test_parse_riding_loose_fallback() {
        let text = "Results\nYou are registered in Vancouver-Hastings (VNH)\n";
        assert_eq!(parse_riding(text).as_deref(), Some("Vancouver-Hastings (VNH)"));
    }

    #[test]
    fn test_parse_riding_no_match() {
        assert_eq!(parse_riding("Welcome to the lookup service"), None);
    }

    #[tokio::test]
    async fn test_clicks_suggestion_when_present() {
        let page = MockPage::new()
            .with_selector("input")
            .with_selector("[role='option']")
            .with_body_text("Your electoral district will be: Surrey-Fleetwood (SRF)");

        let riding = extract_riding(&page, "14408 Chartwell Dr, Surrey").await.unwrap();
        assert_eq!(riding, "Surrey-Fleetwood (SRF)");

        let calls = page.calls();
        assert!(calls.iter().any(|c| matches!(c, PageCall::Click { selector } if selector == "[role='option']")));
        assert!(!calls.iter().any(|c| matches!(c, PageCall::PressEnter { .. })));
    }

    #[tokio::test]
    async fn test_submits_with_enter_without_suggestions() {
        let page = MockPage::new()
            .with_selector("input[type='text']")
            .with_body_text("Your electoral district will be: Vancouver-Hastings (VNH)");

        extract_riding(&page, "2714 E Pender St, Vancouver").await.unwrap();

        let calls = page.calls();
        assert!(calls.iter().any(|c| matches!(c, PageCall::PressEnter { .. })));
    }

    #[tokio::test]
    async fn test_missing_input_is_hard_failure() {
        let page = MockPage::new().with_body_text("maintenance page");

        let err = extract_riding(&page, "123 Main St").await.unwrap_err();
        assert!(matches!(err, AutomationError::InputNotFound { .. }));
    }

    #[tokio::test]
    async fn test_unparseable_result_is_hard_failure() {
        let page = MockPage::new()
            .with_selector("input")
            .with_body_text("Sorry, we could not find that address.");

        let err = extract_riding(&page, "123 Main St").await.unwrap_err();
        assert!(matches!(err, AutomationError::NotParseable { .. }));
    }

    #[tokio::test]
    async fn test_types_normalized_query() {
        let page = MockPage::new()
            .with_selector("input")
            .with_body_text("Your electoral district will be: Vancouver-False Creek (VFC)");

        extract_riding(&page, "738 Broughton Street, Suite 2104, Vancouver")
            .await
            .unwrap();

        let calls = page.calls();
        assert!(calls.iter().any(|c| matches!(
            c,
            PageCall::Type { text, .. } if text == "2104-738 Broughton Street"
        )));
    }
}
