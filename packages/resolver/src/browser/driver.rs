//! Page interaction seam.
//!
//! Workflows drive pages only through [`PageDriver`], so they can be
//! exercised against [`crate::testing::MockPage`] without a browser.
//! [`CdpDriver`] is the real implementation over a `chromiumoxide` page.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use tracing::{debug, warn};

use crate::browser::pacing;
use crate::error::{AutomationError, AutomationResult};

/// Whether a bounded wait's expiry is tolerated or aborts the workflow.
///
/// `Soft` expiry is logged and the workflow continues on whatever content
/// is present; `Hard` expiry returns [`AutomationError::Timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tolerance {
    Soft,
    Hard,
}

/// Driver over one in-flight page.
///
/// Every bounded wait takes an explicit [`Tolerance`] or returns an
/// `Option`, so soft-versus-hard is visible at the call site rather than
/// implied by surrounding error handling.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate, bounded by `timeout`.
    async fn navigate(&self, url: &str, timeout: Duration, tolerance: Tolerance)
        -> AutomationResult<()>;

    /// Probe an ordered selector list once; first selector with a match wins.
    async fn find_first(&self, selectors: &[&str]) -> AutomationResult<Option<String>>;

    /// Poll an ordered selector list until one matches or `timeout` expires.
    /// Expiry yields `None` (absence is the caller's decision).
    async fn wait_for_any(
        &self,
        selectors: &[&str],
        timeout: Duration,
    ) -> AutomationResult<Option<String>>;

    async fn click(&self, selector: &str) -> AutomationResult<()>;

    /// Click the element, clear it, then type character-by-character with
    /// randomized keystroke delays.
    async fn clear_and_type(&self, selector: &str, text: &str) -> AutomationResult<()>;

    async fn press_enter(&self, selector: &str) -> AutomationResult<()>;

    /// Wait until the page body contains `marker`.
    async fn wait_for_text(
        &self,
        marker: &str,
        timeout: Duration,
        tolerance: Tolerance,
    ) -> AutomationResult<bool>;

    /// Full rendered text of the page body.
    async fn body_text(&self) -> AutomationResult<String>;

    /// Text of the first element matching `selector`, if present.
    async fn element_text(&self, selector: &str) -> AutomationResult<Option<String>>;

    /// Fixed settle interval between workflow steps.
    async fn settle(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// [`PageDriver`] over a live Chrome DevTools Protocol page.
pub struct CdpDriver {
    page: Page,
}

impl CdpDriver {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    async fn body_text_inner(&self) -> AutomationResult<String> {
        let result = self
            .page
            .evaluate("document.body ? document.body.innerText : ''")
            .await?;
        result
            .into_value::<String>()
            .map_err(|e| AutomationError::Evaluation(e.to_string()))
    }
}

#[async_trait]
impl PageDriver for CdpDriver {
    async fn navigate(
        &self,
        url: &str,
        timeout: Duration,
        tolerance: Tolerance,
    ) -> AutomationResult<()> {
        debug!(url = %url, "navigating");
        let nav = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<(), chromiumoxide::error::CdpError>(())
        };
        match tokio::time::timeout(timeout, nav).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(AutomationError::Cdp(e)),
            Err(_) => match tolerance {
                // Content may have partially rendered; proceed
                Tolerance::Soft => {
                    warn!(url = %url, "navigation timed out, continuing with partial content");
                    Ok(())
                }
                Tolerance::Hard => Err(AutomationError::Timeout {
                    what: format!("navigation to {}", url),
                    ms: timeout.as_millis() as u64,
                }),
            },
        }
    }

    async fn find_first(&self, selectors: &[&str]) -> AutomationResult<Option<String>> {
        for selector in selectors {
            if self.page.find_element(*selector).await.is_ok() {
                debug!(selector = %selector, "selector matched");
                return Ok(Some(selector.to_string()));
            }
        }
        Ok(None)
    }

    async fn wait_for_any(
        &self,
        selectors: &[&str],
        timeout: Duration,
    ) -> AutomationResult<Option<String>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Some(found) = self.find_first(selectors).await? {
                return Ok(Some(found));
            }
            if tokio::time::Instant::now() >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
    }

    async fn click(&self, selector: &str) -> AutomationResult<()> {
        let element = self.page.find_element(selector).await?;
        element.click().await?;
        pacing::pause().await;
        Ok(())
    }

    async fn clear_and_type(&self, selector: &str, text: &str) -> AutomationResult<()> {
        let element = self.page.find_element(selector).await?;
        element.click().await?;
        pacing::pause().await;

        // Clear any previous value before typing
        self.page
            .evaluate(format!(
                "(() => {{ const el = document.querySelector({:?}); if (el) el.value = ''; }})()",
                selector
            ))
            .await?;

        for ch in text.chars() {
            element.type_str(ch.to_string()).await?;
            tokio::time::sleep(pacing::typing_delay()).await;
        }
        Ok(())
    }

    async fn press_enter(&self, selector: &str) -> AutomationResult<()> {
        let element = self.page.find_element(selector).await?;
        element.press_key("Enter").await?;
        Ok(())
    }

    async fn wait_for_text(
        &self,
        marker: &str,
        timeout: Duration,
        tolerance: Tolerance,
    ) -> AutomationResult<bool> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let text = self.body_text_inner().await.unwrap_or_default();
            if text.to_lowercase().contains(&marker.to_lowercase()) {
                return Ok(true);
            }
            if tokio::time::Instant::now() >= deadline {
                return match tolerance {
                    Tolerance::Soft => {
                        warn!(marker = %marker, "marker never appeared, continuing");
                        Ok(false)
                    }
                    Tolerance::Hard => Err(AutomationError::Timeout {
                        what: format!("text marker {:?}", marker),
                        ms: timeout.as_millis() as u64,
                    }),
                };
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
    }

    async fn body_text(&self) -> AutomationResult<String> {
        self.body_text_inner().await
    }

    async fn element_text(&self, selector: &str) -> AutomationResult<Option<String>> {
        match self.page.find_element(selector).await {
            Ok(element) => {
                let text = element.inner_text().await?;
                Ok(text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()))
            }
            Err(_) => Ok(None),
        }
    }
}
