//! Testing utilities including mock implementations.
//!
//! [`MockPage`] stands in for a live browser page so workflow logic can be
//! exercised deterministically, with call recording for assertions.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::browser::{PageDriver, Tolerance};
use crate::error::{AutomationError, AutomationResult};

/// Record of a call made to the mock page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCall {
    Navigate { url: String },
    Click { selector: String },
    Type { selector: String, text: String },
    PressEnter { selector: String },
}

/// A scripted page driver for testing.
///
/// Configure which selectors exist, what the body text says, and what
/// individual elements contain; every interaction is recorded.
#[derive(Default)]
pub struct MockPage {
    /// Selectors that "exist" on the page
    selectors: Arc<RwLock<HashSet<String>>>,

    /// Full body text returned by text reads
    body_text: Arc<RwLock<String>>,

    /// Per-selector element text
    element_texts: Arc<RwLock<HashMap<String, String>>>,

    /// Interactions, in order
    calls: Arc<RwLock<Vec<PageCall>>>,
}

impl MockPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a selector as present on the page.
    pub fn with_selector(self, selector: impl Into<String>) -> Self {
        self.selectors.write().unwrap().insert(selector.into());
        self
    }

    /// Set the rendered body text.
    pub fn with_body_text(self, text: impl Into<String>) -> Self {
        *self.body_text.write().unwrap() = text.into();
        self
    }

    /// Set the text of one element.
    pub fn with_element_text(self, selector: impl Into<String>, text: impl Into<String>) -> Self {
        self.element_texts
            .write()
            .unwrap()
            .insert(selector.into(), text.into());
        self
    }

    /// All interactions recorded so far.
    pub fn calls(&self) -> Vec<PageCall> {
        self.calls.read().unwrap().clone()
    }

    fn record(&self, call: PageCall) {
        self.calls.write().unwrap().push(call);
    }

    fn first_present(&self, selectors: &[&str]) -> Option<String> {
        let present = self.selectors.read().unwrap();
        selectors
            .iter()
            .find(|s| present.contains(**s))
            .map(|s| s.to_string())
    }
}

#[async_trait]
impl PageDriver for MockPage {
    async fn navigate(
        &self,
        url: &str,
        _timeout: Duration,
        _tolerance: Tolerance,
    ) -> AutomationResult<()> {
        self.record(PageCall::Navigate {
            url: url.to_string(),
        });
        Ok(())
    }

    async fn find_first(&self, selectors: &[&str]) -> AutomationResult<Option<String>> {
        Ok(self.first_present(selectors))
    }

    async fn wait_for_any(
        &self,
        selectors: &[&str],
        _timeout: Duration,
    ) -> AutomationResult<Option<String>> {
        Ok(self.first_present(selectors))
    }

    async fn click(&self, selector: &str) -> AutomationResult<()> {
        self.record(PageCall::Click {
            selector: selector.to_string(),
        });
        Ok(())
    }

    async fn clear_and_type(&self, selector: &str, text: &str) -> AutomationResult<()> {
        self.record(PageCall::Type {
            selector: selector.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn press_enter(&self, selector: &str) -> AutomationResult<()> {
        self.record(PageCall::PressEnter {
            selector: selector.to_string(),
        });
        Ok(())
    }

    async fn wait_for_text(
        &self,
        marker: &str,
        timeout: Duration,
        tolerance: Tolerance,
    ) -> AutomationResult<bool> {
        let found = self
            .body_text
            .read()
            .unwrap()
            .to_lowercase()
            .contains(&marker.to_lowercase());
        if found {
            return Ok(true);
        }
        match tolerance {
            Tolerance::Soft => Ok(false),
            Tolerance::Hard => Err(AutomationError::Timeout {
                what: format!("text marker {:?}", marker),
                ms: timeout.as_millis() as u64,
            }),
        }
    }

    async fn body_text(&self) -> AutomationResult<String> {
        Ok(self.body_text.read().unwrap().clone())
    }

    async fn element_text(&self, selector: &str) -> AutomationResult<Option<String>> {
        Ok(self.element_texts.read().unwrap().get(selector).cloned())
    }

    // Mock steps settle instantly so polling-budget tests stay fast
    async fn settle(&self, _duration: Duration) {}
}
