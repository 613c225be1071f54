//! Long-lived browser session management.
//!
//! Launching Chrome costs seconds; lookups happen in bursts. The manager
//! keeps one browser alive across requests, relaunches it when the CDP
//! connection drops, and hands each request its own short-lived page.

use std::future::Future;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::browser::driver::CdpDriver;
use crate::error::{AutomationError, AutomationResult};

/// A live browser plus the task draining its CDP event stream.
///
/// The handler task ends when the browser connection dies, which is how
/// liveness is detected.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    fn is_connected(&self) -> bool {
        !self.handler.is_finished()
    }
}

/// Owns the process-wide browser session.
///
/// Injected into callers as an `Arc` rather than living in a module-level
/// global, which keeps it swappable in tests. The mutex serializes
/// ensure/relaunch, so two requests that both observe a dead browser
/// produce one relaunch, not two.
pub struct SessionManager {
    session: Mutex<Option<BrowserSession>>,
    headless: bool,
}

impl SessionManager {
    pub fn new(headless: bool) -> Self {
        Self {
            session: Mutex::new(None),
            headless,
        }
    }

    /// Whether a connected browser currently exists. Never launches one.
    pub async fn has_live_session(&self) -> bool {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|s| s.is_connected())
            .unwrap_or(false)
    }

    async fn launch(headless: bool) -> AutomationResult<BrowserSession> {
        info!(headless, "launching browser");
        let mut builder = BrowserConfig::builder()
            .window_size(1440, 900)
            .arg("--start-maximized");
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(AutomationError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| AutomationError::Launch(e.to_string()))?;

        // Drain CDP events; the loop ends when the connection drops
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
            debug!("browser event stream ended");
        });

        Ok(BrowserSession { browser, handler })
    }

    /// Ensure a connected browser and open a fresh page from it.
    ///
    /// A launch failure is returned to this caller only; nothing is
    /// cached, so the next request retries the launch from scratch.
    pub async fn page(&self) -> AutomationResult<Page> {
        let mut guard = self.session.lock().await;

        let needs_launch = match guard.as_ref() {
            Some(session) if session.is_connected() => false,
            Some(_) => {
                warn!("browser disconnected, relaunching");
                true
            }
            None => true,
        };

        if needs_launch {
            // Drop the dead session before launching its replacement
            *guard = None;
            *guard = Some(Self::launch(self.headless).await?);
        }

        let session = guard.as_ref().expect("session ensured above");
        let page = session.browser.new_page("about:blank").await?;
        Ok(page)
    }

    /// Run a workflow against a freshly opened page, closing the page on
    /// every exit path.
    pub async fn with_page<F, Fut, T>(&self, f: F) -> AutomationResult<T>
    where
        F: FnOnce(CdpDriver) -> Fut,
        Fut: Future<Output = AutomationResult<T>>,
    {
        let page = self.page().await?;
        let result = f(CdpDriver::new(page.clone())).await;

        if let Err(e) = page.close().await {
            warn!(error = %e, "failed to close page");
        }
        result
    }

    /// Abort the CDP handler task, making the session read as
    /// disconnected without touching the browser process.
    #[cfg(test)]
    async fn sever_connection(&self) {
        if let Some(session) = self.session.lock().await.as_ref() {
            session.handler.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::driver::PageDriver;
    use std::time::Duration;

    #[tokio::test]
    async fn test_no_session_before_first_use() {
        let manager = SessionManager::new(true);
        assert!(!manager.has_live_session().await);
    }

    // Needs a local Chrome; opt in with RUN_BROWSER_TESTS=1
    #[tokio::test]
    async fn test_relaunch_after_disconnect() {
        if std::env::var("RUN_BROWSER_TESTS").is_err() {
            return;
        }

        let manager = SessionManager::new(true);

        manager
            .with_page(|driver| async move { driver.body_text().await })
            .await
            .unwrap();
        assert!(manager.has_live_session().await);

        manager.sever_connection().await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!manager.has_live_session().await);

        // Next invocation relaunches on its own; each request gets a
        // fresh page, so the pre-disconnect handle is never reused
        manager
            .with_page(|driver| async move { driver.body_text().await })
            .await
            .unwrap();
        assert!(manager.has_live_session().await);
    }
}
