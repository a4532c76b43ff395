//! Dynamic fetch: renders client-side permit portals in headless Chromium.
//!
//! Each fetch owns a whole browser process: launch, navigate, wait the settle
//! duration, read the rendered DOM, close. The process never outlives the
//! call that started it.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use permitscout_core::SourceDescriptor;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{FetchError, PermitFetcher};

/// There is no readiness signal to wait on, so rendering is given a fixed
/// interval. Override per deployment.
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(5);
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// Wait between navigation completing and reading the DOM.
    pub settle: Duration,
    pub navigation_timeout: Duration,
    /// Chromium binary; auto-detected when unset.
    pub chrome_path: Option<PathBuf>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            settle: DEFAULT_SETTLE,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            chrome_path: None,
        }
    }
}

/// Fetches permit pages that only populate their tables via JavaScript.
pub struct BrowserFetcher {
    settings: BrowserSettings,
}

impl BrowserFetcher {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl PermitFetcher for BrowserFetcher {
    async fn fetch(&self, source: &SourceDescriptor) -> Result<String, FetchError> {
        let session = BrowserSession::launch(&self.settings).await?;
        let rendered = session.render(source.as_str(), &self.settings).await;
        session.close().await;
        rendered
    }
}

/// A launched Chromium process plus the task pumping its CDP events.
struct BrowserSession {
    browser: Browser,
    events: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(settings: &BrowserSettings) -> Result<Self, FetchError> {
        let mut builder = BrowserConfig::builder()
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .request_timeout(settings.navigation_timeout);
        if let Some(path) = &settings.chrome_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| FetchError::Browser(format!("invalid browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| FetchError::Browser(format!("failed to launch Chromium: {e}")))?;

        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });
        debug!("browser session started");

        Ok(Self { browser, events })
    }

    async fn render(&self, url: &str, settings: &BrowserSettings) -> Result<String, FetchError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| FetchError::Browser(format!("failed to open page: {e}")))?;

        info!(url = %url, "rendering permit page");
        match tokio::time::timeout(settings.navigation_timeout, page.goto(url)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(FetchError::Browser(format!("navigation failed: {e}"))),
            Err(_) => {
                return Err(FetchError::Browser(format!(
                    "navigation timed out after {}ms",
                    settings.navigation_timeout.as_millis()
                )));
            }
        }
        if let Err(e) = page.wait_for_navigation().await {
            debug!(url = %url, error = %e, "wait for navigation failed; reading DOM anyway");
        }

        tokio::time::sleep(settings.settle).await;

        let html: String = page
            .evaluate("document.documentElement.outerHTML")
            .await
            .map_err(|e| FetchError::Browser(format!("failed to read DOM: {e}")))?
            .into_value()
            .map_err(|e| FetchError::Browser(format!("failed to decode DOM: {e:?}")))?;

        info!(url = %url, bytes = html.len(), "rendered permit page");
        Ok(html)
    }

    /// Shut the browser down and reap the process. Errors are logged only:
    /// the fetch result is already decided by the time this runs.
    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "browser close failed, killing process");
            let _ = self.browser.kill().await;
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "failed to reap browser process");
        }
        self.events.abort();
        debug!("browser session closed");
    }
}

impl Drop for BrowserSession {
    // Covers early exits (panic, cancelled future) that skip `close`;
    // `Browser`'s own drop kills a still-running child.
    fn drop(&mut self) {
        self.events.abort();
    }
}
