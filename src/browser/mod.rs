//! Headless Chromium session backing [`PageObservation`].
//!
//! One session is launched per query and torn down when the query finishes.
//! Settings are passed in explicitly so concurrent queries never share
//! browser state.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::classify::{BrowseError, PageElement, PageObservation};
use crate::error::VerifyError;

/// How often `wait_for` re-queries the DOM
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Launch options for one browser session
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub headless: bool,
    pub no_sandbox: bool,
    pub disable_dev_shm_usage: bool,
    pub disable_gpu: bool,
    pub user_agent: String,
    /// Chromium binary; auto-detected when unset
    pub chrome_executable: Option<PathBuf>,
    /// Timeout for individual CDP requests
    pub request_timeout: Duration,
}

impl BrowserSettings {
    /// Extra command line flags passed to Chromium
    fn extra_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.disable_dev_shm_usage {
            args.push("--disable-dev-shm-usage".to_string());
        }
        if self.disable_gpu {
            args.push("--disable-gpu".to_string());
        }
        if !self.user_agent.is_empty() {
            args.push(format!("--user-agent={}", self.user_agent));
        }
        args
    }

    fn launch_config(&self) -> Result<BrowserConfig, String> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(self.request_timeout)
            .args(self.extra_args());

        if !self.headless {
            builder = builder.with_head();
        }
        if self.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder.build()
    }
}

/// A running Chromium instance with a single page
pub struct BrowserSession {
    browser: Mutex<Option<Browser>>,
    page: Page,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch Chromium and open a blank page
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, VerifyError> {
        let config = settings
            .launch_config()
            .map_err(VerifyError::BackendUnavailable)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| VerifyError::BackendUnavailable(e.to_string()))?;

        // The CDP connection only makes progress while the handler is polled
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!("Failed to close browser after page error: {}", close_err);
                }
                handler.abort();
                return Err(VerifyError::BackendUnavailable(e.to_string()));
            }
        };

        info!("Browser session started");

        Ok(Self {
            browser: Mutex::new(Some(browser)),
            page,
            handler,
        })
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

/// Whether a `find_element` failure only means the selector matched nothing
/// yet. CDP answers a missing node with a protocol error response; transport
/// failures (websocket, channel, request timeout) mean the session is gone.
fn is_missing_node(e: &CdpError) -> bool {
    matches!(e, CdpError::NotFound | CdpError::Chrome(_))
}

fn driver_error(e: impl std::fmt::Display) -> BrowseError {
    BrowseError::Driver(e.to_string())
}

#[async_trait]
impl PageElement for Element {
    async fn text(&self) -> Result<Option<String>, BrowseError> {
        Element::inner_text(self).await.map_err(driver_error)
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, BrowseError> {
        Element::attribute(self, name).await.map_err(driver_error)
    }
}

#[async_trait]
impl PageObservation for BrowserSession {
    type Element = Element;

    async fn navigate(&self, url: &str) -> Result<(), BrowseError> {
        self.page.goto(url).await.map_err(driver_error)?;
        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<Element, BrowseError> {
        let poll = async {
            loop {
                match self.page.find_element(selector).await {
                    Ok(element) => return Ok(element),
                    Err(e) if is_missing_node(&e) => {}
                    Err(e) => return Err(driver_error(e)),
                }
                // A miss on a dead page must not look like a slow render
                if let Err(e) = self.page.url().await {
                    return Err(driver_error(e));
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        match tokio::time::timeout(timeout, poll).await {
            Ok(result) => result,
            Err(_) => Err(BrowseError::Timeout {
                selector: selector.to_string(),
            }),
        }
    }

    async fn current_url(&self) -> Result<String, BrowseError> {
        let url = self.page.url().await.map_err(driver_error)?;
        Ok(url.unwrap_or_default())
    }

    async fn page_source(&self) -> Result<String, BrowseError> {
        self.page.content().await.map_err(driver_error)
    }

    async fn page_title(&self) -> Result<String, BrowseError> {
        let title = self.page.get_title().await.map_err(driver_error)?;
        Ok(title.unwrap_or_default())
    }

    async fn find_first(&self, selector: &str) -> Result<Option<Element>, BrowseError> {
        // CDP reports a missing node as an error
        Ok(self.page.find_element(selector).await.ok())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Element>, BrowseError> {
        self.page
            .find_elements(selector)
            .await
            .map_err(driver_error)
    }

    async fn release(&self) {
        let Some(mut browser) = self.browser.lock().await.take() else {
            return;
        };

        if let Err(e) = browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        self.handler.abort();
        debug!("Browser session released");
    }
}
