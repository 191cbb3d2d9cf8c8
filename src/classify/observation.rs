//! Abstract view of a loaded map page.
//!
//! The classifier only ever talks to these traits; the browser module provides
//! the Chromium implementation and tests provide an in-memory one.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Failure while observing a page
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BrowseError {
    #[error("timed out waiting for '{selector}'")]
    Timeout { selector: String },

    #[error("browser driver error: {0}")]
    Driver(String),
}

impl BrowseError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, BrowseError::Timeout { .. })
    }
}

/// A DOM element handle
#[async_trait]
pub trait PageElement: Send + Sync {
    /// Rendered text of the element
    async fn text(&self) -> Result<Option<String>, BrowseError>;

    async fn attribute(&self, name: &str) -> Result<Option<String>, BrowseError>;
}

/// A single browsing session scoped to one query.
#[async_trait]
pub trait PageObservation: Send + Sync {
    type Element: PageElement;

    async fn navigate(&self, url: &str) -> Result<(), BrowseError>;

    /// Wait up to `timeout` for `selector` to match, returning the first match.
    /// Gives [`BrowseError::Timeout`] if nothing appears in time.
    async fn wait_for(&self, selector: &str, timeout: Duration)
        -> Result<Self::Element, BrowseError>;

    async fn current_url(&self) -> Result<String, BrowseError>;

    async fn page_source(&self) -> Result<String, BrowseError>;

    async fn page_title(&self) -> Result<String, BrowseError>;

    async fn find_first(&self, selector: &str) -> Result<Option<Self::Element>, BrowseError>;

    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>, BrowseError>;

    /// Give client-side rendering time to finish
    async fn settle(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }

    /// Tear down the session. Calling it more than once is a no-op.
    async fn release(&self);
}
