//! In-memory page used by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{BrowseError, PageElement, PageObservation};

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    text: Option<String>,
    attributes: HashMap<String, String>,
}

impl FakeElement {
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

#[async_trait]
impl PageElement for FakeElement {
    async fn text(&self) -> Result<Option<String>, BrowseError> {
        Ok(self.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, BrowseError> {
        Ok(self.attributes.get(name).cloned())
    }
}

#[derive(Debug, Default)]
pub struct FakePage {
    url: String,
    source: String,
    title: String,
    elements: HashMap<String, Vec<FakeElement>>,
    wait_errors: HashMap<String, String>,
    navigate_error: Option<String>,
    navigated: Mutex<Vec<String>>,
    settles: AtomicUsize,
    releases: AtomicUsize,
}

impl FakePage {
    /// A page whose current URL is `url` once loaded
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Append an element matched by `selector`
    pub fn with_element(mut self, selector: &str, element: FakeElement) -> Self {
        self.elements
            .entry(selector.to_string())
            .or_default()
            .push(element);
        self
    }

    /// Make waits on `selector` fail with a driver error
    pub fn with_wait_error(mut self, selector: &str, message: &str) -> Self {
        self.wait_errors
            .insert(selector.to_string(), message.to_string());
        self
    }

    pub fn with_navigate_error(mut self, message: &str) -> Self {
        self.navigate_error = Some(message.to_string());
        self
    }

    pub fn navigated(&self) -> Vec<String> {
        self.navigated.lock().unwrap().clone()
    }

    pub fn settle_calls(&self) -> usize {
        self.settles.load(Ordering::SeqCst)
    }

    pub fn release_calls(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageObservation for FakePage {
    type Element = FakeElement;

    async fn navigate(&self, url: &str) -> Result<(), BrowseError> {
        if let Some(message) = &self.navigate_error {
            return Err(BrowseError::Driver(message.clone()));
        }
        self.navigated.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn wait_for(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<FakeElement, BrowseError> {
        if let Some(message) = self.wait_errors.get(selector) {
            return Err(BrowseError::Driver(message.clone()));
        }
        self.elements
            .get(selector)
            .and_then(|found| found.first().cloned())
            .ok_or_else(|| BrowseError::Timeout {
                selector: selector.to_string(),
            })
    }

    async fn current_url(&self) -> Result<String, BrowseError> {
        Ok(self.url.clone())
    }

    async fn page_source(&self) -> Result<String, BrowseError> {
        Ok(self.source.clone())
    }

    async fn page_title(&self) -> Result<String, BrowseError> {
        Ok(self.title.clone())
    }

    async fn find_first(&self, selector: &str) -> Result<Option<FakeElement>, BrowseError> {
        Ok(self
            .elements
            .get(selector)
            .and_then(|found| found.first().cloned()))
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<FakeElement>, BrowseError> {
        Ok(self.elements.get(selector).cloned().unwrap_or_default())
    }

    async fn settle(&self, _delay: Duration) {
        self.settles.fetch_add(1, Ordering::SeqCst);
    }

    async fn release(&self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}
