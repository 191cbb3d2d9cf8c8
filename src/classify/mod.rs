//! Map search outcome classification.
//!
//! A search either lands on a place page (`/place/` in the URL), stays on the
//! results list (`/search/`), or never renders a heading at all. The missing
//! heading is read as "not found or ambiguous": the provider does not make
//! the two distinguishable before a heading renders, so a slow results list
//! and an empty result both come out as [`VerificationOutcome::TimedOut`].
//! This is an approximation of the provider's behaviour, which is
//! undocumented and may change.

mod observation;

#[cfg(test)]
pub(crate) mod fake;

pub use observation::{BrowseError, PageElement, PageObservation};

use std::time::Duration;

use tracing::{debug, warn};

use crate::models::{CandidateResult, PlaceResult, VerificationOutcome};
use crate::parse::{decompose_address, extract_coordinates};

/// URL fragment of a resolved single place
pub const PLACE_MARKER: &str = "/place/";
/// URL fragment of a results list
pub const SEARCH_MARKER: &str = "/search/";

pub const HEADING_SELECTOR: &str = "h1";
pub const ADDRESS_SELECTOR: &str = "[data-item-id='address']";
pub const PLACE_LINK_SELECTOR: &str = "a.hfpxzc";

const LABEL_ATTRIBUTE: &str = "aria-label";
const HREF_ATTRIBUTE: &str = "href";
const ADDRESS_LABEL_PREFIX: &str = "Address: ";
const TITLE_SUFFIX: &str = " - Google Maps";

/// Page text the provider shows when nothing matched
const NOT_FOUND_PHRASES: &[&str] = &["can't find", "Make sure your search is spelled correctly"];

/// Timing and size limits for one classification
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Bounded wait for the heading that signals a rendered result
    pub heading_timeout: Duration,
    /// Bounded wait for result list links
    pub list_timeout: Duration,
    /// Pause before reading a place page
    pub settle_delay: Duration,
    pub max_candidates: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            heading_timeout: Duration::from_secs(10),
            list_timeout: Duration::from_secs(5),
            settle_delay: Duration::from_secs(2),
            max_candidates: 10,
        }
    }
}

/// Classify the page a search landed on.
///
/// Only the initial heading wait and reading the current URL can end in
/// [`VerificationOutcome::Error`]; every later read falls back to a default.
pub async fn classify<P: PageObservation>(
    page: &P,
    query: &str,
    config: &ClassifierConfig,
) -> VerificationOutcome {
    match page
        .wait_for(HEADING_SELECTOR, config.heading_timeout)
        .await
    {
        Ok(_) => {}
        Err(e) if e.is_timeout() => {
            debug!("No heading within {:?}", config.heading_timeout);
            return VerificationOutcome::TimedOut;
        }
        Err(e) => return VerificationOutcome::error(e.to_string()),
    }

    let current_url = match page.current_url().await {
        Ok(url) => url,
        Err(e) => return VerificationOutcome::error(e.to_string()),
    };
    debug!("Landed on {}", current_url);

    if current_url.contains(PLACE_MARKER) {
        page.settle(config.settle_delay).await;
        VerificationOutcome::Success(read_place(page, query, current_url).await)
    } else if current_url.contains(SEARCH_MARKER) {
        classify_results_list(page, config).await
    } else {
        VerificationOutcome::error("unknown state")
    }
}

async fn read_place<P: PageObservation>(page: &P, query: &str, url: String) -> PlaceResult {
    let place_name = heading_text(page)
        .await
        .unwrap_or_else(|| query.to_string());

    let full_address = match address_label(page).await {
        Some(address) => address,
        None => title_address(page).await,
    };

    PlaceResult {
        place_name,
        coordinates: extract_coordinates(&url),
        components: decompose_address(&full_address),
        full_address,
        url,
    }
}

async fn classify_results_list<P: PageObservation>(
    page: &P,
    config: &ClassifierConfig,
) -> VerificationOutcome {
    let source = page.page_source().await.unwrap_or_else(|e| {
        warn!("Could not read page source: {}", e);
        String::new()
    });

    if NOT_FOUND_PHRASES
        .iter()
        .any(|phrase| source.contains(phrase))
    {
        return VerificationOutcome::NotFound;
    }

    if let Err(e) = page
        .wait_for(PLACE_LINK_SELECTOR, config.list_timeout)
        .await
    {
        debug!("Result list links unavailable: {}", e);
        return VerificationOutcome::AmbiguousUnparsed;
    }

    let links = match page.find_all(PLACE_LINK_SELECTOR).await {
        Ok(links) => links,
        Err(e) => {
            warn!("Could not enumerate result links: {}", e);
            return VerificationOutcome::AmbiguousUnparsed;
        }
    };

    let mut candidates = Vec::new();
    for link in links.iter().take(config.max_candidates) {
        if let Some(candidate) = read_candidate(link).await {
            candidates.push(candidate);
        }
    }

    debug!(
        "Read {} candidates from {} result links",
        candidates.len(),
        links.len()
    );

    if candidates.is_empty() {
        VerificationOutcome::AmbiguousUnparsed
    } else {
        VerificationOutcome::AmbiguousList { candidates }
    }
}

async fn read_candidate<E: PageElement>(link: &E) -> Option<CandidateResult> {
    let url = non_empty(link.attribute(HREF_ATTRIBUTE).await.ok().flatten())?;
    let place_name = non_empty(link.attribute(LABEL_ATTRIBUTE).await.ok().flatten())?;
    if !url.contains(PLACE_MARKER) {
        return None;
    }

    Some(CandidateResult {
        place_name,
        coordinates: extract_coordinates(&url),
        url,
    })
}

/// Text of the first heading
async fn heading_text<P: PageObservation>(page: &P) -> Option<String> {
    let heading = page.find_first(HEADING_SELECTOR).await.ok().flatten()?;
    non_empty(heading.text().await.ok().flatten())
}

/// Address from the labelled address button, without its "Address: " prefix
async fn address_label<P: PageObservation>(page: &P) -> Option<String> {
    let element = page.find_first(ADDRESS_SELECTOR).await.ok().flatten()?;
    let label = element.attribute(LABEL_ATTRIBUTE).await.ok().flatten()?;
    Some(
        label
            .strip_prefix(ADDRESS_LABEL_PREFIX)
            .unwrap_or(&label)
            .to_string(),
    )
}

/// Page title without the provider suffix, empty when unreadable
async fn title_address<P: PageObservation>(page: &P) -> String {
    page.page_title()
        .await
        .map(|title| title.replace(TITLE_SUFFIX, ""))
        .unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
