//! Errors raised at the verification boundary.

use thiserror::Error;

use crate::classify::BrowseError;

#[derive(Debug, Error)]
pub enum VerifyError {
    /// The browser could not be started
    #[error("Could not start browser backend: {0}")]
    BackendUnavailable(String),

    #[error("invalid search URL for \"{address}\": {reason}")]
    InvalidSearchUrl { address: String, reason: String },

    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: BrowseError,
    },
}
