//! Address verification entry point.

use tracing::{error, info, info_span, Instrument};
use url::Url;
use uuid::Uuid;

use crate::browser::{BrowserSession, BrowserSettings};
use crate::classify::{classify, ClassifierConfig, PageObservation};
use crate::config::Config;
use crate::error::VerifyError;
use crate::models::VerificationOutcome;

/// Runs address verifications. Holds configuration only; every call
/// launches and releases its own browser session.
#[derive(Debug, Clone)]
pub struct Verifier {
    search_base: String,
    classifier: ClassifierConfig,
    browser: BrowserSettings,
}

impl Verifier {
    pub fn new(config: &Config) -> Self {
        Self {
            search_base: config.search.base_url.clone(),
            classifier: config.classifier(),
            browser: config.browser(),
        }
    }

    /// Verify `address` against the map provider.
    ///
    /// `address` is expected to be non-empty; blank input is rejected by the
    /// caller. Never retries.
    pub async fn verify(&self, address: &str) -> VerificationOutcome {
        let span = info_span!("verify", query_id = %Uuid::new_v4(), address);

        async {
            let session = match BrowserSession::launch(&self.browser).await {
                Ok(session) => session,
                Err(e) => {
                    error!("{}", e);
                    return VerificationOutcome::error(e.to_string());
                }
            };
            self.verify_with(&session, address).await
        }
        .instrument(span)
        .await
    }

    /// Verify using an already acquired page. The page is released before
    /// returning, whatever the outcome.
    pub async fn verify_with<P: PageObservation>(
        &self,
        page: &P,
        address: &str,
    ) -> VerificationOutcome {
        let outcome = match self.search_and_classify(page, address).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Verification failed: {}", e);
                VerificationOutcome::error(e.to_string())
            }
        };
        page.release().await;

        info!(outcome = outcome.label(), "Verification finished");
        outcome
    }

    async fn search_and_classify<P: PageObservation>(
        &self,
        page: &P,
        address: &str,
    ) -> Result<VerificationOutcome, VerifyError> {
        let url = self.search_url(address)?;
        info!("Searching: {}", url);

        page.navigate(url.as_str())
            .await
            .map_err(|source| VerifyError::Navigation {
                url: url.to_string(),
                source,
            })?;

        Ok(classify(page, address, &self.classifier).await)
    }

    /// Search page URL with `address` appended as a single path segment
    pub fn search_url(&self, address: &str) -> Result<Url, VerifyError> {
        let invalid = |reason: String| VerifyError::InvalidSearchUrl {
            address: address.to_string(),
            reason,
        };

        let mut url = Url::parse(&self.search_base).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("base URL cannot take path segments".to_string()))?
            .pop_if_empty()
            .push(address);
        Ok(url)
    }
}
