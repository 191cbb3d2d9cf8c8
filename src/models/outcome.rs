//! Verification outcome produced once per query.

use serde::Serialize;

use super::{CandidateResult, PlaceResult};

/// Result of classifying one map search.
///
/// Exactly one variant is produced per query. Everything except `Error` is a
/// definite classification rather than a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// The search resolved to one specific place
    Success(PlaceResult),
    /// The search stayed on a results list with readable entries
    AmbiguousList { candidates: Vec<CandidateResult> },
    /// The search stayed on a results list but no entry could be read
    AmbiguousUnparsed,
    /// The provider explicitly reported no results
    NotFound,
    /// No heading rendered within the bounded wait
    TimedOut,
    Error { message: String },
}

impl VerificationOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        VerificationOutcome::Error {
            message: message.into(),
        }
    }

    /// Short label used in logs and batch summaries
    pub fn label(&self) -> &'static str {
        match self {
            VerificationOutcome::Success(_) => "success",
            VerificationOutcome::AmbiguousList { .. } => "ambiguous_list",
            VerificationOutcome::AmbiguousUnparsed => "ambiguous_unparsed",
            VerificationOutcome::NotFound => "not_found",
            VerificationOutcome::TimedOut => "timed_out",
            VerificationOutcome::Error { .. } => "error",
        }
    }
}

impl std::fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationOutcome::Success(place) => write!(f, "success ({})", place.place_name),
            VerificationOutcome::AmbiguousList { candidates } => {
                write!(f, "ambiguous ({} candidates)", candidates.len())
            }
            VerificationOutcome::Error { message } => write!(f, "error: {}", message),
            other => write!(f, "{}", other.label()),
        }
    }
}
