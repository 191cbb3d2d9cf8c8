//! Response envelope built from a verification outcome.

use axum::http::StatusCode;
use serde::Serialize;

use crate::models::{CandidateResult, PlaceResult, VerificationOutcome};

pub const AMBIGUOUS_MESSAGE: &str = "Multiple locations found. Please be more specific.";
pub const NOT_FOUND_MESSAGE: &str = "Google Maps explicitly returned no results.";
pub const TIMED_OUT_MESSAGE: &str = "Address not found or ambiguous on Google Maps.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Fake,
    FakeOrAmbiguous,
    Ambiguous,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verification {
    Real,
    Fake,
    Uncertain,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnvelopeData {
    Place(PlaceResult),
    Candidates { candidates: Vec<CandidateResult> },
}

/// Uniform response shape.
///
/// `status` and `verification` are always present. For a given `status` the
/// presence of `data` and `message` is fixed:
/// - success: `data` (place)
/// - ambiguous: `data` (candidates, possibly empty) and `message`
/// - fake, fake_or_ambiguous, error: `message`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub status: Status,
    pub verification: Verification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<EnvelopeData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    fn with_message(status: Status, verification: Verification, message: &str) -> Self {
        Self {
            status,
            verification,
            data: None,
            message: Some(message.to_string()),
        }
    }

    /// Request rejected before verification (e.g. missing address)
    pub fn rejected(message: &str) -> Self {
        Self::with_message(Status::Error, Verification::Uncertain, message)
    }

    /// HTTP status the envelope is served with. Input rejections use
    /// [`StatusCode::BAD_REQUEST`] directly and never go through here.
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            Status::Success | Status::Ambiguous => StatusCode::OK,
            Status::Fake | Status::FakeOrAmbiguous => StatusCode::NOT_FOUND,
            Status::Error => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<VerificationOutcome> for Envelope {
    fn from(outcome: VerificationOutcome) -> Self {
        match outcome {
            VerificationOutcome::Success(place) => Self {
                status: Status::Success,
                verification: Verification::Real,
                data: Some(EnvelopeData::Place(place)),
                message: None,
            },
            VerificationOutcome::AmbiguousList { candidates } => Self {
                status: Status::Ambiguous,
                verification: Verification::Uncertain,
                data: Some(EnvelopeData::Candidates { candidates }),
                message: Some(AMBIGUOUS_MESSAGE.to_string()),
            },
            VerificationOutcome::AmbiguousUnparsed => Self {
                status: Status::Ambiguous,
                verification: Verification::Uncertain,
                data: Some(EnvelopeData::Candidates {
                    candidates: Vec::new(),
                }),
                message: Some(AMBIGUOUS_MESSAGE.to_string()),
            },
            VerificationOutcome::NotFound => {
                Self::with_message(Status::Fake, Verification::Fake, NOT_FOUND_MESSAGE)
            }
            VerificationOutcome::TimedOut => Self::with_message(
                Status::FakeOrAmbiguous,
                Verification::Fake,
                TIMED_OUT_MESSAGE,
            ),
            VerificationOutcome::Error { message } => {
                Self::with_message(Status::Error, Verification::Uncertain, &message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use crate::parse::decompose_address;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let place = PlaceResult {
            place_name: "Dhanmondi Lake".to_string(),
            full_address: "Dhanmondi, Dhaka 1209, Bangladesh".to_string(),
            url: "https://www.google.com/maps/place/X/@23.7,90.3,17z".to_string(),
            coordinates: Coordinates::new(23.7, 90.3),
            components: decompose_address("Dhanmondi, Dhaka 1209, Bangladesh"),
        };
        let envelope = Envelope::from(VerificationOutcome::Success(place));
        assert_eq!(envelope.http_status(), StatusCode::OK);

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["verification"], "real");
        assert_eq!(value["data"]["place_name"], "Dhanmondi Lake");
        assert_eq!(value["data"]["coordinates"]["latitude"], 23.7);
        assert_eq!(value["data"]["components"]["state_division"], "Dhaka Division");
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_ambiguous_shapes_match() {
        let listed = serde_json::to_value(Envelope::from(VerificationOutcome::AmbiguousList {
            candidates: vec![CandidateResult {
                place_name: "Shop".to_string(),
                url: "https://www.google.com/maps/place/Shop".to_string(),
                coordinates: Coordinates::unknown(),
            }],
        }))
        .unwrap();
        let unparsed =
            serde_json::to_value(Envelope::from(VerificationOutcome::AmbiguousUnparsed)).unwrap();

        for value in [&listed, &unparsed] {
            assert_eq!(value["status"], "ambiguous");
            assert_eq!(value["verification"], "uncertain");
            assert_eq!(value["message"], AMBIGUOUS_MESSAGE);
            assert!(value["data"]["candidates"].is_array());
        }
        assert_eq!(listed["data"]["candidates"][0]["coordinates"]["latitude"], json!(null));
        assert_eq!(unparsed["data"]["candidates"], json!([]));
    }

    #[test]
    fn test_negative_envelopes() {
        let not_found = Envelope::from(VerificationOutcome::NotFound);
        assert_eq!(not_found.status, Status::Fake);
        assert_eq!(not_found.verification, Verification::Fake);
        assert_eq!(not_found.http_status(), StatusCode::NOT_FOUND);

        let timed_out = Envelope::from(VerificationOutcome::TimedOut);
        assert_eq!(timed_out.status, Status::FakeOrAmbiguous);
        assert_eq!(timed_out.verification, Verification::Fake);
        assert_eq!(timed_out.message.as_deref(), Some(TIMED_OUT_MESSAGE));
        assert_eq!(timed_out.http_status(), StatusCode::NOT_FOUND);

        let value = serde_json::to_value(&timed_out).unwrap();
        assert_eq!(value["status"], "fake_or_ambiguous");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_error_envelope() {
        let envelope = Envelope::from(VerificationOutcome::error("unknown state"));
        assert_eq!(envelope.status, Status::Error);
        assert_eq!(envelope.verification, Verification::Uncertain);
        assert_eq!(envelope.message.as_deref(), Some("unknown state"));
        assert_eq!(envelope.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
