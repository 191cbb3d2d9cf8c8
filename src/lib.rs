//! Mapverify - postal address verification against a map search page
//!
//! This library provides the classification and address decomposition engine
//! shared by the server and batch verification binaries.

pub mod browser;
pub mod classify;
pub mod config;
pub mod envelope;
pub mod error;
pub mod models;
pub mod parse;
pub mod verify;

pub use envelope::Envelope;
pub use models::{AddressComponents, CandidateResult, Coordinates, PlaceResult, VerificationOutcome};
pub use verify::Verifier;
