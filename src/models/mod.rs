//! Core data models for the verification system.

pub mod address;
pub mod outcome;
pub mod place;

pub use address::AddressComponents;
pub use outcome::VerificationOutcome;
pub use place::{CandidateResult, Coordinates, PlaceResult};
