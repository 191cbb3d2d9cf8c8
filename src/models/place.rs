//! Matched place and disambiguation candidate structures.

use serde::{Deserialize, Serialize};

use super::AddressComponents;

/// Geographic point extracted from a map URL.
///
/// Both fields are set or neither is; construct through [`Coordinates::new`]
/// or [`Coordinates::unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// No coordinates could be extracted
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_known(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// A single confirmed place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    /// Heading of the place panel, or the query when unreadable
    pub place_name: String,

    /// Address text as shown by the map provider
    pub full_address: String,

    /// URL of the place page
    pub url: String,

    pub coordinates: Coordinates,

    pub components: AddressComponents,
}

/// One entry in a disambiguation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub place_name: String,
    pub url: String,
    pub coordinates: Coordinates,
}
