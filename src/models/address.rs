//! Decomposed address structure.

use serde::{Deserialize, Serialize};

/// Semantic components of a free-text address.
///
/// Everything except `full_address` is best-effort. Each field is either a
/// substring of the input or another field with a fixed suffix appended
/// (`district` is `city + " District"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponents {
    /// The address text the components were derived from
    pub full_address: String,

    /// First standalone 4-digit token (Bangladesh postcodes are 4 digits)
    pub zip_code: Option<String>,

    /// Local area / sub-district
    pub thana: Option<String>,

    pub city: Option<String>,

    pub district: Option<String>,

    /// Division, only set for a few well-known division capitals
    pub state_division: Option<String>,

    pub country: Option<String>,
}

impl AddressComponents {
    /// Create components carrying only the source text
    pub fn new(full_address: &str) -> Self {
        Self {
            full_address: full_address.to_string(),
            ..Self::default()
        }
    }
}
