//! Address decomposition tuned to Bangladesh address conventions.
//!
//! Map results for Bangladesh usually read
//! `[street], [area/thana], [city] [zip], [country]`, e.g.
//! `House 32, Road 2, Dhanmondi, Dhaka 1209, Bangladesh`. The rules below are
//! positional pattern matches for that one regional style, not a general
//! address parser. Addresses in other shapes produce plausible-looking but
//! wrong components; that is accepted.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::AddressComponents;

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("valid zip regex"));
static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid digits regex"));

/// City names whose presence marks the segment as a division capital.
/// Matched case-sensitively as substrings.
const DIVISION_CITIES: &[&str] = &["Dhaka", "Chittagong", "Sylhet"];

/// Split a raw address into components.
pub fn decompose_address(raw: &str) -> AddressComponents {
    let mut components = AddressComponents::new(raw);

    // Independent of segmentation below
    components.zip_code = ZIP_RE.find(raw).map(|m| m.as_str().to_string());

    // Empty segments keep their slot
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();

    if let Some(last) = parts.last() {
        components.country = Some(last.to_string());
    }

    if parts.len() >= 3 {
        let candidate = parts[parts.len() - 2];
        let thana = parts[parts.len() - 3];

        if DIGITS_RE.is_match(candidate) {
            // "Dhaka 1209" -> "Dhaka"
            let cleaned = DIGITS_RE.replace_all(candidate, "").trim().to_string();
            if DIVISION_CITIES.iter().any(|city| cleaned.contains(city)) {
                components.state_division = Some(format!("{} Division", cleaned));
            }
            components.city = Some(cleaned);
        } else {
            components.city = Some(candidate.to_string());
        }
        components.thana = Some(thana.to_string());
    }

    if components.district.is_none() {
        components.district = components
            .city
            .as_deref()
            .filter(|city| !city.is_empty())
            .map(|city| format!("{} District", city));
    }

    components
}
