//! Coordinate extraction from map place URLs.
//!
//! Two encodings show up in place URLs:
//! - the viewport centre, `.../@23.7461,90.3742,17z/...`
//! - the data blob markers, `...!3d23.7461!4d90.3742...`, each starting a
//!   `!`-separated field

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Coordinates;

static AT_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([-+]?\d+\.\d+),([-+]?\d+\.\d+)").expect("valid viewport coordinate regex")
});
static LAT_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!3d([-+]?\d+\.\d+)").expect("valid latitude marker regex"));
static LNG_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!4d([-+]?\d+\.\d+)").expect("valid longitude marker regex"));

/// Extract latitude/longitude from a place URL.
///
/// The `@lat,lng` form takes priority over the `3d`/`4d` markers. Extraction
/// is all-or-nothing: any missing or unparsable half yields
/// [`Coordinates::unknown`].
pub fn extract_coordinates(url: &str) -> Coordinates {
    from_at_pair(url)
        .or_else(|| from_markers(url))
        .unwrap_or_else(Coordinates::unknown)
}

fn from_at_pair(url: &str) -> Option<Coordinates> {
    let caps = AT_PAIR_RE.captures(url)?;
    let lat = caps[1].parse::<f64>().ok()?;
    let lng = caps[2].parse::<f64>().ok()?;
    Some(Coordinates::new(lat, lng))
}

fn from_markers(url: &str) -> Option<Coordinates> {
    let lat = LAT_MARKER_RE.captures(url)?[1].parse::<f64>().ok()?;
    let lng = LNG_MARKER_RE.captures(url)?[1].parse::<f64>().ok()?;
    Some(Coordinates::new(lat, lng))
}
