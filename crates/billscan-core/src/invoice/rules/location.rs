//! Vendor location extraction.

use super::patterns::{LOCATION_LABEL, STREET_ADDRESS};
use super::{collapse_whitespace, first_capture};

/// Vendor location: an explicit `Location:` line when present, otherwise a
/// street line directly followed by a city/state/ZIP line.
pub fn extract_vendor_location(text: &str) -> Option<String> {
    if let Some(location) = first_capture(&[&*LOCATION_LABEL], text) {
        return Some(location);
    }

    first_capture(&[&*STREET_ADDRESS], text)
        .map(|address| collapse_whitespace(&address))
        .filter(|address| !address.is_empty())
}
