//! Date extraction and normalization.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::patterns::{DATE_FORMATS, DATE_PATTERN, DATE_WITHOUT_YEAR};
use super::{first_capture, FieldExtractor};
use crate::clock::{Clock, SystemClock};

/// Date field extractor.
///
/// Produces `YYYY-MM-DD` when the captured text parses with one of the known
/// formats, and the raw capture otherwise.
#[derive(Debug, Clone)]
pub struct DateExtractor {
    clock: Arc<dyn Clock>,
}

impl DateExtractor {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
        }
    }

    /// Use `clock` to resolve dates printed without a year.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    fn without_year(&self, text: &str) -> Option<String> {
        let raw = first_capture(&[&*DATE_WITHOUT_YEAR], text)?;
        let year = self.clock.today().year();
        let candidate = format!("{} {}", raw.replace('.', ""), year);

        let date = NaiveDate::parse_from_str(&candidate, "%B %d %Y").ok()?;
        debug!("Resolved year-less date {:?} against year {}", raw, year);
        Some(date.format("%Y-%m-%d").to_string())
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        match first_capture(&[&*DATE_PATTERN], text) {
            Some(raw) => Some(normalize_date(&raw).unwrap_or(raw)),
            None => self.without_year(text),
        }
    }
}

/// Normalize a captured date to `YYYY-MM-DD`.
///
/// Formats are tried in table order and the first that parses wins. Returns
/// `None` when none does, leaving the caller to fall back to the raw text.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .filter(|(shape, _)| shape.is_match(raw))
        .find_map(|(_, format)| NaiveDate::parse_from_str(raw, format).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}
