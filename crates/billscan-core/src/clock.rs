//! Source of "today" for the few extraction rules that depend on it.

use std::fmt::Debug;

use chrono::{Local, NaiveDate};

/// Provides the current date.
///
/// Only the year-less date fallback consults the clock; every other rule is a
/// pure function of the document text.
pub trait Clock: Debug + Send + Sync {
    /// Today's date in the local calendar.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date, for reproducible runs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
