//! Reporting window type

use chrono::NaiveDate;
use std::fmt;

/// Inclusive date range covered by one export
///
/// `start > end` is representable; such a window simply contains no date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportingWindow {
    /// First day of the window
    pub start: NaiveDate,

    /// Last day of the window
    pub end: NaiveDate,
}

impl ReportingWindow {
    /// Create a window from its bounds
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` lies within `[start, end]`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether an optional date is acceptable: absent dates always are
    pub fn admits(&self, date: Option<NaiveDate>) -> bool {
        date.map_or(true, |d| self.contains(d))
    }
}

impl fmt::Display for ReportingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.start, self.end)
    }
}
