//! Reporting window resolution
//!
//! An export covers one ISO week. Without explicit dates the week lies a
//! configurable number of weeks (default 2) before the week of the reference
//! date, so late-arriving completions are included.

use crate::domain::{ReportError, ReportingWindow, Result};
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Default distance, in ISO weeks, between the reference week and the exported week
pub const DEFAULT_WINDOW_OFFSET_WEEKS: u32 = 2;

/// Length of a window given by a single bound, in days after the start
const WINDOW_SPAN_DAYS: u64 = 6;

/// Monday..Sunday of the ISO week `offset_weeks` before the week of `reference`
///
/// # Errors
///
/// Returns a validation error if the target week falls outside the supported
/// calendar range.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use weclapp_export::core::window::compute_reporting_window;
///
/// let reference = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
/// let window = compute_reporting_window(reference, 2).unwrap();
/// assert_eq!(window.start, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
/// assert_eq!(window.end, NaiveDate::from_ymd_opt(2025, 1, 12).unwrap());
/// ```
pub fn compute_reporting_window(reference: NaiveDate, offset_weeks: u32) -> Result<ReportingWindow> {
    let iso = reference.iso_week();
    let mut year = iso.year();
    let mut week = i64::from(iso.week()) - i64::from(offset_weeks);

    while week <= 0 {
        year -= 1;
        week += i64::from(iso_weeks_in_year(year)?);
    }

    let week = u32::try_from(week).map_err(|_| out_of_range(reference, offset_weeks))?;
    let start = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
        .ok_or_else(|| out_of_range(reference, offset_weeks))?;
    let end = NaiveDate::from_isoywd_opt(year, week, Weekday::Sun)
        .ok_or_else(|| out_of_range(reference, offset_weeks))?;

    Ok(ReportingWindow::new(start, end))
}

/// Resolve the export window from optional bounds
///
/// - both bounds given: used as-is, even when `start > end`
/// - only `start`: the window ends six days later
/// - only `end`: the window starts six days earlier
/// - neither: [`compute_reporting_window`] for `reference`
///
/// # Errors
///
/// Returns a validation error if a derived bound leaves the calendar range.
pub fn determine_window(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    reference: NaiveDate,
    offset_weeks: u32,
) -> Result<ReportingWindow> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(ReportingWindow::new(start, end)),
        (Some(start), None) => {
            let end = start
                .checked_add_days(Days::new(WINDOW_SPAN_DAYS))
                .ok_or_else(|| ReportError::Validation(format!("No window end after {start}")))?;
            Ok(ReportingWindow::new(start, end))
        }
        (None, Some(end)) => {
            let start = end
                .checked_sub_days(Days::new(WINDOW_SPAN_DAYS))
                .ok_or_else(|| ReportError::Validation(format!("No window start before {end}")))?;
            Ok(ReportingWindow::new(start, end))
        }
        (None, None) => compute_reporting_window(reference, offset_weeks),
    }
}

/// Number of ISO weeks in `year` (52 or 53): the week of December 28
fn iso_weeks_in_year(year: i32) -> Result<u32> {
    NaiveDate::from_ymd_opt(year, 12, 28)
        .map(|d| d.iso_week().week())
        .ok_or_else(|| ReportError::Validation(format!("Year {year} is out of range")))
}

fn out_of_range(reference: NaiveDate, offset_weeks: u32) -> ReportError {
    ReportError::Validation(format!(
        "Reporting window {offset_weeks} weeks before {reference} is out of range"
    ))
}
