//! Result type alias for the exporter
//!
//! This module provides a convenient Result type alias that uses ReportError
//! as the error type.

use super::errors::ReportError;

/// Result type alias for exporter operations
///
/// # Examples
///
/// ```
/// use weclapp_export::domain::result::Result;
/// use weclapp_export::domain::errors::ReportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ReportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ReportError>;
