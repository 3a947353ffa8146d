//! Export orchestration
//!
//! This module provides the top-level export logic:
//! - Export coordination ([`OrderExporter`])
//! - Summary and reporting ([`ExportSummary`])

pub mod coordinator;
pub mod summary;

pub use coordinator::{ExportRequest, OrderExporter};
pub use summary::ExportSummary;
