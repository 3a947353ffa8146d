//! Export summary and reporting
//!
//! This module defines the descriptor returned by a finished export.

use crate::domain::ReportingWindow;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of an export operation
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// File the report was written to
    pub output_path: PathBuf,

    /// Number of order rows written (header excluded)
    pub rows_written: usize,

    /// Window the export covered
    pub window: ReportingWindow,

    /// Orders returned by weclapp before filtering
    pub orders_fetched: usize,

    /// Positions returned by weclapp before filtering
    pub positions_fetched: usize,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a summary for a written report
    pub fn new(output_path: PathBuf, rows_written: usize, window: ReportingWindow) -> Self {
        Self {
            output_path,
            rows_written,
            window,
            orders_fetched: 0,
            positions_fetched: 0,
            duration: Duration::ZERO,
        }
    }

    /// Record how many records were fetched
    pub fn with_fetched(mut self, orders: usize, positions: usize) -> Self {
        self.orders_fetched = orders;
        self.positions_fetched = positions;
        self
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Two-line completion message printed by the CLI
    pub fn completion_message(&self) -> String {
        format!(
            "Weclapp export complete: {} rows written for {}\nFile: {}",
            self.rows_written,
            self.window,
            self.output_path.display()
        )
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            path = %self.output_path.display(),
            rows = self.rows_written,
            start = %self.window.start,
            end = %self.window.end,
            orders_fetched = self.orders_fetched,
            positions_fetched = self.positions_fetched,
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        if self.rows_written == 0 {
            tracing::warn!(
                start = %self.window.start,
                end = %self.window.end,
                "No orders matched; report contains only the header"
            );
        }
    }
}
