//! Export coordinator - main orchestrator for the export process
//!
//! This module coordinates one export run: resolving the window, fetching
//! orders and positions from weclapp, reconciling them and writing the report.

use crate::adapters::weclapp::WeclappClient;
use crate::config::{AppConfig, ExportConfig};
use crate::core::export::summary::ExportSummary;
use crate::core::output::{default_output_path, write_report};
use crate::core::reconcile::{prepare_order_rows, ExportPolicy};
use crate::core::window::determine_window;
use crate::domain::Result;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Instant;

/// Parameters of one export run
///
/// All fields are optional; an empty request exports the default week into
/// the configured directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRequest {
    /// First day of the window
    pub start_date: Option<NaiveDate>,

    /// Last day of the window
    pub end_date: Option<NaiveDate>,

    /// Explicit output file, instead of the derived default
    pub output_path: Option<PathBuf>,

    /// Date the default window is computed from (today when absent)
    pub reference_date: Option<NaiveDate>,
}

/// Export coordinator
pub struct OrderExporter {
    client: WeclappClient,
    policy: ExportPolicy,
    export: ExportConfig,
}

impl OrderExporter {
    /// Create an exporter talking to weclapp over HTTP
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the weclapp connection parameters are
    /// missing.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = WeclappClient::new(&config.weclapp)?;
        Ok(Self::with_client(client, config.policy.clone(), config.export.clone()))
    }

    /// Create an exporter from an existing client
    pub fn with_client(client: WeclappClient, policy: ExportPolicy, export: ExportConfig) -> Self {
        Self {
            client,
            policy,
            export,
        }
    }

    /// Execute the export
    ///
    /// This is the main entry point for the export process. It:
    /// 1. Resolves the reporting window
    /// 2. Fetches orders, then positions (status-filtered)
    /// 3. Reconciles them into sorted rows
    /// 4. Writes the report and returns its summary
    ///
    /// # Errors
    ///
    /// Any fetch or write error aborts the run.
    pub async fn export(&self, request: ExportRequest) -> Result<ExportSummary> {
        let start_time = Instant::now();

        let reference = request
            .reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let window = determine_window(
            request.start_date,
            request.end_date,
            reference,
            self.export.window_offset_weeks,
        )?;

        tracing::info!(
            start = %window.start,
            end = %window.end,
            channels = self.policy.allowed_channels.len(),
            "Starting export process"
        );

        let orders = self
            .client
            .fetch_orders(window.start, window.end, &self.policy.allowed_channels)
            .await?;

        let status = Some(self.export.position_status.as_str()).filter(|s| !s.is_empty());
        let positions = self
            .client
            .fetch_positions(window.start, window.end, &self.policy.allowed_channels, status)
            .await?;

        let rows = prepare_order_rows(&orders, &positions, &window, &self.policy);

        let output_path = request.output_path.unwrap_or_else(|| {
            default_output_path(&self.export.output_dir, &self.export.file_prefix, &window)
        });
        write_report(&rows, &output_path)?;

        let summary = ExportSummary::new(output_path, rows.len(), window)
            .with_fetched(orders.len(), positions.len())
            .with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }
}
