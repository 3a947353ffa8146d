//! Export command implementation
//!
//! This module implements the `export` command, which writes one week of
//! reconciled weclapp sales orders to a tab-delimited file.

use crate::cli::exit_code_for;
use crate::config::load_config_or_env;
use crate::core::export::{ExportRequest, OrderExporter};
use crate::log_error_with_context;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// First day of the window; without --end-date the window spans 7 days
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start_date: Option<NaiveDate>,

    /// Last day of the window; without --start-date the window spans 7 days
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end_date: Option<NaiveDate>,

    /// Output file (default: <output_dir>/<prefix>_<start>_<end>.csv)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Build the export request from the arguments
    pub fn request(&self) -> ExportRequest {
        ExportRequest {
            start_date: self.start_date,
            end_date: self.end_date,
            output_path: self.output.clone(),
            reference_date: None,
        }
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let config = match load_config_or_env(config_path) {
            Ok(config) => config,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(exit_code_for(&e));
            }
        };

        let exporter = match OrderExporter::new(&config) {
            Ok(exporter) => exporter,
            Err(e) => {
                log_error_with_context!(&e, "Failed to create weclapp client");
                eprintln!("{e}");
                return Ok(exit_code_for(&e));
            }
        };

        match exporter.export(self.request()).await {
            Ok(summary) => {
                println!("{}", summary.completion_message());
                Ok(0)
            }
            Err(e) => {
                log_error_with_context!(&e, "Export failed");
                eprintln!("Export failed: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
