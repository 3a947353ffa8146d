//! Core business logic for the exporter.
//!
//! # Modules
//!
//! - [`window`] - Reporting window resolution (ISO weeks)
//! - [`reconcile`] - Admission policy, filters and row aggregation
//! - [`output`] - Tab-delimited report writer
//! - [`export`] - Export orchestration and summary
//!
//! # Export Workflow
//!
//! 1. **Resolve window**: explicit dates, or the ISO week two weeks back
//! 2. **Fetch orders**: paginated, filtered by date range and channel
//! 3. **Fetch positions**: same filters plus the completed status
//! 4. **Reconcile**: filter positions, group by order, filter orders, aggregate
//! 5. **Write**: sorted rows to a tab-delimited file
//! 6. **Report**: return the export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use weclapp_export::config::load_config_or_env;
//! use weclapp_export::core::export::{ExportRequest, OrderExporter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_env("weclapp-export.toml")?;
//! let exporter = OrderExporter::new(&config)?;
//!
//! let summary = exporter.export(ExportRequest::default()).await?;
//! println!("{}", summary.completion_message());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod output;
pub mod reconcile;
pub mod window;
