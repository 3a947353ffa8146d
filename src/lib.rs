// Weclapp Export - weekly sales-order export from the weclapp ERP
// Copyright (c) 2025 Weclapp Export Contributors
// Licensed under the MIT License

//! # Weclapp Export - weekly sales-order report
//!
//! Weclapp Export pulls sales orders and their positions from the weclapp ERP
//! REST API, reconciles them into one row per completed order and writes a
//! tab-delimited report for one reporting week.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** paginated `salesOrder` and `salesOrderPosition` entities
//!   with weclapp's `filter[field][operator]` query syntax
//! - **Reconciling** positions against orders under an admission policy
//!   (sales channels, completed status, excluded articles, minimum price)
//! - **Aggregating** net totals with exact decimal arithmetic
//! - **Writing** the sorted rows as a tab-delimited file with German headers
//!
//! ## Architecture
//!
//! The crate follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (window, reconcile, output, export)
//! - [`adapters`] - External integrations (weclapp REST API)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use weclapp_export::config::load_config_or_env;
//! use weclapp_export::core::export::{ExportRequest, OrderExporter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration (file optional, WECLAPP_* variables suffice)
//!     let config = load_config_or_env("weclapp-export.toml")?;
//!
//!     let exporter = OrderExporter::new(&config)?;
//!     let summary = exporter.export(ExportRequest::default()).await?;
//!
//!     println!("{}", summary.completion_message());
//!     Ok(())
//! }
//! ```
//!
//! ## Reporting Window
//!
//! Without explicit dates, the export covers the Monday-to-Sunday ISO week
//! two weeks before today:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use weclapp_export::core::window::compute_reporting_window;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();
//! let window = compute_reporting_window(today, 2).unwrap();
//! assert_eq!(window.to_string(), "2025-01-06 – 2025-01-12");
//! ```
//!
//! ## Querying weclapp
//!
//! ```rust,no_run
//! use futures::TryStreamExt;
//! use weclapp_export::adapters::weclapp::{FilterSpec, WeclappClient, ORDER_RESOURCE};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WeclappClient::from_env()?;
//! let filters = FilterSpec::new().with("orderNumber", "A-100");
//!
//! let orders: Vec<_> = client
//!     .iter_entities(ORDER_RESOURCE, Some(&filters), None)
//!     .try_collect()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::ReportError`]:
//!
//! ```rust,no_run
//! use weclapp_export::domain::ReportError;
//!
//! fn example() -> Result<(), ReportError> {
//!     let config = weclapp_export::config::load_config("weclapp-export.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
