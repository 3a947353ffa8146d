//! Domain models and types for the weclapp exporter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Error types** ([`ReportError`], [`WeclappError`])
//! - **Result type alias** ([`Result`])
//! - **Candidate-key resolution** ([`fields`]) for inconsistently shaped upstream records
//! - **Typed records** ([`SalesOrder`], [`OrderPosition`]) built once at ingestion
//! - **Decimal helpers** ([`money`]) for exact monetary arithmetic
//! - **Reporting window** ([`ReportingWindow`]) the inclusive date range of one export
//!
//! # Typed Records
//!
//! ```rust
//! use weclapp_export::domain::OrderPosition;
//! use serde_json::json;
//!
//! let position = OrderPosition::from_value(&json!({
//!     "salesOrderNumber": "A-100",
//!     "articleNumber": "SKU-1",
//!     "unitPriceNet": "10.00",
//!     "quantity": 2
//! }));
//!
//! assert_eq!(position.order_number.as_deref(), Some("A-100"));
//! assert_eq!(position.net_amount().to_string(), "20.00");
//! ```

pub mod errors;
pub mod fields;
pub mod money;
pub mod record;
pub mod result;
pub mod window;

// Re-export commonly used types for convenience
pub use errors::{ReportError, WeclappError};
pub use fields::{CandidateKeys, RawRecord};
pub use record::{OrderPosition, SalesOrder};
pub use result::Result;
pub use window::ReportingWindow;
