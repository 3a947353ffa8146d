//! Reconciliation of orders with their positions
//!
//! - [`policy`] - admission rules ([`ExportPolicy`])
//! - [`normalize`] - accent- and case-insensitive text comparison
//! - [`filters`] - order and position admission predicates
//! - [`aggregate`] - grouping, joining and row construction

pub mod aggregate;
pub mod filters;
pub mod normalize;
pub mod policy;

pub use aggregate::{build_order_row, position_summary, prepare_order_rows, OrderRow, COLUMNS};
pub use filters::{order_passes_filters, position_passes_filters};
pub use normalize::normalize_token;
pub use policy::ExportPolicy;
