//! weclapp REST API integration
//!
//! - [`transport`] - request/response seam and the reqwest implementation
//! - [`filter`] - filter specification and query-parameter encoding
//! - [`client`] - paginated collection client and typed fetch helpers

pub mod client;
pub mod filter;
pub mod transport;

pub use client::{WeclappClient, ORDER_RESOURCE, POSITION_RESOURCE};
pub use filter::{build_filter_params, FilterOperator, FilterSpec, FilterValue};
pub use transport::{HttpTransport, ResponseBody, Transport, TransportResponse};
