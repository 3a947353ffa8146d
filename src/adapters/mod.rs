//! External system integrations.
//!
//! - [`weclapp`] - weclapp REST API client (pagination, filters, transport)
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so they can be
//! replaced with scripted implementations in tests. The weclapp client issues
//! every request through the [`weclapp::Transport`] trait.
//!
//! ```rust,no_run
//! use weclapp_export::adapters::weclapp::WeclappClient;
//! use weclapp_export::config::{secret_string, WeclappConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WeclappConfig {
//!     base_url: "https://tenant.weclapp.com/webapp/api/v1".to_string(),
//!     api_token: Some(secret_string("token".to_string())),
//!     ..Default::default()
//! };
//!
//! let client = WeclappClient::new(&config)?;
//! let start = chrono::NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
//! let end = chrono::NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
//! let orders = client.fetch_orders(start, end, &["Shop DE netto".to_string()]).await?;
//! println!("{} orders", orders.len());
//! # Ok(())
//! # }
//! ```

pub mod weclapp;
