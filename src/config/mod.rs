//! Configuration management for the exporter.
//!
//! # Overview
//!
//! Configuration comes from an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `WECLAPP_*` environment overrides
//! - Defaults for every optional setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`WeclappConfig`] - weclapp connection (base URL, token, timeout, page size)
//! - [`ExportConfig`] - Output directory, file prefix, default window offset
//! - [`ExportPolicy`](crate::core::reconcile::ExportPolicy) - Channel allow-list, excluded keywords, minimum price
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [weclapp]
//! base_url = "https://tenant.weclapp.com/webapp/api/v1"
//! api_token = "${WECLAPP_API_TOKEN}"
//! page_size = 100
//!
//! [export]
//! output_dir = "exports"
//! window_offset_weeks = 2
//!
//! [policy]
//! min_unit_price = "0.01"
//! ```
//!
//! Without a file, `WECLAPP_BASE_URL` and `WECLAPP_API_TOKEN` are enough:
//!
//! ```rust,no_run
//! use weclapp_export::config::load_config_or_env;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_env("weclapp-export.toml")?;
//! println!("weclapp URL: {}", config.weclapp.base_url);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_env};
pub use schema::{AppConfig, ApplicationConfig, ExportConfig, LoggingConfig, WeclappConfig};
pub use secret::{secret_string, SecretString, SecretValue};
