//! Configuration schema types
//!
//! This module defines the configuration structure of the exporter. Every
//! section has defaults, so an empty file (or no file at all, see
//! [`crate::config::loader`]) yields a configuration that only lacks the
//! weclapp connection parameters.

use crate::config::SecretString;
use crate::core::reconcile::ExportPolicy;
use serde::{Deserialize, Serialize};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Default number of entities requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Main exporter configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// weclapp connection settings
    #[serde(default)]
    pub weclapp: WeclappConfig,

    /// Export output and window settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Order and position admission rules
    #[serde(default)]
    pub policy: ExportPolicy,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.weclapp.validate()?;
        self.export.validate()?;
        self.policy.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// weclapp REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeclappConfig {
    /// Base URL of the tenant API, e.g. `https://tenant.weclapp.com/webapp/api/v1`
    #[serde(default)]
    pub base_url: String,

    /// API token sent in the `AuthenticationToken` header
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Entities requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for WeclappConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_token: None,
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
        }
    }
}

impl WeclappConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("weclapp.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("weclapp.base_url must start with http:// or https://".to_string());
        }

        if let Err(e) = url::Url::parse(&self.base_url) {
            return Err(format!("weclapp.base_url is not a valid URL: {e}"));
        }

        match &self.api_token {
            Some(token) if !token.expose_secret().is_empty() => {}
            _ => return Err("weclapp.api_token is required".to_string()),
        }

        if self.timeout_seconds == 0 {
            return Err("weclapp.timeout_seconds must be > 0".to_string());
        }

        if self.page_size == 0 {
            return Err("weclapp.page_size must be > 0".to_string());
        }

        Ok(())
    }
}

/// Export output and reporting-window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving generated files when no explicit path is given
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File name prefix of generated files
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// How many ISO weeks back the default window lies
    #[serde(default = "default_window_offset_weeks")]
    pub window_offset_weeks: u32,

    /// Status token requested from the positions endpoint
    #[serde(default = "default_position_status")]
    pub position_status: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            window_offset_weeks: default_window_offset_weeks(),
            position_status: default_position_status(),
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if self.file_prefix.is_empty() {
            return Err("export.file_prefix cannot be empty".to_string());
        }

        if self.file_prefix.contains(['/', '\\']) {
            return Err("export.file_prefix must not contain path separators".to_string());
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_output_dir() -> String {
    "exports".to_string()
}

fn default_file_prefix() -> String {
    "weclapp_orders".to_string()
}

fn default_window_offset_weeks() -> u32 {
    2
}

fn default_position_status() -> String {
    "abgeschlossen".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
