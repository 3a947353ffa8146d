//! Validate config command implementation
//!
//! This module implements the `validate-config` command, which loads the
//! configuration (file plus environment) and prints a summary.

use crate::cli::EXIT_CONFIGURATION;
use crate::config::{load_config_or_env, AppConfig};
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        if Path::new(config_path).exists() {
            println!("🔍 Validating configuration file: {config_path}");
        } else {
            println!("🔍 No file at {config_path}, validating environment configuration");
        }
        println!();

        match load_config_or_env(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                for line in summary_lines(&config) {
                    println!("{line}");
                }
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_CONFIGURATION)
            }
        }
    }
}

/// Human-readable summary of a valid configuration; the API token is never shown
fn summary_lines(config: &AppConfig) -> Vec<String> {
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  weclapp API: {}", config.weclapp.base_url),
        "  API Token: ***".to_string(),
        format!("  Timeout: {}s", config.weclapp.timeout_seconds),
        format!("  Page Size: {}", config.weclapp.page_size),
        format!("  Output Directory: {}", config.export.output_dir),
        format!("  File Prefix: {}", config.export.file_prefix),
        format!("  Window Offset: {} weeks", config.export.window_offset_weeks),
        format!("  Position Status: {}", config.export.position_status),
        format!("  Sales Channels: {}", config.policy.allowed_channels.len()),
        format!("  Excluded Keywords: {}", config.policy.excluded_keywords.len()),
        format!("  Minimum Unit Price: {}", config.policy.min_unit_price),
    ];

    if config.logging.local_enabled {
        lines.push(format!(
            "  Local Logs: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        ));
    }

    lines
}
