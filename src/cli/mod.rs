//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use crate::domain::ReportError;
use clap::{Parser, Subcommand};

/// Exit code for configuration errors
pub const EXIT_CONFIGURATION: i32 = 2;

/// Exit code for every other failure
pub const EXIT_FATAL: i32 = 5;

/// weclapp sales-order export
#[derive(Parser, Debug)]
#[command(name = "weclapp-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (optional; environment variables suffice)
    #[arg(short, long, default_value = "weclapp-export.toml", env = "WECLAPP_EXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "WECLAPP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export completed sales orders of one week to a tab-delimited file
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Process exit code for an error
pub fn exit_code_for(error: &ReportError) -> i32 {
    if error.is_configuration() {
        EXIT_CONFIGURATION
    } else {
        EXIT_FATAL
    }
}
