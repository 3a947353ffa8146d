//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{EXIT_CONFIGURATION, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "weclapp-export.toml")]
    pub output: String,

    /// Include every section with its default values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing weclapp export configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIGURATION);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your tenant URL", self.output);
                println!("  2. Export WECLAPP_API_TOKEN (or put it in a .env file)");
                println!("  3. Run: weclapp-export validate-config");
                println!("  4. Run: weclapp-export export");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to create configuration file: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# weclapp export configuration

[weclapp]
base_url = "https://your-tenant.weclapp.com/webapp/api/v1"
api_token = "${WECLAPP_API_TOKEN}"

[export]
output_dir = "exports"
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# weclapp export configuration
#
# Values of the form ${VAR} are read from the environment. Every setting can
# also be overridden with a WECLAPP_* environment variable.

[application]
# trace, debug, info, warn, error
log_level = "info"

[weclapp]
base_url = "https://your-tenant.weclapp.com/webapp/api/v1"
api_token = "${WECLAPP_API_TOKEN}"
timeout_seconds = 30
page_size = 100

[export]
# Files are named <file_prefix>_<start>_<end>.csv
output_dir = "exports"
file_prefix = "weclapp_orders"
# Without --start-date/--end-date, export the ISO week this many weeks back
window_offset_weeks = 2
# Status requested from the salesOrderPosition endpoint
position_status = "abgeschlossen"

[policy]
allowed_channels = [
    "Shop DE netto",
    "Shop AT netto",
    "Amazon FBA brutto",
    "Amazon FBM brutto",
]
# Positions whose normalized article name contains one of these are skipped
excluded_keywords = ["impragnol", "impraegnol", "sneakerasers"]
# Positions cheaper than this are skipped
min_unit_price = "0.01"
completed_status_tokens = ["abgeschlossen", "completed"]

[logging]
local_enabled = false
local_path = "logs"
# daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}
