//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AppConfig;
use super::secret::secret_string;
use crate::domain::errors::ReportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`AppConfig`]
/// 4. Applies environment variable overrides (`WECLAPP_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file is missing or unreadable, a
/// referenced environment variable is unset, parsing fails, or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use weclapp_export::config::loader::load_config;
///
/// let config = load_config("weclapp-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ReportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ReportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: AppConfig = toml::from_str(&contents)
        .map_err(|e| ReportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    finish(config)
}

/// Loads configuration from a TOML file when it exists, otherwise from the
/// environment alone
///
/// Scheduled runs are usually configured through `WECLAPP_BASE_URL` and
/// `WECLAPP_API_TOKEN` only; this entry point lets them run without a file.
///
/// # Errors
///
/// Same as [`load_config`]; without a file, validation errors are reported
/// for the missing connection parameters.
pub fn load_config_or_env(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(
        path = %path.display(),
        "Configuration file not found, using defaults and environment"
    );
    let mut config = AppConfig::default();
    apply_env_overrides(&mut config)?;
    finish(config)
}

fn finish(config: AppConfig) -> Result<AppConfig> {
    config.validate().map_err(|e| {
        ReportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ReportError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(ReportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the `WECLAPP_*` prefix
///
/// `WECLAPP_BASE_URL` and `WECLAPP_API_TOKEN` match the variables the
/// scheduled job has always been configured with.
fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("WECLAPP_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // weclapp overrides
    if let Ok(val) = std::env::var("WECLAPP_BASE_URL") {
        config.weclapp.base_url = val;
    }
    if let Ok(val) = std::env::var("WECLAPP_API_TOKEN") {
        config.weclapp.api_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("WECLAPP_TIMEOUT_SECONDS") {
        config.weclapp.timeout_seconds = parse_override("WECLAPP_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("WECLAPP_PAGE_SIZE") {
        config.weclapp.page_size = parse_override("WECLAPP_PAGE_SIZE", &val)?;
    }

    // Export overrides
    if let Ok(val) = std::env::var("WECLAPP_EXPORT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("WECLAPP_EXPORT_FILE_PREFIX") {
        config.export.file_prefix = val;
    }
    if let Ok(val) = std::env::var("WECLAPP_EXPORT_WINDOW_OFFSET_WEEKS") {
        config.export.window_offset_weeks =
            parse_override("WECLAPP_EXPORT_WINDOW_OFFSET_WEEKS", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("WECLAPP_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("WECLAPP_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        ReportError::Configuration(format!("Invalid value for {name}: '{value}'"))
    })
}
