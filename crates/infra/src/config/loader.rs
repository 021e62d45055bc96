//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the organisation is not set there, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `APIGATE_ORG`: Organisation to address (required)
//! - `APIGATE_BASE_URL`: Management API root
//! - `APIGATE_TOKEN`: Fixed bearer token
//! - `APIGATE_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `APIGATE_USER_AGENT`: User agent sent with every request
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./apigate.json` or `./apigate.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../apigate.json` or `../apigate.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use apigate_domain::{ApiGateError, ClientConfig, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["apigate.json", "apigate.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `ApiGateError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `APIGATE_ORG` must be present; every other variable falls back to the
/// [`ClientConfig`] default.
///
/// # Errors
/// Returns `ApiGateError::Config` if the organisation is missing or a
/// numeric variable cannot be parsed.
pub fn load_from_env() -> Result<ClientConfig> {
    let organization = env_var("APIGATE_ORG")?;
    let mut config = ClientConfig::for_organization(organization);

    if let Some(base_url) = optional_env_var("APIGATE_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    if let Some(token) = optional_env_var("APIGATE_TOKEN") {
        config = config.with_token(token);
    }
    if let Some(timeout) = optional_env_var("APIGATE_TIMEOUT_SECS") {
        config.timeout_secs = timeout
            .parse::<u64>()
            .map_err(|e| ApiGateError::Config(format!("Invalid timeout: {}", e)))?;
    }
    if let Some(user_agent) = optional_env_var("APIGATE_USER_AGENT") {
        config.user_agent = user_agent;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ApiGateError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ApiGateError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ApiGateError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ApiGateError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let config: ClientConfig = match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ApiGateError::Config(format!("Invalid TOML format: {}", e)))?,
        "json" => serde_json::from_str(contents)
            .map_err(|e| ApiGateError::Config(format!("Invalid JSON format: {}", e)))?,
        _ => {
            return Err(ApiGateError::Config(format!(
                "Unsupported config format: {}",
                extension
            )))
        }
    };

    let base_url = config.base_url.clone();
    Ok(config.with_base_url(base_url))
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent, and the directory
/// of the running executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `ApiGateError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        ApiGateError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Read an optional variable, treating empty values as unset.
fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
