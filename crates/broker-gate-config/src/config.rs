// crates/broker-gate-config/src/config.rs
// ============================================================================
// Module: Broker Gate Configuration
// Description: Configuration loading and validation for the CLI.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with a strict size limit and
//! unknown fields rejected. Command-line flags override file values at the
//! call site; this module only produces a validated [`CliConfig`].
//! Security posture: config inputs are untrusted and fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "broker-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "BROKER_GATE_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;
/// Default management API server base URL.
const DEFAULT_API_URL: &str = "https://localhost:9443";
/// Default request timeout in milliseconds.
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
/// Minimum allowed request timeout in milliseconds.
const MIN_REQUEST_TIMEOUT_MS: u64 = 100;
/// Maximum allowed request timeout in milliseconds.
const MAX_REQUEST_TIMEOUT_MS: u64 = 300_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {path}")]
    NotFound {
        /// Requested path.
        path: PathBuf,
    },
    /// The config file exceeds the size limit.
    #[error("config file too large: {size} bytes (limit {limit})")]
    TooLarge {
        /// Actual file size.
        size: u64,
        /// Maximum accepted size.
        limit: u64,
    },
    /// The config file could not be read.
    #[error("failed to read config {path}: {reason}")]
    Io {
        /// Requested path.
        path: PathBuf,
        /// I/O failure detail.
        reason: String,
    },
    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {reason}")]
    Parse {
        /// Requested path.
        path: PathBuf,
        /// Parse failure detail.
        reason: String,
    },
    /// A config value is outside its accepted range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Validation failure detail.
        reason: String,
    },
}

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// API server connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Management API server base URL.
    #[serde(default = "default_api_url")]
    pub url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Skip TLS certificate verification when true.
    #[serde(default)]
    pub tls_insecure: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            request_timeout_ms: default_request_timeout_ms(),
            tls_insecure: false,
        }
    }
}

/// Root CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// API server connection settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Returns the default API server base URL.
fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Returns the default request timeout in milliseconds.
const fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads CLI configuration from an explicit path, env override, or default.
///
/// With no explicit path and no `BROKER_GATE_CONFIG` override, a missing
/// default file yields [`CliConfig::default`]; an explicitly requested file
/// must exist.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file is missing (explicit path only),
/// unreadable, oversized, malformed, or fails validation.
pub fn load_config(path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    let env_path = env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from);
    let (resolved, explicit) = match (path, env_path) {
        (Some(explicit), _) => (explicit.to_path_buf(), true),
        (None, Some(from_env)) => (from_env, true),
        (None, None) => (PathBuf::from(DEFAULT_CONFIG_NAME), false),
    };

    if !resolved.exists() {
        if explicit {
            return Err(ConfigError::NotFound {
                path: resolved,
            });
        }
        return Ok(CliConfig::default());
    }

    let metadata = fs::metadata(&resolved).map_err(|err| ConfigError::Io {
        path: resolved.clone(),
        reason: err.to_string(),
    })?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::TooLarge {
            size: metadata.len(),
            limit: MAX_CONFIG_FILE_SIZE,
        });
    }

    let contents = fs::read_to_string(&resolved).map_err(|err| ConfigError::Io {
        path: resolved.clone(),
        reason: err.to_string(),
    })?;
    let config: CliConfig = toml::from_str(&contents).map_err(|err| ConfigError::Parse {
        path: resolved,
        reason: err.to_string(),
    })?;
    validate(&config)?;
    Ok(config)
}

/// Validates bounded fields of a parsed configuration.
fn validate(config: &CliConfig) -> Result<(), ConfigError> {
    let timeout = config.api.request_timeout_ms;
    if !(MIN_REQUEST_TIMEOUT_MS..=MAX_REQUEST_TIMEOUT_MS).contains(&timeout) {
        return Err(ConfigError::Invalid {
            field: "api.request_timeout_ms",
            reason: format!(
                "{timeout} outside [{MIN_REQUEST_TIMEOUT_MS}, {MAX_REQUEST_TIMEOUT_MS}]"
            ),
        });
    }
    if config.api.url.is_empty() {
        return Err(ConfigError::Invalid {
            field: "api.url",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}
