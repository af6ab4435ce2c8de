//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the environment when one exists
//! 2. Attempts to load from environment variables
//! 3. If `GREENLOOP_API_BASE_URL` is unset, falls back to a config file
//! 4. Probes multiple paths for config files (JSON or TOML)
//!
//! ## Environment Variables
//! - `GREENLOOP_API_BASE_URL`: Backend base URL (required)
//! - `GREENLOOP_API_TIMEOUT_SECS`: Per-request timeout
//! - `GREENLOOP_API_USER_AGENT`: User-Agent header
//! - `GREENLOOP_RETRY_MAX`: Retries after the first attempt
//! - `GREENLOOP_RETRY_DELAY_MS`: Fixed delay between attempts
//! - `GREENLOOP_RETRY_NOTIFY`: Surface retries to the UI (true/false)
//! - `GREENLOOP_TOKEN_PATH`: Token file; unset keeps the token in memory
//! - `GREENLOOP_LOG_LEVEL`: trace, debug, info, warn or error
//! - `GREENLOOP_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}`, `./greenloop.{json,toml}`
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use greenloop_domain::{
    ApiConfig, AuthConfig, Config, ConfigError, LoggingConfig, Result, RetrySettings,
};

const FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "greenloop.json", "greenloop.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns [`ConfigError`] if neither source yields a valid configuration.
pub fn load() -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(err) => tracing::debug!(error = %err, "No .env file loaded"),
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(ConfigError::Missing(key)) => {
            tracing::debug!(missing = %key, "Environment incomplete, trying file");
            load_from_file(None)
        }
        Err(err) => Err(err),
    }
}

/// Load configuration from environment variables
///
/// Only `GREENLOOP_API_BASE_URL` is required; everything else has a
/// default.
///
/// # Errors
/// [`ConfigError::Missing`] when the base URL is unset,
/// [`ConfigError::Invalid`] when a value does not parse or validate.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("GREENLOOP_API_BASE_URL")?;

    let mut api = ApiConfig::new(base_url);
    if let Some(timeout) = env_parse("GREENLOOP_API_TIMEOUT_SECS", "api.timeout_secs")? {
        api.timeout_secs = timeout;
    }
    if let Some(agent) = env_opt("GREENLOOP_API_USER_AGENT") {
        api.user_agent = agent;
    }

    let defaults = RetrySettings::default();
    let retry = RetrySettings {
        max_retries: env_parse("GREENLOOP_RETRY_MAX", "retry.max_retries")?
            .unwrap_or(defaults.max_retries),
        delay_ms: env_parse("GREENLOOP_RETRY_DELAY_MS", "retry.delay_ms")?
            .unwrap_or(defaults.delay_ms),
        notify: env_bool("GREENLOOP_RETRY_NOTIFY", defaults.notify),
    };

    let auth = AuthConfig { token_path: env_opt("GREENLOOP_TOKEN_PATH").map(PathBuf::from) };

    let mut logging = LoggingConfig::default();
    if let Some(level) = env_opt("GREENLOOP_LOG_LEVEL") {
        logging.level = level;
    }
    logging.json = env_bool("GREENLOOP_LOG_JSON", false);

    let config = Config { api, retry, auth, logging };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// [`ConfigError::NotFound`] when no file exists, [`ConfigError::Parse`]
/// for malformed content, [`ConfigError::Invalid`] when validation fails.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound(p.display().to_string()));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ConfigError::NotFound("no config file in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ConfigError::Io(format!("{}: {e}", config_path.display())))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(format!("invalid TOML: {}", e.message()))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ConfigError::Parse(format!("invalid JSON: {e}"))),
        _ => Err(ConfigError::Parse(format!("unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Returns the first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend(cwd.ancestors().take(3).map(Path::to_path_buf));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    probe_in(&roots)
}

fn probe_in(roots: &[PathBuf]) -> Option<PathBuf> {
    roots
        .iter()
        .flat_map(|root| FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.is_file())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

/// Non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str, field: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| ConfigError::invalid(field, format!("{key}='{raw}': {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    env_opt(key)
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
