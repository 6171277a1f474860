//! Credential and endpoint resolution.
//!
//! The API key comes from `SCHEMATIC_API_KEY`, falling back to `apiKey` in
//! `~/.schematic-mcp/config.json`. The file is only read when the variable is unset or blank.

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

use schematic_api::DEFAULT_BASE_URL;

pub const API_KEY_ENV: &str = "SCHEMATIC_API_KEY";
pub const API_URL_ENV: &str = "SCHEMATIC_API_URL";

const CONFIG_DIR: &str = ".schematic-mcp";
const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "Schematic API key not configured: set the SCHEMATIC_API_KEY environment variable or add \"apiKey\" to {config_path}"
    )]
    MissingApiKey { config_path: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    api_key: String,
}

pub fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Resolve the API key from the process environment and the home-directory config file.
pub fn resolve_api_key() -> Result<String, ConfigError> {
    resolve_api_key_from(env::var(API_KEY_ENV).ok(), config_file_path().as_deref())
}

pub fn resolve_api_key_from(
    env_value: Option<String>,
    config_path: Option<&Path>,
) -> Result<String, ConfigError> {
    if let Some(key) = non_empty(env_value) {
        return Ok(key);
    }

    if let Some(key) = config_path.and_then(read_config_key) {
        return Ok(key);
    }

    let config_path = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| format!("~/{CONFIG_DIR}/{CONFIG_FILE}"));
    Err(ConfigError::MissingApiKey { config_path })
}

// Unreadable or malformed files count as absent.
fn read_config_key(path: &Path) -> Option<String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            log::debug!("Config file {} not readable: {err}", path.display());
            return None;
        }
    };
    match serde_json::from_str::<ConfigFile>(&raw) {
        Ok(config) => non_empty(Some(config.api_key)),
        Err(err) => {
            log::debug!("Ignoring malformed config file {}: {err}", path.display());
            None
        }
    }
}

pub fn api_base_url() -> String {
    base_url_from(env::var(API_URL_ENV).ok())
}

pub fn base_url_from(env_value: Option<String>) -> String {
    non_empty(env_value)
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
