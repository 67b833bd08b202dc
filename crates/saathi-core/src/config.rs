//! Configuration management for Saathi.
//!
//! Loads configuration from ${SAATHI_HOME}/config.toml with sensible defaults.

use std::fs;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Identity service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Base URL of the identity service.
    pub base_url: String,
    /// API key; falls back to `SAATHI_IDENTITY_API_KEY`.
    pub api_key: Option<String>,
    /// Seconds between background session revalidations.
    pub session_poll_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "https://identity.swachhsaathi.in".to_string(),
            api_key: None,
            session_poll_secs: 60,
        }
    }
}

/// Assistant (text-completion) service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Base URL of the generative language API.
    pub base_url: String,
    /// API key; falls back to `GEMINI_API_KEY`.
    pub api_key: Option<String>,
    /// Model used for tips and Q&A.
    pub model: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub identity: IdentityConfig,
    pub assistant: AssistantConfig,
}

impl Config {
    /// Loads configuration from disk, or defaults when no file exists.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = paths::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("read config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parse config file {}", path.display()))
    }
}

/// Resolves an API key from config or an environment variable.
///
/// # Errors
/// Returns an error if neither source provides a key.
pub fn resolve_api_key(
    config_key: Option<&str>,
    env_var: &str,
    service: &str,
) -> Result<String> {
    if let Some(key) = config_key
        && !key.trim().is_empty()
    {
        return Ok(key.trim().to_string());
    }
    std::env::var(env_var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("no API key for {service}: set it in config.toml or {env_var}"))
}

/// Resolves a base URL from an environment override or config, trimming any
/// trailing slash so endpoint paths can be appended uniformly.
pub fn resolve_base_url(config_url: &str, env_var: &str) -> String {
    let url = std::env::var(env_var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| config_url.to_string());
    url.trim_end_matches('/').to_string()
}

/// Well-known filesystem locations.
pub mod paths {
    use std::path::PathBuf;

    /// Returns the user's home directory, if resolvable.
    pub fn home_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(PathBuf::from)
    }

    /// Returns the Saathi home directory (`SAATHI_HOME` or `~/.saathi`).
    pub fn saathi_home() -> PathBuf {
        if let Some(home) = std::env::var_os("SAATHI_HOME") {
            return PathBuf::from(home);
        }
        home_dir()
            .map(|home| home.join(".saathi"))
            .unwrap_or_else(|| PathBuf::from(".saathi"))
    }

    /// Returns the path to the config file.
    pub fn config_path() -> PathBuf {
        saathi_home().join("config.toml")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        saathi_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let raw = toml::to_string(&config).expect("serialize");
        let parsed: Config = toml::from_str(&raw).expect("parse");
        assert_eq!(parsed.identity.base_url, config.identity.base_url);
        assert_eq!(parsed.assistant.model, config.assistant.model);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("[assistant]\nmodel = \"gemini-2.0-flash\"\n")
            .expect("parse");
        assert_eq!(parsed.assistant.model, "gemini-2.0-flash");
        assert_eq!(parsed.identity.session_poll_secs, 60);
    }

    #[test]
    fn resolve_base_url_strips_trailing_slash() {
        let url = resolve_base_url("https://example.test/api/", "SAATHI_TEST_UNSET_URL");
        assert_eq!(url, "https://example.test/api");
    }
}
