//! Shared configuration for the roster TUI.
//!
//! TOML file (`roster.toml` in the platform config directory), `ROSTER_*`
//! environment overrides, credential resolution (inline key or named env
//! var), and translation to `roster_core::ServiceConfig`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use roster_api::transport::TlsMode;
use roster_core::ServiceConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no server configured — set [server] in roster.toml or ROSTER_URL")]
    NoServer,

    #[error("environment variable '{name}' named by api_key_env is not set")]
    MissingKeyEnv { name: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// The directory-service deployment to manage.
    pub server: Option<ServerProfile>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Background refresh period in seconds; `0` disables it.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            refresh_interval: default_refresh_interval(),
            insecure: false,
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_refresh_interval() -> u64 {
    60
}

/// The configured directory-service deployment.
#[derive(Debug, Deserialize, Serialize)]
pub struct ServerProfile {
    /// Service base URL (e.g. "https://roster.internal").
    pub url: String,

    /// API key (plaintext — prefer `api_key_env`).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override refresh interval.
    pub refresh_interval: Option<u64>,
}

// ── Loading ─────────────────────────────────────────────────────────

/// Path of the config file, if a platform config directory exists.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("io", "roster", "roster").map(|dirs| dirs.config_dir().join("roster.toml"))
}

/// Load configuration: TOML file first, `ROSTER_*` env vars on top.
///
/// `ROSTER_SERVER__URL` / `ROSTER_SERVER__API_KEY` map onto the `[server]`
/// table (double underscore nests); a missing file is fine (env-only
/// setups).
pub fn load_config() -> Result<Config, ConfigError> {
    let mut figment = Figment::new();
    if let Some(path) = config_path() {
        figment = figment.merge(Toml::file(path));
    }
    let config = figment
        .merge(Env::prefixed("ROSTER_").split("__"))
        .extract()?;
    Ok(config)
}

// ── Translation ─────────────────────────────────────────────────────

/// Resolve a loaded [`Config`] into a connectable [`ServiceConfig`].
pub fn to_service_config(config: &Config) -> Result<ServiceConfig, ConfigError> {
    let Some(server) = &config.server else {
        return Err(ConfigError::NoServer);
    };

    let base_url = server
        .url
        .parse()
        .map_err(|e| ConfigError::Validation {
            field: "server.url".into(),
            reason: format!("{e}"),
        })?;

    let api_key = resolve_api_key(server)?;

    let timeout = server.timeout.unwrap_or(config.defaults.timeout);
    let refresh_interval = server
        .refresh_interval
        .unwrap_or(config.defaults.refresh_interval);
    let insecure = server.insecure.unwrap_or(config.defaults.insecure);

    Ok(ServiceConfig {
        base_url,
        api_key,
        timeout: Duration::from_secs(timeout),
        tls: if insecure {
            TlsMode::DangerAcceptInvalid
        } else {
            TlsMode::Verify
        },
        refresh_interval_secs: refresh_interval,
    })
}

/// Inline key wins; otherwise look up the named env var; otherwise no key.
fn resolve_api_key(server: &ServerProfile) -> Result<Option<SecretString>, ConfigError> {
    if let Some(key) = &server.api_key {
        return Ok(Some(SecretString::from(key.clone())));
    }
    if let Some(name) = &server.api_key_env {
        return match std::env::var(name) {
            Ok(value) => Ok(Some(SecretString::from(value))),
            Err(_) => Err(ConfigError::MissingKeyEnv { name: name.clone() }),
        };
    }
    Ok(None)
}
