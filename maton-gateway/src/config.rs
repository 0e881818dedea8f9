//! Configuration for the gateway integrations.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::net::IpAddr;

use ::config::{Config as ConfigLoader, File};
use reqwest::Url;
use serde::Deserialize;

/// Environment variable holding the bearer token.
pub const API_KEY_VAR: &str = "MATON_API_KEY";
/// Environment variable overriding the gateway base URL.
pub const GATEWAY_URL_VAR: &str = "MATON_GATEWAY_URL";
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.maton.ai";
/// Optional config file, looked up in the working directory (`maton.toml`, ...).
pub const DEFAULT_CONFIG_FILE: &str = "maton";

/// Validated configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: Url,
    pub api_key: ApiKey,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Bearer token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("MATON_API_KEY environment variable not set. Get a key from maton.ai and run: export MATON_API_KEY=\"your_key_here\"")]
    MissingApiKey,
    #[error("Invalid gateway URL '{url}': {reason}")]
    InvalidGatewayUrl { url: String, reason: String },
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// File-backed part of the configuration.
#[derive(Debug, Deserialize)]
struct Settings {
    gateway: GatewaySettings,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
struct GatewaySettings {
    base_url: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from the process environment and `maton.toml`.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (`MATON_GATEWAY_URL`)
    /// 2. maton.toml file (if present)
    /// 3. Built-in defaults
    ///
    /// The credential is only ever taken from `MATON_API_KEY`.
    pub fn load() -> Result<Self, ConfigError> {
        let vars = env_snapshot(std::env::vars_os());
        Self::from_sources(DEFAULT_CONFIG_FILE, &vars)
    }

    /// Same as [`Config::load`] with an explicit config file name and
    /// environment snapshot.
    pub fn from_sources(
        config_file: &str,
        vars: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        // Checked first so a missing key fails fast, before touching the file.
        let api_key = non_blank(vars, API_KEY_VAR)
            .map(ApiKey::new)
            .ok_or(ConfigError::MissingApiKey)?;

        let settings: Settings = ConfigLoader::builder()
            .set_default("gateway.base_url", DEFAULT_GATEWAY_URL)?
            .set_default("logging.level", default_log_level())?
            .add_source(File::with_name(config_file).required(false))
            .set_override_option(
                "gateway.base_url",
                non_blank(vars, GATEWAY_URL_VAR).cloned(),
            )?
            .build()?
            .try_deserialize()?;

        let base_url = parse_base_url(&settings.gateway.base_url)?;
        tracing::debug!("Gateway base URL: {}", base_url);

        Ok(Config {
            gateway: GatewayConfig { base_url, api_key },
            logging: settings.logging,
        })
    }
}

/// Collect the variables that are valid Unicode; the rest cannot be ours.
pub fn env_snapshot<I>(vars: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// An exported but blank variable counts as unset.
fn non_blank<'a>(vars: &'a HashMap<String, String>, name: &str) -> Option<&'a String> {
    vars.get(name).filter(|value| !value.trim().is_empty())
}

/// Parse and check a gateway base URL.
///
/// Only `https` is accepted, except plain `http` to a loopback host.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidGatewayUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed"));
    }

    match url.scheme() {
        "https" => Ok(url),
        "http" if is_loopback(&url) => Ok(url),
        "http" => Err(invalid("plain http is only allowed for loopback hosts")),
        other => Err(invalid(&format!("unsupported scheme '{}'", other))),
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false),
        None => false,
    }
}
