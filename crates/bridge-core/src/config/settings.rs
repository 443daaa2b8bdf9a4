//! Resolved settings, constructed once at the process boundary
//!
//! Precedence (low to high):
//! 1. Built-in defaults
//! 2. Config file
//! 3. Environment variables
//! 4. CLI flags (passed in as [`CliOverrides`])

use super::loader::ConfigFile;
use crate::error::{Error, Result};
use crate::types::{NetworkConfig, RetryPolicy, ToolsConfig};
use camino::Utf8PathBuf;
use url::Url;

/// Values document used when nothing else is configured
pub const DEFAULT_VALUES_FILE: &str = "values.yaml";

const ENV_RELEASE_NAME: &str = "HELM_RELEASE_NAME";
const ENV_NAMESPACE: &str = "HELM_NAMESPACE";
const ENV_HTTP_TIMEOUT: &str = "BRIDGE_HTTP_TIMEOUT_SECS";
const ENV_COMMAND_TIMEOUT: &str = "BRIDGE_COMMAND_TIMEOUT_SECS";

/// Values supplied on the command line (clap also folds `API_URL` and
/// `BRIDGE_VALUES_FILE` into these)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub values_file: Option<Utf8PathBuf>,
}

/// The Helm release a register pass operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTarget {
    pub name: String,
    pub namespace: String,
}

/// Fully resolved settings
#[derive(Debug, Clone)]
pub struct Settings {
    api_url: Option<String>,
    release_name: Option<String>,
    namespace: Option<String>,
    pub values_file: Utf8PathBuf,
    pub network: NetworkConfig,
    pub retry: RetryPolicy,
    pub tools: ToolsConfig,
}

impl Settings {
    /// Resolve settings from the process environment
    pub fn resolve(file: ConfigFile, overrides: CliOverrides) -> Result<Self> {
        Self::resolve_with(file, overrides, |key| std::env::var(key).ok())
    }

    /// Resolve settings using `env` to look up environment variables
    pub fn resolve_with<F>(
        file: ConfigFile,
        overrides: CliOverrides,
        env: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let mut network = file.network;
        if let Some(val) = lookup(ENV_HTTP_TIMEOUT) {
            network.http_timeout_secs = parse_secs(ENV_HTTP_TIMEOUT, &val)?;
        }
        if let Some(val) = lookup(ENV_COMMAND_TIMEOUT) {
            network.command_timeout_secs = parse_secs(ENV_COMMAND_TIMEOUT, &val)?;
        }

        let api_url = non_empty(overrides.api_url).or_else(|| non_empty(file.api_url));

        let values_file = overrides
            .values_file
            .or(file.values_file)
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_VALUES_FILE));

        Ok(Self {
            api_url,
            release_name: lookup(ENV_RELEASE_NAME),
            namespace: lookup(ENV_NAMESPACE),
            values_file,
            network,
            retry: file.retry,
            tools: file.tools,
        })
    }

    /// Bridge service base URL, validated and without a trailing slash
    pub fn require_api_url(&self) -> Result<String> {
        let raw = self.api_url.as_deref().ok_or_else(|| {
            Error::missing_setting(
                "API URL",
                Some("use --api-url, API_URL or api-url in the config file"),
            )
        })?;

        let url = Url::parse(raw)
            .map_err(|e| Error::invalid_config(format!("API URL '{}' is invalid: {}", raw, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(format!(
                "API URL '{}' must use http or https",
                raw
            )));
        }

        Ok(raw.trim().trim_end_matches('/').to_string())
    }

    /// Release name and namespace from the Helm plugin environment
    pub fn require_release(&self) -> Result<ReleaseTarget> {
        let name = self.release_name.clone().ok_or_else(|| {
            Error::missing_setting(format!("{} environment variable", ENV_RELEASE_NAME), None)
        })?;
        let namespace = self.namespace.clone().ok_or_else(|| {
            Error::missing_setting(format!("{} environment variable", ENV_NAMESPACE), None)
        })?;
        Ok(ReleaseTarget { name, namespace })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(Error::invalid_config(format!(
            "{} must be a positive number of seconds",
            key
        ))),
    }
}
