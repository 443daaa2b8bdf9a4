//! Configuration file loading and parsing

use crate::error::{Error, Result};
use crate::types::{NetworkConfig, RetryPolicy, ToolsConfig};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{info, warn};

/// Configuration file names searched for in the working directory
pub const CONFIG_FILE_NAMES: &[&str] = &["config.yaml", "config.yml"];

/// Contents of a helm-bridge configuration file
///
/// ```yaml
/// api-url: https://bridge.internal:8080
/// values-file: values.yaml
/// network:
///   http-timeout-secs: 30
/// retry:
///   max-attempts: 3
/// tools:
///   kubectl: /usr/local/bin/kubectl
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConfigFile {
    /// Bridge service base URL (`api_url` is accepted as well)
    #[serde(alias = "api_url")]
    pub api_url: Option<String>,

    /// Values document rewritten by `translate`
    pub values_file: Option<Utf8PathBuf>,

    pub network: NetworkConfig,

    pub retry: RetryPolicy,

    pub tools: ToolsConfig,
}

impl ConfigFile {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Load an explicit config file, or look for one in `search_dir`.
    ///
    /// An explicit path that does not exist is an error. When searching, a
    /// missing file only produces a warning and defaults are used.
    pub fn load(
        explicit: Option<&Utf8Path>,
        search_dir: &Utf8Path,
    ) -> Result<Self> {
        let path = match explicit {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::config_not_found(p.as_str()));
                }
                p.to_owned()
            }
            None => match Self::find(search_dir) {
                Some(p) => p,
                None => {
                    warn!("No config file found. Using default settings");
                    return Ok(Self::default());
                }
            },
        };

        let content = fs::read_to_string(&path)?;
        let config = Self::from_yaml(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;

        info!("Using config file: {}", path);
        Ok(config)
    }

    fn find(dir: &Utf8Path) -> Option<Utf8PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }
}
