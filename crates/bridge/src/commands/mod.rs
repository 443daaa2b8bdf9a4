//! CLI command implementations

pub mod deploy;
pub mod register;
pub mod translate;

use anyhow::{Context, Result};
use bridge_core::config::{CliOverrides, ConfigFile, Settings};
use bridge_registry::BridgeClient;
use camino::{Utf8Path, Utf8PathBuf};

/// Load the config file and resolve settings against env and flags
pub(crate) fn load_settings(
    config_path: Option<&Utf8Path>,
    overrides: CliOverrides,
) -> Result<Settings> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let cwd = Utf8PathBuf::try_from(cwd).context("Current directory is not valid UTF-8")?;

    let file = ConfigFile::load(config_path, &cwd)?;
    Ok(Settings::resolve(file, overrides)?)
}

/// Bridge service client for `api_url` using the configured network and retry settings
pub(crate) fn bridge_client(settings: &Settings, api_url: &str) -> Result<BridgeClient> {
    Ok(BridgeClient::new(
        api_url,
        &settings.network,
        settings.retry.clone(),
    )?)
}
