//! Deploy command: translate, then register

use anyhow::Result;
use camino::Utf8Path;
use tracing::info;

use super::register::register_release;
use super::translate::translate_values;
use super::{bridge_client, load_settings};
use crate::cli::DeployArgs;

pub async fn run(args: DeployArgs, config_path: Option<&Utf8Path>, quiet: bool) -> Result<()> {
    let settings = load_settings(config_path, args.service.overrides(Some(&args.values)))?;
    let api_url = settings.require_api_url()?;
    let release = settings.require_release()?;
    let client = bridge_client(&settings, &api_url)?;

    // A failed translation aborts before anything is registered
    translate_values(client.clone(), &settings.values_file, false, quiet || args.json).await?;

    info!("Values translated, registering release {}", release.name);
    register_release(&settings, &release, client, args.json, quiet).await
}
