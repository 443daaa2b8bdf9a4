//! Register command

use anyhow::Result;
use bridge_cluster::{HelmManifestSource, KubectlClient};
use bridge_core::config::Settings;
use bridge_core::ReleaseTarget;
use bridge_registry::{BridgeClient, RegistrationPass};
use camino::Utf8Path;

use super::{bridge_client, load_settings};
use crate::cli::RegisterArgs;
use crate::output;

pub async fn run(args: RegisterArgs, config_path: Option<&Utf8Path>, quiet: bool) -> Result<()> {
    let settings = load_settings(config_path, args.service.overrides(None))?;

    // Configuration problems surface before any cluster or network call
    let api_url = settings.require_api_url()?;
    let release = settings.require_release()?;
    let client = bridge_client(&settings, &api_url)?;

    register_release(&settings, &release, client, args.json, quiet).await
}

/// Run a registration pass for `release` and print its report
pub(crate) async fn register_release(
    settings: &Settings,
    release: &ReleaseTarget,
    client: BridgeClient,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let manifests = HelmManifestSource::new(&settings.tools.helm, settings.network.command_timeout());
    let mut kubectl = KubectlClient::new(&settings.tools.kubectl, settings.network.command_timeout());
    if let Some(context) = &settings.tools.kube_context {
        kubectl = kubectl.with_context(context);
    }

    let pass = RegistrationPass::new(manifests, kubectl, client);

    let spinner = output::spinner(
        &format!("Registering resources of release {}...", release.name),
        quiet || json,
    );
    let result = pass.run(release).await;
    spinner.finish_and_clear();
    let report = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !quiet {
        output::registration_report(&report);
    }

    // Per-resource failures are reported, not fatal
    Ok(())
}
