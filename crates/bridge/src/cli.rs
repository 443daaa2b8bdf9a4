//! CLI argument parsing with clap

use bridge_core::config::CliOverrides;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// helm-bridge - Register Helm release resources with the Bridge service
#[derive(Parser, Debug)]
#[command(name = "helm-bridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to config file (default: config.yaml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register flagged resources of the current Helm release
    ///
    /// Resources are registered under `/resource/<namespace>/<name>`. When a
    /// manifest omits `metadata.namespace`, the release namespace from
    /// HELM_NAMESPACE is used for the cluster lookup, the registration URL
    /// and the `namespace` detail.
    Register(RegisterArgs),

    /// Replace bridge placeholders in the values file
    Translate(TranslateArgs),

    /// Translate the values file, then register the release's resources
    ///
    /// Registration uses the release namespace from HELM_NAMESPACE for any
    /// resource whose manifest omits `metadata.namespace`.
    Deploy(DeployArgs),
}

/// Bridge service location
#[derive(Args, Debug, Clone, Default)]
pub struct ServiceArgs {
    /// Bridge service base URL
    #[arg(long, env = "API_URL")]
    pub api_url: Option<String>,
}

/// Values document location
#[derive(Args, Debug, Clone, Default)]
pub struct ValuesArgs {
    /// Values file to translate [default: values.yaml]
    #[arg(long = "values", env = "BRIDGE_VALUES_FILE", value_name = "FILE")]
    pub values_file: Option<Utf8PathBuf>,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Output the registration report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TranslateArgs {
    #[command(flatten)]
    pub service: ServiceArgs,

    #[command(flatten)]
    pub values: ValuesArgs,

    /// Print the translated document instead of writing it back
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct DeployArgs {
    #[command(flatten)]
    pub service: ServiceArgs,

    #[command(flatten)]
    pub values: ValuesArgs,

    /// Output the registration report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ServiceArgs {
    pub fn overrides(&self, values: Option<&ValuesArgs>) -> CliOverrides {
        CliOverrides {
            api_url: self.api_url.clone(),
            values_file: values.and_then(|v| v.values_file.clone()),
        }
    }
}
