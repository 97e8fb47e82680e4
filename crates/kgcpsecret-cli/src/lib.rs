//! KGCPSecret kustomize exec plugin
//!
//! kustomize invokes the plugin with the path of a `KGCPSecret` descriptor
//! and reads the generated `Secret` manifest from stdout. Diagnostics go to
//! stderr so they never mix with the manifest.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use kgcpsecret_core::config::LOG_ENV;
use kgcpsecret_core::{
    load_descriptor, render, GcpSecretManager, OutputFormat, SecretAssembler, SecretManager,
    TracingLogger,
};

/// One-line usage shown on argument errors
pub const USAGE: &str = "usage: KGCPSecret [--format yaml|json] FILE";

/// Generate a Kubernetes Secret from Google Secret Manager values
#[derive(Parser, Debug)]
#[command(name = "KGCPSecret", version, about, long_about = None)]
pub struct Cli {
    /// Path to the KGCPSecret descriptor
    pub file: PathBuf,

    /// Manifest format: yaml or json
    #[arg(long, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Install the stderr tracing subscriber
///
/// `KGCPSECRET_LOG` takes precedence; otherwise the level follows `-v`.
/// Calling this twice is harmless.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run against Google Secret Manager configured from the environment
pub async fn run(cli: &Cli) -> kgcpsecret_core::Result<String> {
    let manager = GcpSecretManager::from_env();
    tracing::debug!(endpoint = %manager.endpoint(), "using Google Secret Manager");
    run_with(cli, Arc::new(manager)).await
}

/// Load the descriptor, resolve it against `manager` and render the manifest
pub async fn run_with(
    cli: &Cli,
    manager: Arc<dyn SecretManager>,
) -> kgcpsecret_core::Result<String> {
    let request = load_descriptor(&cli.file)?;
    tracing::info!(
        secret = %request.metadata.name,
        project = %request.gcp_project_id,
        keys = request.keys.len(),
        "generating secret"
    );

    let secret = SecretAssembler::new(manager)
        .with_logger(Arc::new(TracingLogger::default()))
        .assemble(&request)
        .await?;
    render(&secret, cli.format)
}
