use anyhow::Result;
use tracing::info;

mod api;
mod config;
mod constructs;
mod loader;
mod project;
mod session;

use api::projects::{DeployOptions, ProjectsApi};
use api::ApiClient;
use config::load_config;
use loader::load_project;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cfg = load_config()?;
    info!("project manifest = {}", cfg.project_file.display());

    let project = load_project(&cfg.project_file)?;
    let summary = project.summary();
    info!(
        "Loaded project '{}': {} checks, {} groups, {} alert channels, {} subscriptions",
        project.name,
        summary.check_count,
        summary.group_count,
        summary.alert_channel_count,
        summary.subscription_count
    );

    let resources = project.synthesize()?;
    info!("Synthesized {} constructs", resources.len());

    let client = ApiClient::new(&cfg.api_base_url, &cfg.api_key, cfg.account_id.clone());
    let projects = ProjectsApi::with_version(&client, &cfg.api_version);

    if cfg.dry_run {
        info!("Dry run requested, no changes will be applied");
    }
    let outcome = projects
        .deploy(
            &resources,
            DeployOptions {
                dry_run: cfg.dry_run,
                ..Default::default()
            },
        )
        .await?;
    info!("Deploy finished: {}", outcome);

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
