//! Deployment run: resolve, deploy, report

use colored::Colorize;
use tracing::{info, warn};

use crate::app::annotations;
use crate::app::options::AppOptions;
use crate::deploy::summary::{summarize, DeploymentSummary};
use crate::errors::DeployError;
use crate::filesys::resolve::resolve;
use crate::http::deployments::deploy;

/// Run one deployment and report its outcome
pub async fn run(options: &AppOptions) -> Result<DeploymentSummary, DeployError> {
    let settings = &options.settings;

    // Configuration problems surface before any filesystem or network work.
    let endpoint = settings.endpoint_config()?;
    settings.deploy_changed_only()?;

    let patterns = settings.search_patterns();
    info!("Searching for: {}", patterns.join(", "));

    let resources = resolve(&options.working_dir, &patterns)?;
    if resources.is_empty() {
        warn!("No resources matched in {}", options.working_dir.display());
    } else {
        info!("Below files will be deployed:");
        for resource in &resources {
            info!("  {} ({})", resource.name, resource.path.display());
        }
    }

    let descriptor = settings.descriptor(resources)?;

    info!("Deployment started");
    let result = deploy(&endpoint, &descriptor).await?;

    let summary = summarize(&result);
    report(&summary, options.annotate)?;
    Ok(summary)
}

fn report(summary: &DeploymentSummary, annotate: bool) -> Result<(), DeployError> {
    if summary.is_noop() {
        warn!("Deployment complete, no artifacts updated/added");
        annotations::warning(annotate, "Zero files were updated/added.");
        return Ok(());
    }

    info!(
        created = summary.created,
        updated = summary.updated,
        "{} artifacts deployed",
        summary.total()
    );
    println!(
        "{} {} added, {} updated",
        "Artifacts deployed:".green().bold(),
        summary.created,
        summary.updated
    );

    let models = serde_json::to_string(&summary.by_kind)?;
    info!("List of models {}", models);
    Ok(())
}
