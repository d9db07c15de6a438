//! Graha inspection CLI.
//!
//! Fetches a milestone's budget summary and workflow progress from the
//! back-office API and prints them as JSON.
//!
//! Usage: `graha <project-id> <milestone-id>`

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use graha_client::{
    AccountsClient, HttpTransport, MilestoneSummaryClient, ProgressClient, RealizationsClient,
};
use graha_shared::types::{MilestoneId, ProjectId};
use graha_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "graha=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(project), Some(milestone)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: graha <project-id> <milestone-id>");
    };
    let project: ProjectId = project.parse().context("invalid project id")?;
    let milestone: MilestoneId = milestone.parse().context("invalid milestone id")?;

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;
    info!(base_url = %config.api.base_url, "connecting to back-office API");

    let transport = Arc::new(HttpTransport::new(&config.api)?);
    let accounts = AccountsClient::new(Arc::clone(&transport));
    let realizations = RealizationsClient::new(Arc::clone(&transport), accounts);
    let summary_client = MilestoneSummaryClient::new(Arc::clone(&transport));
    let progress_client = ProgressClient::new(Arc::clone(&transport));

    let summary = summary_client
        .fetch(&realizations, project, milestone)
        .await
        .context("failed to fetch budget summary")?;
    let progress = progress_client
        .fetch(project, milestone)
        .await
        .context("failed to fetch workflow progress")?;

    let stages: Vec<_> = progress
        .stage_statuses()
        .into_iter()
        .map(|(stage, status)| {
            serde_json::json!({ "stage": stage, "status": status })
        })
        .collect();

    let output = serde_json::json!({
        "milestone_id": milestone,
        "summary": summary,
        "workflow": {
            "stages": stages,
            "overall_progress": progress.overall_progress,
            "last_synced": progress.last_synced,
        },
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
