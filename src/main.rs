//! awscost - Post daily AWS cost summaries to chat webhooks

use anyhow::Context;
use awscost::{
    cli::Cli,
    config::ReportConfig,
    orchestrator::Orchestrator,
    webhook::{ConsoleSink, HttpWebhookSink},
};
use awscost_aws::AwsCredentialsProvider;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --quiet and --verbose override RUST_LOG
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("warn")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("awscost=debug,awscost_core=debug,awscost_aws=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("awscost=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ReportConfig::from_cli(&cli).context("invalid configuration")?;
    let provider = AwsCredentialsProvider::from_env().await;

    if config.json {
        let sink = ConsoleSink::new();
        let reports = Orchestrator::new(&config, &provider, &sink)
            .collect_reports()
            .await?;
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let summary = if config.dry_run {
        info!("Dry run: printing payloads instead of posting");
        let sink = ConsoleSink::new();
        Orchestrator::new(&config, &provider, &sink).run().await?
    } else {
        let sink = HttpWebhookSink::new();
        Orchestrator::new(&config, &provider, &sink).run().await?
    };

    info!(
        "Reported on {} accounts, {} of {} deliveries rejected",
        summary.reports.len().saturating_sub(1),
        summary.rejected(),
        summary.deliveries.len()
    );
    Ok(())
}
