//! awscost - Daily AWS cost summaries for chat webhooks
//!
//! This library provides functionality to:
//! - Assume a reporting role in an AWS Organizations root account
//! - Build a trailing daily cost report per member account plus a Total
//! - Render the report for Slack, Microsoft Teams or plain-text webhooks
//! - Deliver it over HTTP or print it to stdout
//!
//! # Examples
//!
//! ```no_run
//! use awscost::{
//!     cli::Cli,
//!     config::ReportConfig,
//!     orchestrator::Orchestrator,
//!     webhook::HttpWebhookSink,
//! };
//! use awscost_aws::AwsCredentialsProvider;
//! use clap::Parser;
//!
//! #[tokio::main]
//! async fn main() -> awscost::Result<()> {
//!     let config = ReportConfig::from_cli(&Cli::parse())?;
//!     let provider = AwsCredentialsProvider::from_env().await;
//!     let sink = HttpWebhookSink::new();
//!
//!     let summary = Orchestrator::new(&config, &provider, &sink).run().await?;
//!     println!("{} records", summary.reports.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod orchestrator;
pub mod webhook;

// Re-export commonly used types
pub use awscost_core::{CostReportError, ReportRecord, Result};
pub use config::ReportConfig;
pub use orchestrator::{Orchestrator, RunSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
