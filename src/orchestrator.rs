//! One report run, start to finish
//!
//! The orchestrator assumes the reporting role in the root account, walks
//! the organization's accounts page by page, builds a record for every
//! included account plus a Total record spanning all of them, and hands one
//! independently formatted payload to each destination. Every network call
//! is awaited in turn.

use crate::config::ReportConfig;
use crate::webhook::{DeliveryStatus, Destination, WebhookSink};
use awscost_core::aggregation::CostAggregator;
use awscost_core::credits::BurnRate;
use awscost_core::error::{CostReportError, Result};
use awscost_core::provider::{AccountLister, CredentialsProvider};
use awscost_core::types::{AccountScope, ReportRecord, TOTAL_ACCOUNT_NAME};
use awscost_render::output::get_formatter;
use tracing::{debug, info, warn};

/// Delivery outcome for one destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub destination: Destination,
    pub status: DeliveryStatus,
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Per-account records in listing order, Total last
    pub reports: Vec<ReportRecord>,
    /// One entry per destination, in configuration order
    pub deliveries: Vec<Delivery>,
}

impl RunSummary {
    /// Number of destinations that did not accept the report
    pub fn rejected(&self) -> usize {
        self.deliveries
            .iter()
            .filter(|d| !d.status.is_success())
            .count()
    }
}

/// Drives a report run against a credentials provider and a sink
pub struct Orchestrator<'a, P, S> {
    config: &'a ReportConfig,
    provider: &'a P,
    sink: &'a S,
    aggregator: CostAggregator,
}

impl<'a, P, S> Orchestrator<'a, P, S>
where
    P: CredentialsProvider,
    S: WebhookSink,
{
    /// Create an orchestrator whose window ends today
    pub fn new(config: &'a ReportConfig, provider: &'a P, sink: &'a S) -> Self {
        Self {
            config,
            provider,
            sink,
            aggregator: CostAggregator::new(config.settings),
        }
    }

    /// Use a specific aggregator, e.g. one with a fixed window
    pub fn with_aggregator(mut self, aggregator: CostAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Build every record and deliver the report to every destination
    pub async fn run(&self) -> Result<RunSummary> {
        let reports = self.collect_reports().await?;
        self.log_credit_burn(&reports);
        let deliveries = self.deliver(&reports).await?;

        Ok(RunSummary {
            reports,
            deliveries,
        })
    }

    /// Build the per-account records followed by the Total record
    ///
    /// # Errors
    ///
    /// Fails on the first credentials, listing or billing error, and with
    /// [`CostReportError::NoAccounts`] when the filter excludes every account.
    pub async fn collect_reports(&self) -> Result<Vec<ReportRecord>> {
        let root = match &self.config.root_account {
            Some(account) => account.clone(),
            None => self.provider.root_account().await?,
        };

        info!(
            "Assuming role {} in root account {}",
            self.config.role, root
        );
        let session = self.provider.assume_role(&root, &self.config.role).await?;

        let mut reports = Vec::new();
        let mut included_ids = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let page = session.list_accounts(next_token.take()).await?;
            debug!("Received page of {} accounts", page.accounts.len());

            for account in page.accounts {
                if !self.config.filter.includes(&account) {
                    debug!("Skipping account {} ({})", account.name, account.id);
                    continue;
                }

                info!("Building report for {} ({})", account.name, account.id);
                let record = self
                    .aggregator
                    .cost_report(
                        &session,
                        AccountScope::Single(account.id.clone()),
                        &account.name,
                    )
                    .await?;
                included_ids.push(account.id);
                reports.push(record);
            }

            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }

        if included_ids.is_empty() {
            return Err(CostReportError::NoAccounts);
        }

        info!("Building total for {} accounts", included_ids.len());
        let total = self
            .aggregator
            .cost_report(
                &session,
                AccountScope::All(included_ids),
                TOTAL_ACCOUNT_NAME,
            )
            .await?;
        reports.push(total);

        Ok(reports)
    }

    /// Configured webhooks, or stdout when there are none
    pub fn destinations(&self) -> Vec<Destination> {
        if self.config.webhook_urls.is_empty() {
            vec![Destination::Console]
        } else {
            self.config
                .webhook_urls
                .iter()
                .map(Destination::webhook)
                .collect()
        }
    }

    /// Format and deliver the report once per destination
    ///
    /// A rejected delivery is logged and the remaining destinations still
    /// run; a transport error stops the run.
    pub async fn deliver(&self, reports: &[ReportRecord]) -> Result<Vec<Delivery>> {
        let mut deliveries = Vec::new();
        for destination in self.destinations() {
            let payload = get_formatter(destination.kind()).format(reports)?;
            let status = self.sink.deliver(&destination, &payload).await?;

            match &status {
                DeliveryStatus::Rejected { status, .. } => {
                    warn!("Delivery to {} rejected with status {}", destination, status)
                }
                _ => info!("Delivered report to {}", destination),
            }
            deliveries.push(Delivery {
                destination,
                status,
            });
        }
        Ok(deliveries)
    }

    fn log_credit_burn(&self, reports: &[ReportRecord]) {
        let Some(credits) = &self.config.credits else {
            return;
        };
        let yesterday = reports
            .iter()
            .rev()
            .find(|r| r.is_total())
            .map(ReportRecord::yesterday_total)
            .unwrap_or_default();

        match credits.burn_rate(yesterday) {
            BurnRate::UnderBudget => info!("{}", credits.summary(yesterday)),
            BurnRate::OverBudget => warn!("{}", credits.summary(yesterday)),
        }
    }
}
