//! Run configuration
//!
//! [`ReportConfig`] is built once from the parsed command line, validated,
//! and then only borrowed.

use crate::cli::Cli;
use awscost_core::aggregation::AggregatorSettings;
use awscost_core::credits::CreditBudget;
use awscost_core::error::{CostReportError, Result};
use awscost_core::filters::{AccountFilter, split_list};

/// Shortest window that still has a day to compare yesterday against
pub const MIN_DAYS: u32 = 2;

/// Everything one report run needs to know
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Role assumed in the root account
    pub role: String,
    /// Root account override
    pub root_account: Option<String>,
    /// Which member accounts to report on
    pub filter: AccountFilter,
    /// Delivery destinations; empty means stdout
    pub webhook_urls: Vec<String>,
    /// Optional credit burn-rate tracking
    pub credits: Option<CreditBudget>,
    /// Window length and top-N ranking
    pub settings: AggregatorSettings,
    /// Print records as JSON instead of delivering
    pub json: bool,
    /// Print payloads instead of posting
    pub dry_run: bool,
}

impl ReportConfig {
    /// Build and validate the configuration from the command line
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let role = cli.role.trim();
        if role.is_empty() {
            return Err(CostReportError::Config("role must not be empty".to_string()));
        }
        if cli.days < MIN_DAYS {
            return Err(CostReportError::Config(format!(
                "days must be at least {MIN_DAYS}, got {}",
                cli.days
            )));
        }
        if cli.top_services == 0 {
            return Err(CostReportError::Config(
                "top services must be at least 1".to_string(),
            ));
        }

        let mut filter = AccountFilter::new();
        if let Some(ids) = non_blank(cli.account_ids.as_deref()) {
            filter = filter.with_account_ids(ids);
        }
        if let Some(terms) = non_blank(cli.search_term.as_deref()) {
            filter = filter.with_search_terms(terms);
        }

        let webhook_urls = non_blank(cli.webhook_urls.as_deref())
            .map(split_list)
            .unwrap_or_default();

        Ok(Self {
            role: role.to_string(),
            root_account: non_blank(cli.account.as_deref()).map(str::to_string),
            filter,
            webhook_urls,
            credits: credits_from_cli(cli)?,
            settings: AggregatorSettings {
                n_days: cli.days,
                top_n_services: cli.top_services,
            },
            json: cli.json,
            dry_run: cli.dry_run,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn credits_from_cli(cli: &Cli) -> Result<Option<CreditBudget>> {
    match (
        non_blank(cli.credits_expire_date.as_deref()),
        non_blank(cli.credits_remaining_as_of.as_deref()),
        non_blank(cli.credits_remaining.as_deref()),
    ) {
        (None, None, None) => Ok(None),
        (Some(expire), Some(as_of), Some(remaining)) => {
            CreditBudget::parse(expire, as_of, remaining).map(Some)
        }
        _ => Err(CostReportError::Config(
            "credits expire date, remaining-as-of date and remaining amount must be set together"
                .to_string(),
        )),
    }
}
