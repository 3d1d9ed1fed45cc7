//! Cost aggregation: billing rows to ranked report records
//!
//! Billing results arrive as one entry per day, each listing the services
//! billed that day. Aggregation runs in two pure steps followed by one
//! async wrapper:
//!
//! 1. [`group_by_service`] collects one value per billed day for each
//!    service, summing same-day amounts.
//! 2. [`build_report`] pulls out the monthly Tax line, ranks the rest by
//!    yesterday's cost, keeps the top N and folds the remainder into "Other".
//! 3. [`CostAggregator::cost_report`] runs the billing query and applies both.
//!
//! # Examples
//!
//! ```
//! use awscost_core::aggregation::build_report;
//! use awscost_core::types::{AccountScope, ServiceCostEntry};
//!
//! let entries = vec![
//!     ServiceCostEntry::new("A", vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 10.0]),
//!     ServiceCostEntry::new("B", vec![2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 5.0]),
//!     ServiceCostEntry::new("Tax", vec![100.0; 7]),
//! ];
//! let report = build_report(AccountScope::Single("1".into()), "Foo", entries, 1, 7);
//!
//! assert_eq!(report.top_services[0].service_name, "A");
//! assert_eq!(report.other_costs.yesterday(), 5.0);
//! assert_eq!(report.total_costs.yesterday(), 15.0);
//! ```

use crate::error::{CostReportError, Result};
use crate::provider::{BillingQuery, CostQuery};
use crate::types::{
    AccountScope, CostWindow, DailyCostSeries, DailyServiceCosts, ReportRecord, ServiceCostEntry,
    TAX_SERVICE,
};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

/// Tunables for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorSettings {
    /// Length of the trailing window in days
    pub n_days: u32,
    /// How many services are listed individually
    pub top_n_services: usize,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            n_days: 7,
            top_n_services: 6,
        }
    }
}

/// Group daily billing results into one series per service
///
/// Services keep the order in which they were first seen. A series holds one
/// value per day on which the service was billed, in day order, so its last
/// value is the most recent day it appeared. Same-day amounts are summed and
/// results dated outside the window are skipped.
pub fn group_by_service(days: &[DailyServiceCosts], window: &CostWindow) -> Vec<ServiceCostEntry> {
    let mut ordered: Vec<&DailyServiceCosts> = days.iter().collect();
    ordered.sort_by_key(|d| d.day);

    let mut entries: Vec<ServiceCostEntry> = Vec::new();
    // service -> (entry position, last day a value was pushed)
    let mut positions: HashMap<&str, (usize, NaiveDate)> = HashMap::new();

    for day in ordered {
        if day.day < window.start() || day.day >= window.end() {
            debug!("Skipping billing results for {} outside the window", day.day);
            continue;
        }

        for group in &day.groups {
            match positions.get_mut(group.service.as_str()) {
                Some((position, last_day)) => {
                    let series = &mut entries[*position].series;
                    if *last_day == day.day {
                        let last = series.len() - 1;
                        series.add_on_day(last, group.amount);
                    } else {
                        series.push(group.amount);
                        *last_day = day.day;
                    }
                }
                None => {
                    positions.insert(group.service.as_str(), (entries.len(), day.day));
                    entries.push(ServiceCostEntry::new(
                        group.service.clone(),
                        vec![group.amount],
                    ));
                }
            }
        }
    }

    entries
}

/// Rank services and build the report record for one scope
///
/// The Tax entry is removed first (an empty series if absent). Remaining
/// services are sorted by their last value, descending; the sort is stable
/// so equal costs keep their first-seen order. `other_costs` and
/// `total_costs` are `n_days` long and sum shorter series as zero-padded.
pub fn build_report(
    scope: AccountScope,
    account_name: &str,
    entries: Vec<ServiceCostEntry>,
    top_n_services: usize,
    n_days: usize,
) -> ReportRecord {
    let mut tax = DailyCostSeries::default();
    let mut ranked = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.service_name == TAX_SERVICE {
            tax = entry.series;
        } else {
            ranked.push(entry);
        }
    }

    ranked.sort_by(|a, b| b.series.yesterday().total_cmp(&a.series.yesterday()));

    let rest = ranked.split_off(top_n_services.min(ranked.len()));

    let mut other_costs = DailyCostSeries::zeros(n_days);
    for entry in &rest {
        other_costs += &entry.series;
    }

    let mut total_costs = DailyCostSeries::zeros(n_days);
    for entry in ranked.iter().chain(rest.iter()) {
        total_costs += &entry.series;
    }

    ReportRecord {
        account_id: scope,
        account_name: account_name.to_string(),
        top_services: ranked,
        other_costs,
        total_costs,
        tax,
    }
}

/// Builds report records from a billing collaborator
#[derive(Debug, Clone)]
pub struct CostAggregator {
    settings: AggregatorSettings,
    window: CostWindow,
}

impl CostAggregator {
    /// Create an aggregator whose window ends today (UTC)
    pub fn new(settings: AggregatorSettings) -> Self {
        Self {
            window: CostWindow::ending_today(settings.n_days),
            settings,
        }
    }

    /// Use a fixed window instead of one ending today
    pub fn with_window(mut self, window: CostWindow) -> Self {
        self.window = window;
        self
    }

    /// The window every report covers
    pub fn window(&self) -> &CostWindow {
        &self.window
    }

    /// The settings in effect
    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }

    /// Query billing for `scope` and aggregate the result
    ///
    /// # Errors
    ///
    /// Any billing failure is returned as [`CostReportError::Billing`]; no
    /// partial record is produced.
    pub async fn cost_report<B>(
        &self,
        billing: &B,
        scope: AccountScope,
        account_name: &str,
    ) -> Result<ReportRecord>
    where
        B: BillingQuery + ?Sized,
    {
        let query = CostQuery::new(scope.clone(), self.window);
        debug!(
            "Querying costs for {} ({}) from {} to {}",
            account_name,
            scope,
            self.window.start_str(),
            self.window.end_str()
        );

        let days = billing
            .daily_costs_by_service(&query)
            .await
            .map_err(|e| match e {
                billing @ CostReportError::Billing { .. } => billing,
                other => CostReportError::Billing {
                    scope: scope.to_string(),
                    message: other.to_string(),
                },
            })?;

        let entries = group_by_service(&days, &self.window);
        debug!("{} services billed for {}", entries.len(), account_name);

        Ok(build_report(
            scope,
            account_name,
            entries,
            self.settings.top_n_services,
            self.window.days(),
        ))
    }
}
