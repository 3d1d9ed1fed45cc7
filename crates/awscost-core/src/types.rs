//! Core domain types for awscost
//!
//! These types carry cost data from the billing collaborator through
//! aggregation to the formatters. Series are plain `f64` dollars; the
//! wrappers exist so that "yesterday" and out-of-range days are handled the
//! same way everywhere.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

/// Display name of the synthetic record that spans every included account
pub const TOTAL_ACCOUNT_NAME: &str = "Total";

/// Service line that bills monthly and is kept out of the daily ranking
pub const TAX_SERVICE: &str = "Tax";

/// Date format used by the billing API
pub const BILLING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Ordered daily costs, oldest first; the last value is yesterday
///
/// # Examples
/// ```
/// use awscost_core::types::DailyCostSeries;
///
/// let series = DailyCostSeries::from(vec![1.0, 2.5, 4.0]);
/// assert_eq!(series.yesterday(), 4.0);
/// assert_eq!(series.day_before_yesterday(), Some(2.5));
/// assert_eq!(series.get(10), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyCostSeries(Vec<f64>);

impl DailyCostSeries {
    /// Create a series from daily values
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Create a zero-filled series covering `days` days
    pub fn zeros(days: usize) -> Self {
        Self(vec![0.0; days])
    }

    /// Borrow the daily values
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of days in the series
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series has no days at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append the next day's cost
    pub fn push(&mut self, cost: f64) {
        self.0.push(cost);
    }

    /// Add `cost` to day `day`; days past the end are ignored
    pub(crate) fn add_on_day(&mut self, day: usize, cost: f64) {
        if let Some(slot) = self.0.get_mut(day) {
            *slot += cost;
        }
    }

    /// Cost on `day`, or 0.0 past the end of the series
    pub fn get(&self, day: usize) -> f64 {
        self.0.get(day).copied().unwrap_or(0.0)
    }

    /// Yesterday's cost (the last value), 0.0 for an empty series
    pub fn yesterday(&self) -> f64 {
        self.0.last().copied().unwrap_or(0.0)
    }

    /// The value before yesterday, if the series has at least two days
    pub fn day_before_yesterday(&self) -> Option<f64> {
        self.0.len().checked_sub(2).map(|i| self.0[i])
    }
}

impl From<Vec<f64>> for DailyCostSeries {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Elementwise sum over this series' days; missing days on the right-hand
/// side count as zero and extra days are ignored.
impl AddAssign<&DailyCostSeries> for DailyCostSeries {
    fn add_assign(&mut self, rhs: &DailyCostSeries) {
        for (day, cost) in self.0.iter_mut().enumerate() {
            *cost += rhs.get(day);
        }
    }
}

/// One service's daily costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCostEntry {
    /// Billing SERVICE dimension value, e.g. "Amazon Elastic Compute Cloud - Compute"
    pub service_name: String,
    /// Daily cost for this service
    pub series: DailyCostSeries,
}

impl ServiceCostEntry {
    /// Create a new entry
    pub fn new(service_name: impl Into<String>, series: impl Into<DailyCostSeries>) -> Self {
        Self {
            service_name: service_name.into(),
            series: series.into(),
        }
    }
}

/// The account(s) a report covers
///
/// Serializes as a bare id for a single account, or a list for the Total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountScope {
    /// One linked account
    Single(String),
    /// Every included account, used for the Total record
    All(Vec<String>),
}

impl AccountScope {
    /// Account ids to filter the billing query on
    pub fn ids(&self) -> Vec<String> {
        match self {
            AccountScope::Single(id) => vec![id.clone()],
            AccountScope::All(ids) => ids.clone(),
        }
    }
}

impl fmt::Display for AccountScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountScope::Single(id) => write!(f, "{id}"),
            AccountScope::All(ids) => write!(f, "{}", ids.join(",")),
        }
    }
}

/// A member account of the organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// 12-digit account id
    pub id: String,
    /// Account display name
    pub name: String,
}

impl Account {
    /// Create a new account
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One page of the account listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPage {
    /// Accounts on this page
    pub accounts: Vec<Account>,
    /// Token for the next page, `None` on the last page
    pub next_token: Option<String>,
}

/// Temporary credentials returned by role assumption
#[derive(Clone)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: Option<chrono::DateTime<Utc>>,
}

impl fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Trailing window of whole days ending before today
///
/// The end date is exclusive, so a 7-day window queried on the 8th covers
/// the 1st through the 7th and the last day is yesterday.
///
/// # Examples
/// ```
/// use awscost_core::types::CostWindow;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
/// let window = CostWindow::trailing(today, 7);
/// assert_eq!(window.start_str(), "2024-03-01");
/// assert_eq!(window.end_str(), "2024-03-08");
/// assert_eq!(window.days(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl CostWindow {
    /// Window of `days` days ending (exclusive) at `today`
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        Self {
            start: today - Duration::days(i64::from(days)),
            end: today,
        }
    }

    /// Window of `days` days ending at the current UTC date
    pub fn ending_today(days: u32) -> Self {
        Self::trailing(Utc::now().date_naive(), days)
    }

    /// First day (inclusive)
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Day after the last day (exclusive)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered
    pub fn days(&self) -> usize {
        usize::try_from((self.end - self.start).num_days()).unwrap_or(0)
    }

    /// Start date formatted for the billing API
    pub fn start_str(&self) -> String {
        self.start.format(BILLING_DATE_FORMAT).to_string()
    }

    /// End date formatted for the billing API
    pub fn end_str(&self) -> String {
        self.end.format(BILLING_DATE_FORMAT).to_string()
    }
}

/// Cost of one service on one day, as returned by the billing query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAmount {
    pub service: String,
    pub amount: f64,
}

impl ServiceAmount {
    pub fn new(service: impl Into<String>, amount: f64) -> Self {
        Self {
            service: service.into(),
            amount,
        }
    }
}

/// Billing results for a single day, one group per service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyServiceCosts {
    /// The day these costs were incurred
    pub day: NaiveDate,
    /// Per-service unblended cost for the day
    pub groups: Vec<ServiceAmount>,
}

/// Aggregated cost report for one account, or the synthetic Total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Account id, or every included id for the Total
    pub account_id: AccountScope,
    /// Account display name, or "Total"
    pub account_name: String,
    /// Most expensive services by yesterday's cost
    pub top_services: Vec<ServiceCostEntry>,
    /// Sum of every service outside the top list
    pub other_costs: DailyCostSeries,
    /// Sum of every service (tax excluded)
    pub total_costs: DailyCostSeries,
    /// Monthly tax line, kept for reference only
    pub tax: DailyCostSeries,
}

impl ReportRecord {
    /// Whether this is the synthetic all-accounts record
    pub fn is_total(&self) -> bool {
        self.account_name == TOTAL_ACCOUNT_NAME
    }

    /// Total cost yesterday
    pub fn yesterday_total(&self) -> f64 {
        self.total_costs.yesterday()
    }
}
