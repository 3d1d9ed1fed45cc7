//! Collaborator traits for the cloud side of a report run
//!
//! The orchestrator only talks to these traits. `awscost-aws` implements
//! them with the AWS SDK; tests implement them in memory.

use crate::error::Result;
use crate::types::{AccountPage, AccountScope, CostWindow, DailyServiceCosts};
use async_trait::async_trait;

/// Record types left out of the query; they distort the daily trend
pub const EXCLUDED_RECORD_TYPES: &[&str] = &["Credit", "Refund", "Upfront", "Support"];

/// Cost metric requested from the billing API
pub const COST_METRIC: &str = "UnblendedCost";

/// Dimension the billing results are grouped by
pub const GROUP_BY_DIMENSION: &str = "SERVICE";

/// Daily unblended cost, grouped by service, for some accounts over a window
#[derive(Debug, Clone, PartialEq)]
pub struct CostQuery {
    /// Accounts to filter on
    pub scope: AccountScope,
    /// Days to cover
    pub window: CostWindow,
    /// Record types to exclude
    pub excluded_record_types: Vec<String>,
}

impl CostQuery {
    /// Build the standard query for `scope` over `window`
    pub fn new(scope: AccountScope, window: CostWindow) -> Self {
        Self {
            scope,
            window,
            excluded_record_types: EXCLUDED_RECORD_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

/// Paginated listing of organization member accounts
#[async_trait]
pub trait AccountLister: Send + Sync {
    /// Fetch one page; pass the previous page's token to continue
    async fn list_accounts(&self, next_token: Option<String>) -> Result<AccountPage>;
}

/// Per-day, per-service cost lookups
#[async_trait]
pub trait BillingQuery: Send + Sync {
    /// Run `query` and return one entry per day in the window
    async fn daily_costs_by_service(&self, query: &CostQuery) -> Result<Vec<DailyServiceCosts>>;
}

/// Identity collaborator: finds the organization root and assumes a role in it
///
/// The assumed-role session is what lists accounts and queries billing.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Clients scoped to the assumed role
    type Session: AccountLister + BillingQuery;

    /// Discover the organization's management account id
    async fn root_account(&self) -> Result<String>;

    /// Assume `role_name` in `account_id`
    async fn assume_role(&self, account_id: &str, role_name: &str) -> Result<Self::Session>;
}
