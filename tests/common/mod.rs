//! Common test utilities and helpers for awscost tests
//!
//! In-memory collaborators standing in for AWS and the webhook transport,
//! plus builders for configurations with a fixed cost window.

#![allow(dead_code)]

use async_trait::async_trait;
use awscost::config::ReportConfig;
use awscost::webhook::{DeliveryStatus, Destination, WebhookSink};
use awscost_core::aggregation::{AggregatorSettings, CostAggregator};
use awscost_core::credits::CreditBudget;
use awscost_core::error::{CostReportError, Result};
use awscost_core::filters::AccountFilter;
use awscost_core::provider::{AccountLister, BillingQuery, CostQuery, CredentialsProvider};
use awscost_core::types::{
    Account, AccountPage, AccountScope, CostWindow, DailyServiceCosts, ServiceAmount,
};
use awscost_render::output::Payload;
use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// Global mutex to serialize environment variable modifications in tests
pub static ENV_MUTEX: Lazy<tokio::sync::Mutex<()>> = Lazy::new(|| tokio::sync::Mutex::new(()));

/// Accounts per listing page, matching the AWS listing
pub const PAGE_SIZE: usize = 5;

/// Day the fixed test window ends (exclusive)
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 8).unwrap()
}

/// Seven-day window 2024-06-01 ..= 2024-06-07
pub fn fixed_window() -> CostWindow {
    CostWindow::trailing(today(), 7)
}

pub fn fixed_aggregator(settings: AggregatorSettings) -> CostAggregator {
    CostAggregator::new(settings).with_window(fixed_window())
}

/// Configuration with a role, no filter, no webhooks and default settings
pub fn test_config() -> ReportConfig {
    ReportConfig {
        role: "CostReader".to_string(),
        root_account: None,
        filter: AccountFilter::new(),
        webhook_urls: Vec::new(),
        credits: None,
        settings: AggregatorSettings::default(),
        json: false,
        dry_run: false,
    }
}

pub fn with_webhooks(mut config: ReportConfig, urls: &[&str]) -> ReportConfig {
    config.webhook_urls = urls.iter().map(|u| u.to_string()).collect();
    config
}

pub fn with_credits(mut config: ReportConfig, remaining: &str) -> ReportConfig {
    config.credits = Some(CreditBudget::parse("2024-12-31", "2024-12-01", remaining).unwrap());
    config
}

/// Daily costs per service, oldest day first
pub type ServiceSeries = Vec<(String, Vec<f64>)>;

#[derive(Default)]
struct Organization {
    accounts: Vec<Account>,
    costs: HashMap<String, ServiceSeries>,
    failing_scope: Option<String>,
    queries: Vec<AccountScope>,
    list_calls: usize,
}

/// In-memory organization implementing listing and billing
#[derive(Clone, Default)]
pub struct MockSession {
    inner: Arc<Mutex<Organization>>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account with its per-service daily costs
    pub fn with_account(self, id: &str, name: &str, services: Vec<(&str, Vec<f64>)>) -> Self {
        {
            let mut org = self.inner.lock().unwrap();
            org.accounts.push(Account::new(id, name));
            org.costs.insert(
                id.to_string(),
                services
                    .into_iter()
                    .map(|(service, values)| (service.to_string(), values))
                    .collect(),
            );
        }
        self
    }

    /// Fail every billing query whose scope displays as `scope`
    pub fn failing_on(self, scope: &str) -> Self {
        self.inner.lock().unwrap().failing_scope = Some(scope.to_string());
        self
    }

    /// Scopes queried so far, in order
    pub fn queries(&self) -> Vec<AccountScope> {
        self.inner.lock().unwrap().queries.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.inner.lock().unwrap().list_calls
    }
}

#[async_trait]
impl AccountLister for MockSession {
    async fn list_accounts(&self, next_token: Option<String>) -> Result<AccountPage> {
        let mut org = self.inner.lock().unwrap();
        org.list_calls += 1;

        let start = match next_token {
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| CostReportError::AccountListing(format!("bad token {token}")))?,
            None => 0,
        };
        let end = (start + PAGE_SIZE).min(org.accounts.len());
        let next_token = (end < org.accounts.len()).then(|| format!("page-{end}"));

        Ok(AccountPage {
            accounts: org.accounts[start.min(end)..end].to_vec(),
            next_token,
        })
    }
}

#[async_trait]
impl BillingQuery for MockSession {
    async fn daily_costs_by_service(&self, query: &CostQuery) -> Result<Vec<DailyServiceCosts>> {
        let mut org = self.inner.lock().unwrap();
        org.queries.push(query.scope.clone());

        if org.failing_scope.as_deref() == Some(query.scope.to_string().as_str()) {
            return Err(CostReportError::Billing {
                scope: query.scope.to_string(),
                message: "AccessDenied".to_string(),
            });
        }

        let days = query.window.days();
        let mut result: Vec<DailyServiceCosts> = (0..days)
            .map(|offset| DailyServiceCosts {
                day: query.window.start() + Duration::days(offset as i64),
                groups: Vec::new(),
            })
            .collect();

        for id in query.scope.ids() {
            let Some(services) = org.costs.get(&id) else {
                continue;
            };
            for (service, values) in services {
                for (day, amount) in values.iter().enumerate().take(days) {
                    result[day]
                        .groups
                        .push(ServiceAmount::new(service.clone(), *amount));
                }
            }
        }

        Ok(result)
    }
}

/// Credentials provider handing out a shared [`MockSession`]
pub struct MockProvider {
    pub session: MockSession,
    pub root: String,
    assumed: Mutex<Vec<(String, String)>>,
}

impl MockProvider {
    pub fn new(session: MockSession) -> Self {
        Self {
            session,
            root: "000000000000".to_string(),
            assumed: Mutex::new(Vec::new()),
        }
    }

    /// (account, role) pairs passed to `assume_role`
    pub fn assumed(&self) -> Vec<(String, String)> {
        self.assumed.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialsProvider for MockProvider {
    type Session = MockSession;

    async fn root_account(&self) -> Result<String> {
        Ok(self.root.clone())
    }

    async fn assume_role(&self, account_id: &str, role_name: &str) -> Result<MockSession> {
        self.assumed
            .lock()
            .unwrap()
            .push((account_id.to_string(), role_name.to_string()));
        Ok(self.session.clone())
    }
}

/// Sink that records payloads instead of sending them
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(Destination, Payload)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(Destination, Payload)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookSink for RecordingSink {
    async fn deliver(
        &self,
        destination: &Destination,
        payload: &Payload,
    ) -> Result<DeliveryStatus> {
        self.sent
            .lock()
            .unwrap()
            .push((destination.clone(), payload.clone()));
        Ok(match destination {
            Destination::Console => DeliveryStatus::Printed,
            Destination::Webhook { .. } => DeliveryStatus::Delivered { status: 200 },
        })
    }
}

/// Two accounts billing one service `[1..7]` each
pub fn foo_bar_session() -> MockSession {
    let week = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    MockSession::new()
        .with_account("1", "Foo", vec![("Amazon EC2", week.clone())])
        .with_account("2", "Bar", vec![("Amazon EC2", week)])
}

/// RAII guard that restores an environment variable on drop
pub struct EnvVarGuard {
    key: String,
    original: Option<String>,
}

impl EnvVarGuard {
    pub fn set(key: &str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        unsafe {
            std::env::set_var(key, value);
        }
        Self {
            key: key.to_string(),
            original,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(value) => std::env::set_var(&self.key, value),
                None => std::env::remove_var(&self.key),
            }
        }
    }
}
