//! Clients scoped to the assumed role

use crate::BILLING_REGION;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use awscost_core::error::{CostReportError, Result};
use awscost_core::provider::AccountLister;
use awscost_core::types::{Account, AccountPage, TemporaryCredentials};
use std::time::SystemTime;
use tracing::debug;

/// Accounts requested per Organizations listing call
pub const ACCOUNT_PAGE_SIZE: i32 = 5;

/// Organizations and Cost Explorer clients built from assumed-role credentials
#[derive(Debug, Clone)]
pub struct AwsSession {
    pub(crate) organizations: aws_sdk_organizations::Client,
    pub(crate) cost_explorer: aws_sdk_costexplorer::Client,
}

impl AwsSession {
    /// Build clients that sign with `credentials`
    pub async fn from_credentials(credentials: &TemporaryCredentials) -> Self {
        let provider = Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            Some(credentials.session_token.clone()),
            credentials.expiration.map(SystemTime::from),
            "awscost-assumed-role",
        );

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(BILLING_REGION))
            .credentials_provider(provider)
            .load()
            .await;

        Self {
            organizations: aws_sdk_organizations::Client::new(&config),
            cost_explorer: aws_sdk_costexplorer::Client::new(&config),
        }
    }
}

#[async_trait]
impl AccountLister for AwsSession {
    async fn list_accounts(&self, next_token: Option<String>) -> Result<AccountPage> {
        let output = self
            .organizations
            .list_accounts()
            .max_results(ACCOUNT_PAGE_SIZE)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| {
                CostReportError::AccountListing(
                    aws_sdk_organizations::error::DisplayErrorContext(&e).to_string(),
                )
            })?;

        let accounts: Vec<Account> = output
            .accounts()
            .iter()
            .filter_map(|account| {
                let id = account.id()?;
                Some(Account::new(id, account.name().unwrap_or_default()))
            })
            .collect();

        debug!("Listed {} accounts", accounts.len());
        Ok(AccountPage {
            accounts,
            next_token: output.next_token().map(str::to_string),
        })
    }
}
