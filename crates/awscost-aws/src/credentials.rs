//! Root account discovery and cross-account role assumption

use crate::BILLING_REGION;
use crate::session::AwsSession;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use awscost_core::error::{CostReportError, Result};
use awscost_core::provider::CredentialsProvider;
use awscost_core::types::TemporaryCredentials;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Session name recorded in CloudTrail for the assumed role
pub const ROLE_SESSION_NAME: &str = "cross_acct_lambda";

/// ARN of `role_name` in `account_id`
pub fn role_arn(account_id: &str, role_name: &str) -> String {
    format!("arn:aws:iam::{account_id}:role/{role_name}")
}

/// Uses the ambient AWS credentials (environment, profile, instance role)
/// to find the organization and assume the reporting role.
pub struct AwsCredentialsProvider {
    config: SdkConfig,
}

impl AwsCredentialsProvider {
    /// Load the default credential chain
    pub async fn from_env() -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(BILLING_REGION))
            .load()
            .await;
        Self { config }
    }

    /// Use an already loaded SDK configuration
    pub fn with_config(config: SdkConfig) -> Self {
        Self { config }
    }
}

fn to_chrono(expiration: &aws_sdk_sts::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(expiration.secs(), expiration.subsec_nanos())
}

#[async_trait]
impl CredentialsProvider for AwsCredentialsProvider {
    type Session = AwsSession;

    async fn root_account(&self) -> Result<String> {
        let client = aws_sdk_organizations::Client::new(&self.config);
        let output = client.describe_organization().send().await.map_err(|e| {
            CostReportError::Credentials(format!(
                "describe organization: {}",
                aws_sdk_organizations::error::DisplayErrorContext(&e)
            ))
        })?;

        let root = output
            .organization()
            .and_then(|org| org.master_account_id())
            .ok_or_else(|| {
                CostReportError::Credentials(
                    "organization has no management account id".to_string(),
                )
            })?;

        info!("Discovered organization root account {}", root);
        Ok(root.to_string())
    }

    async fn assume_role(&self, account_id: &str, role_name: &str) -> Result<AwsSession> {
        let arn = role_arn(account_id, role_name);
        debug!("Assuming role {}", arn);

        let client = aws_sdk_sts::Client::new(&self.config);
        let output = client
            .assume_role()
            .role_arn(&arn)
            .role_session_name(ROLE_SESSION_NAME)
            .send()
            .await
            .map_err(|e| {
                CostReportError::Credentials(format!(
                    "assume role {arn}: {}",
                    aws_sdk_sts::error::DisplayErrorContext(&e)
                ))
            })?;

        let credentials = output.credentials().ok_or_else(|| {
            CostReportError::Credentials(format!("assume role {arn} returned no credentials"))
        })?;

        let temporary = TemporaryCredentials {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: credentials.session_token().to_string(),
            expiration: to_chrono(credentials.expiration()),
        };

        info!("Assumed role {}", arn);
        Ok(AwsSession::from_credentials(&temporary).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_arn() {
        assert_eq!(
            role_arn("123456789012", "CostReader"),
            "arn:aws:iam::123456789012:role/CostReader"
        );
    }

    #[test]
    fn test_expiration_conversion() {
        let expiration = aws_sdk_sts::primitives::DateTime::from_secs(1_700_000_000);
        let converted = to_chrono(&expiration).unwrap();
        assert_eq!(converted.timestamp(), 1_700_000_000);
    }
}
