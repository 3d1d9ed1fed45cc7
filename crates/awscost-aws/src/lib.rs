//! AWS provider for awscost
//!
//! This crate implements the collaborator traits with the AWS SDK: STS for
//! role assumption, Organizations for the root account and member listing,
//! and Cost Explorer for daily cost by service.

pub mod billing;
pub mod credentials;
pub mod session;

pub use credentials::AwsCredentialsProvider;
pub use session::AwsSession;

/// Region that serves the Organizations and Cost Explorer APIs
pub const BILLING_REGION: &str = "us-east-1";
