//! Error types for awscost
//!
//! This module defines the error types used throughout the awscost crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use awscost_core::error::{CostReportError, Result};
//!
//! fn parse_amount(raw: &str) -> Result<f64> {
//!     raw.parse::<f64>()
//!         .map_err(|_| CostReportError::Config(format!("not an amount: {raw}")))
//! }
//!
//! assert!(parse_amount("12.50").is_ok());
//! assert!(parse_amount("twelve").is_err());
//! ```

use thiserror::Error;

/// Main error type for awscost operations
///
/// Credential, listing and billing failures are fatal to a run. Webhook
/// responses with a non-2xx status are not errors; they are reported through
/// the delivery status instead.
#[derive(Error, Debug)]
pub enum CostReportError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Role assumption or root account discovery was rejected
    #[error("Credential error: {0}")]
    Credentials(String),

    /// Listing organization accounts failed
    #[error("Account listing error: {0}")]
    AccountListing(String),

    /// The billing query for an account (or the Total) failed
    #[error("Billing query failed for {scope}: {message}")]
    Billing {
        /// Display form of the account scope that was queried
        scope: String,
        /// The error message reported by the billing backend
        message: String,
    },

    /// No account passed the inclusion filter
    #[error("No accounts matched the inclusion filter")]
    NoAccounts,

    /// Network error while delivering a webhook
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A formatter produced an inconsistent structure
    #[error("Internal consistency error: {0}")]
    Internal(String),
}

/// Convenience type alias for Results in awscost
pub type Result<T> = std::result::Result<T, CostReportError>;
