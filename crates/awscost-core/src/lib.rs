//! Core types, traits, and cost aggregation for awscost
//!
//! This crate provides the data model shared by every other awscost crate,
//! the error type, the collaborator traits for credentials, account listing
//! and billing, and the aggregation that turns billing results into ranked
//! report records.

pub mod aggregation;
pub mod credits;
pub mod error;
pub mod filters;
pub mod provider;
pub mod types;

// Re-export commonly used types
pub use error::{CostReportError, Result};
pub use types::{
    Account, AccountPage, AccountScope, CostWindow, DailyCostSeries, DailyServiceCosts,
    ReportRecord, ServiceAmount, ServiceCostEntry, TemporaryCredentials,
};
