//! Credit budget tracking
//!
//! When an organization runs on promotional credits, the interesting number
//! is whether yesterday's spend would exhaust the remaining balance before
//! the credits expire. The daily allowance is the balance spread evenly over
//! the days between the balance date and the expiry date.

use crate::error::{CostReportError, Result};
use crate::types::BILLING_DATE_FORMAT;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Remaining credits and when they run out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditBudget {
    /// Date the credits expire
    pub expire_date: NaiveDate,
    /// Date the remaining balance was read
    pub remaining_as_of: NaiveDate,
    /// Balance in dollars on `remaining_as_of`
    pub remaining: f64,
}

/// Whether yesterday's spend fits the daily allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurnRate {
    UnderBudget,
    OverBudget,
}

impl BurnRate {
    /// Chat emoji shortcode for the indicator
    pub fn emoji(&self) -> &'static str {
        match self {
            BurnRate::UnderBudget => ":white_check_mark:",
            BurnRate::OverBudget => ":warning:",
        }
    }
}

impl CreditBudget {
    /// Create a budget, rejecting an expiry before the balance date
    pub fn new(expire_date: NaiveDate, remaining_as_of: NaiveDate, remaining: f64) -> Result<Self> {
        if expire_date < remaining_as_of {
            return Err(CostReportError::Config(format!(
                "credits expire on {expire_date}, before the balance date {remaining_as_of}"
            )));
        }
        if !remaining.is_finite() || remaining < 0.0 {
            return Err(CostReportError::Config(format!(
                "remaining credits must be a non-negative amount, got {remaining}"
            )));
        }

        Ok(Self {
            expire_date,
            remaining_as_of,
            remaining,
        })
    }

    /// Parse the three configuration strings (YYYY-MM-DD dates, dollar amount)
    pub fn parse(expire_date: &str, remaining_as_of: &str, remaining: &str) -> Result<Self> {
        let expire_date = parse_date(expire_date)?;
        let remaining_as_of = parse_date(remaining_as_of)?;
        let remaining = remaining
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse::<f64>()
            .map_err(|_| {
                CostReportError::Config(format!("invalid remaining credits: {remaining}"))
            })?;

        Self::new(expire_date, remaining_as_of, remaining)
    }

    /// Days the balance has to last, at least one
    pub fn days_remaining(&self) -> i64 {
        (self.expire_date - self.remaining_as_of).num_days().max(1)
    }

    /// Spend per day that would use the credits up exactly on expiry
    pub fn daily_allowance(&self) -> f64 {
        self.remaining / self.days_remaining() as f64
    }

    /// Compare a day's spend to the allowance
    pub fn burn_rate(&self, daily_spend: f64) -> BurnRate {
        if daily_spend > self.daily_allowance() {
            BurnRate::OverBudget
        } else {
            BurnRate::UnderBudget
        }
    }

    /// One-line status such as
    /// `:warning: Spent $120.00 yesterday, credit allowance is $100.00/day until 2024-12-31`
    pub fn summary(&self, daily_spend: f64) -> String {
        format!(
            "{} Spent ${:.2} yesterday, credit allowance is ${:.2}/day until {}",
            self.burn_rate(daily_spend).emoji(),
            daily_spend,
            self.daily_allowance(),
            self.expire_date.format(BILLING_DATE_FORMAT)
        )
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), BILLING_DATE_FORMAT)
        .map_err(|_| CostReportError::InvalidDate(raw.to_string()))
}
