//! CLI interface for awscost
//!
//! Every option can be given as a flag or through its environment variable,
//! so the same binary runs from a shell or from a scheduled job that only
//! sets environment variables.
//!
//! # Example
//!
//! ```bash
//! # Report on every account whose name contains "prod", post to Slack
//! CA_ROLE=CostReader ACCOUNT_NAME_SEARCH_TERM=prod \
//!     WEBHOOK_URLS=https://hooks.slack.com/services/T/B/X awscost
//!
//! # Print the payloads instead of posting them
//! awscost --role CostReader --account-ids '111111111111|222222222222' --dry-run
//! ```

use clap::Parser;

/// Post daily AWS cost summaries to chat webhooks
#[derive(Parser, Debug, Clone)]
#[command(name = "awscost")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Role to assume in the organization root account
    #[arg(long, env = "CA_ROLE")]
    pub role: String,

    /// Root account id (discovered from the organization when omitted)
    #[arg(long, env = "CA_ACCOUNT")]
    pub account: Option<String>,

    /// Pipe-delimited substrings matched against account names
    #[arg(long, env = "ACCOUNT_NAME_SEARCH_TERM")]
    pub search_term: Option<String>,

    /// Pipe-delimited account id allowlist
    #[arg(long, env = "ACCOUNT_IDS")]
    pub account_ids: Option<String>,

    /// Pipe-delimited webhook URLs (prints to stdout when omitted)
    #[arg(long, env = "WEBHOOK_URLS")]
    pub webhook_urls: Option<String>,

    /// Date the credits expire (YYYY-MM-DD)
    #[arg(long, env = "CREDITS_EXPIRE_DATE")]
    pub credits_expire_date: Option<String>,

    /// Date the remaining credit balance was read (YYYY-MM-DD)
    #[arg(long, env = "CREDITS_REMAINING_AS_OF")]
    pub credits_remaining_as_of: Option<String>,

    /// Remaining credit balance in dollars
    #[arg(long, env = "CREDITS_REMAINING")]
    pub credits_remaining: Option<String>,

    /// Number of trailing days in each series
    #[arg(long, env = "COST_DAYS", default_value = "7")]
    pub days: u32,

    /// Number of services listed individually per account
    #[arg(long, env = "TOP_N_SERVICES", default_value = "6")]
    pub top_services: usize,

    /// Print the report records as JSON instead of delivering them
    #[arg(long)]
    pub json: bool,

    /// Print every payload instead of posting it
    #[arg(long)]
    pub dry_run: bool,

    /// Show debug output
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
