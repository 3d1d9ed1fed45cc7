//! Report rendering for awscost
//!
//! This crate turns report records into chat messages: sparklines and
//! deltas for each row, and one formatter per platform (Slack, Microsoft
//! Teams, plain text), selected from the webhook URL.

pub mod output;
pub mod slack;
pub mod sparkline;
pub mod teams;
pub mod text;
pub mod webhook;

#[cfg(test)]
mod test_support;

pub use output::{Payload, ReportFormatter, get_formatter};
pub use slack::{SlackFormatter, SlackMessage};
pub use teams::{TeamsFormatter, TeamsMessage};
pub use text::TextFormatter;
pub use webhook::WebhookKind;
