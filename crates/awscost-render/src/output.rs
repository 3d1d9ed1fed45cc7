//! Formatter selection and rendered payloads
//!
//! # Examples
//!
//! ```
//! use awscost_render::output::get_formatter;
//! use awscost_render::webhook::WebhookKind;
//!
//! let formatter = get_formatter(WebhookKind::from_url("https://hooks.slack.com/services/x"));
//! assert_eq!(formatter.kind(), WebhookKind::Slack);
//!
//! let payload = formatter.format(&[]).unwrap();
//! assert_eq!(payload.content_type(), "application/json");
//! ```

use crate::slack::{SlackFormatter, SlackMessage};
use crate::teams::{TeamsFormatter, TeamsMessage};
use crate::text::TextFormatter;
use crate::webhook::WebhookKind;
use awscost_core::error::Result;
use awscost_core::types::ReportRecord;

/// A report rendered for one platform
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Slack(SlackMessage),
    Teams(TeamsMessage),
    Text(String),
}

impl Payload {
    /// HTTP content type of [`Payload::body`]
    pub fn content_type(&self) -> &'static str {
        match self {
            Payload::Slack(_) | Payload::Teams(_) => "application/json",
            Payload::Text(_) => "text/plain; charset=utf-8",
        }
    }

    /// Serialized request body
    pub fn body(&self) -> Result<String> {
        Ok(match self {
            Payload::Slack(message) => serde_json::to_string(message)?,
            Payload::Teams(message) => serde_json::to_string(message)?,
            Payload::Text(text) => text.clone(),
        })
    }

    /// Human-readable form for console output
    pub fn display(&self) -> Result<String> {
        Ok(match self {
            Payload::Slack(message) => serde_json::to_string_pretty(message)?,
            Payload::Teams(message) => serde_json::to_string_pretty(message)?,
            Payload::Text(text) => text.clone(),
        })
    }
}

/// Renders report records for one chat platform
///
/// Implementations are pure: formatting the same records twice yields the
/// same payload.
pub trait ReportFormatter {
    /// Platform this formatter targets
    fn kind(&self) -> WebhookKind;

    /// Render every record, per-account records first and the Total last
    fn format(&self, reports: &[ReportRecord]) -> Result<Payload>;
}

/// Get the formatter for a webhook platform
pub fn get_formatter(kind: WebhookKind) -> Box<dyn ReportFormatter> {
    match kind {
        WebhookKind::Slack => Box::new(SlackFormatter),
        WebhookKind::Teams => Box::new(TeamsFormatter),
        WebhookKind::PlainText => Box::new(TextFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{account_record, total_record};

    #[test]
    fn test_get_formatter_matches_kind() {
        for kind in [WebhookKind::Slack, WebhookKind::Teams, WebhookKind::PlainText] {
            assert_eq!(get_formatter(kind).kind(), kind);
        }
    }

    #[test]
    fn test_payload_content_types() {
        let records = vec![account_record("1", "Foo", 1.0), total_record(&["1"], 1.0)];

        let text = get_formatter(WebhookKind::PlainText).format(&records).unwrap();
        assert_eq!(text.content_type(), "text/plain; charset=utf-8");
        assert_eq!(text.body().unwrap(), text.display().unwrap());

        let teams = get_formatter(WebhookKind::Teams).format(&records).unwrap();
        assert_eq!(teams.content_type(), "application/json");
        assert!(teams.display().unwrap().contains('\n'));
    }

    #[test]
    fn test_every_formatter_is_idempotent() {
        let records = vec![account_record("1", "Foo", 1.0), total_record(&["1"], 1.0)];
        for kind in [WebhookKind::Slack, WebhookKind::Teams, WebhookKind::PlainText] {
            let formatter = get_formatter(kind);
            let first = formatter.format(&records).unwrap().body().unwrap();
            let second = formatter.format(&records).unwrap().body().unwrap();
            assert_eq!(first, second);
        }
    }
}
