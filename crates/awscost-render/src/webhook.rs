//! Webhook platform detection

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Host that receives Slack incoming webhooks
pub const SLACK_HOST: &str = "hooks.slack.com";

/// Host that receives Microsoft Teams incoming webhooks
pub const TEAMS_HOST: &str = "outlook.office.com";

/// Chat platform a webhook URL belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookKind {
    Slack,
    Teams,
    PlainText,
}

impl WebhookKind {
    /// Classify a webhook by its host name
    ///
    /// Anything that is not a Slack or Teams host, including a URL that does
    /// not parse, gets plain text.
    ///
    /// # Examples
    /// ```
    /// use awscost_render::webhook::WebhookKind;
    ///
    /// assert_eq!(WebhookKind::from_url("https://hooks.slack.com/services/T/B/x"), WebhookKind::Slack);
    /// assert_eq!(WebhookKind::from_url("https://outlook.office.com/webhook/abc"), WebhookKind::Teams);
    /// assert_eq!(WebhookKind::from_url("https://example.com/hook"), WebhookKind::PlainText);
    /// ```
    pub fn from_url(raw: &str) -> Self {
        let host = Url::parse(raw.trim())
            .ok()
            .and_then(|url| url.host_str().map(str::to_ascii_lowercase));

        match host.as_deref() {
            Some(SLACK_HOST) => WebhookKind::Slack,
            Some(TEAMS_HOST) => WebhookKind::Teams,
            _ => WebhookKind::PlainText,
        }
    }
}

impl fmt::Display for WebhookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookKind::Slack => write!(f, "slack"),
            WebhookKind::Teams => write!(f, "teams"),
            WebhookKind::PlainText => write!(f, "text"),
        }
    }
}
