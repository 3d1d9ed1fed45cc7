//! Slack incoming-webhook message

use crate::output::{Payload, ReportFormatter};
use crate::text::report_text;
use crate::webhook::WebhookKind;
use awscost_core::error::Result;
use awscost_core::types::ReportRecord;
use serde::{Deserialize, Serialize};

/// Body of a Slack incoming-webhook POST
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    /// mrkdwn text; the tables are fenced so Slack keeps them monospace
    pub text: String,
}

/// Formats every record as one Slack text message
#[derive(Debug, Default, Clone, Copy)]
pub struct SlackFormatter;

impl SlackFormatter {
    /// Build the message without wrapping it in a [`Payload`]
    pub fn message(reports: &[ReportRecord]) -> SlackMessage {
        SlackMessage {
            text: report_text(reports),
        }
    }
}

impl ReportFormatter for SlackFormatter {
    fn kind(&self) -> WebhookKind {
        WebhookKind::Slack
    }

    fn format(&self, reports: &[ReportRecord]) -> Result<Payload> {
        Ok(Payload::Slack(Self::message(reports)))
    }
}
