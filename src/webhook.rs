//! Payload delivery
//!
//! A [`WebhookSink`] takes a rendered [`Payload`] to a [`Destination`].
//! [`HttpWebhookSink`] posts to chat webhooks; [`ConsoleSink`] writes to
//! stdout and backs both the no-webhook mode and `--dry-run`.

use async_trait::async_trait;
use awscost_core::error::Result;
use awscost_render::output::Payload;
use awscost_render::webhook::WebhookKind;
use colored::Colorize;
use std::fmt;
use std::io::Write;
use tracing::{debug, warn};

/// Where a rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// A chat webhook, classified by its host
    Webhook { url: String, kind: WebhookKind },
    /// Standard output
    Console,
}

impl Destination {
    /// Classify a configured webhook URL
    pub fn webhook(url: impl Into<String>) -> Self {
        let url = url.into();
        let kind = WebhookKind::from_url(&url);
        Destination::Webhook { url, kind }
    }

    /// Formatter kind for this destination; the console gets plain text
    pub fn kind(&self) -> WebhookKind {
        match self {
            Destination::Webhook { kind, .. } => *kind,
            Destination::Console => WebhookKind::PlainText,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Webhook { url, kind } => write!(f, "{kind} webhook {url}"),
            Destination::Console => write!(f, "stdout"),
        }
    }
}

/// Outcome of one delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The webhook answered with a 2xx status
    Delivered { status: u16 },
    /// The webhook answered with any other status
    Rejected { status: u16, body: String },
    /// The payload was written to stdout
    Printed,
}

impl DeliveryStatus {
    /// Whether the payload reached its destination
    pub fn is_success(&self) -> bool {
        !matches!(self, DeliveryStatus::Rejected { .. })
    }
}

/// Delivers rendered payloads
#[async_trait]
pub trait WebhookSink: Send + Sync {
    /// Deliver `payload` to `destination`
    ///
    /// # Errors
    ///
    /// Transport failures are errors. A non-2xx response is not; it comes
    /// back as [`DeliveryStatus::Rejected`].
    async fn deliver(&self, destination: &Destination, payload: &Payload)
    -> Result<DeliveryStatus>;
}

/// Posts payloads over HTTP
pub struct HttpWebhookSink {
    client: reqwest::Client,
}

impl HttpWebhookSink {
    /// Create a sink with a default HTTP client
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a sink around an existing client
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpWebhookSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookSink for HttpWebhookSink {
    async fn deliver(
        &self,
        destination: &Destination,
        payload: &Payload,
    ) -> Result<DeliveryStatus> {
        let url = match destination {
            Destination::Webhook { url, .. } => url,
            Destination::Console => return ConsoleSink::new().deliver(destination, payload).await,
        };

        debug!(destination = %destination, "Posting report");
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, payload.content_type())
            .body(payload.body()?)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(destination = %destination, status = %status, "Report delivered");
            Ok(DeliveryStatus::Delivered {
                status: status.as_u16(),
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(
                destination = %destination,
                status = %status,
                body = %body,
                "Webhook rejected report"
            );
            Ok(DeliveryStatus::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Writes payloads to stdout
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WebhookSink for ConsoleSink {
    async fn deliver(
        &self,
        destination: &Destination,
        payload: &Payload,
    ) -> Result<DeliveryStatus> {
        let rendered = payload.display()?;
        let mut stdout = std::io::stdout().lock();
        if let Destination::Webhook { .. } = destination {
            let heading = format!("==> {destination}");
            if is_terminal::is_terminal(std::io::stdout()) {
                writeln!(stdout, "{}", heading.bold().cyan())?;
            } else {
                writeln!(stdout, "{heading}")?;
            }
        }
        writeln!(stdout, "{rendered}")?;
        stdout.flush()?;
        Ok(DeliveryStatus::Printed)
    }
}
