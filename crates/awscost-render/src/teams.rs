//! Microsoft Teams Adaptive Card message
//!
//! The card body starts with a header (icon and grand total) followed by one
//! `Container` section per report record. A section holds the record's
//! summary line and a four-column `ColumnSet`:
//!
//! | Column  | Width | Alignment | Wraps |
//! |---------|-------|-----------|-------|
//! | Service | 42    | left      | yes   |
//! | Last7d  | 20    | left      | no    |
//! | $Yday   | 10    | right     | no    |
//! | delta   | 13    | right     | no    |
//!
//! Every column lists a bold heading, one cell per top service, then the
//! Other and Total cells.

use crate::output::{Payload, ReportFormatter};
use crate::sparkline::{delta, dollars, series_sparkline};
use crate::text::{grand_total_summary, summary_line, trend_heading};
use crate::webhook::WebhookKind;
use awscost_core::error::{CostReportError, Result};
use awscost_core::types::{DailyCostSeries, ReportRecord};
use serde::{Deserialize, Serialize};

/// Icon shown in the card header
pub const ICON_URL: &str =
    "https://icons.iconarchive.com/icons/custom-icon-design/flatastic-11/256/Cash-icon.png";

/// Attachment content type for Adaptive Cards
pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

/// Adaptive Card JSON schema
pub const ADAPTIVE_CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";

/// Adaptive Card version the card is written against
pub const ADAPTIVE_CARD_VERSION: &str = "1.2";

/// Body of a Teams incoming-webhook POST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "message")]
pub struct TeamsMessage {
    pub attachments: Vec<CardAttachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAttachment {
    pub content_type: String,
    pub content: AdaptiveCard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "AdaptiveCard")]
pub struct AdaptiveCard {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    pub body: Vec<CardElement>,
}

/// Body elements used by the report card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CardElement {
    TextBlock(TextBlock),
    Image(Image),
    ColumnSet(ColumnSet),
    Container(Container),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    Bolder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spacing {
    Small,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockHeight {
    Stretch,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub wrap: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub separator: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<BlockHeight>,
}

impl TextBlock {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: None,
            wrap: false,
            separator: false,
            spacing: None,
            height: None,
        }
    }

    /// Bold column heading
    fn heading(text: impl Into<String>) -> Self {
        Self {
            weight: Some(FontWeight::Bolder),
            spacing: Some(Spacing::Small),
            height: Some(BlockHeight::Stretch),
            ..Self::plain(text)
        }
    }

    /// Table cell, separated from the row above
    fn cell(text: impl Into<String>, wrap: bool) -> Self {
        Self {
            wrap,
            separator: true,
            spacing: Some(Spacing::Small),
            height: Some(BlockHeight::Stretch),
            ..Self::plain(text)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Column", rename_all = "camelCase")]
pub struct Column {
    pub width: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_content_alignment: Option<HorizontalAlignment>,
    pub items: Vec<CardElement>,
}

impl Column {
    fn new(width: impl Into<String>, items: Vec<CardElement>) -> Self {
        Self {
            width: width.into(),
            horizontal_content_alignment: None,
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSet {
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default, skip_serializing_if = "is_false")]
    pub separator: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    pub items: Vec<CardElement>,
}

/// The four table columns of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Service,
    Trend,
    Yesterday,
    Delta,
}

impl ColumnKind {
    /// Columns in display order
    pub const ALL: [ColumnKind; 4] = [
        ColumnKind::Service,
        ColumnKind::Trend,
        ColumnKind::Yesterday,
        ColumnKind::Delta,
    ];

    fn heading(&self, record: &ReportRecord) -> String {
        match self {
            ColumnKind::Service => "Service".to_string(),
            ColumnKind::Trend => trend_heading(record),
            ColumnKind::Yesterday => "$Yday".to_string(),
            ColumnKind::Delta => "delta".to_string(),
        }
    }

    /// Relative column width
    pub fn width(&self) -> &'static str {
        match self {
            ColumnKind::Service => "42",
            ColumnKind::Trend => "20",
            ColumnKind::Yesterday => "10",
            ColumnKind::Delta => "13",
        }
    }

    fn alignment(&self) -> Option<HorizontalAlignment> {
        match self {
            ColumnKind::Yesterday | ColumnKind::Delta => Some(HorizontalAlignment::Right),
            ColumnKind::Service | ColumnKind::Trend => None,
        }
    }

    fn cell_text(&self, name: &str, series: &DailyCostSeries) -> String {
        match self {
            ColumnKind::Service => name.to_string(),
            ColumnKind::Trend => series_sparkline(series),
            ColumnKind::Yesterday => dollars(series.yesterday()),
            ColumnKind::Delta => delta(series),
        }
    }

    fn wraps(&self) -> bool {
        matches!(self, ColumnKind::Service)
    }
}

fn table_column(kind: ColumnKind, record: &ReportRecord) -> Column {
    let mut items = vec![CardElement::TextBlock(TextBlock::heading(kind.heading(record)))];

    let rows = record
        .top_services
        .iter()
        .map(|entry| (entry.service_name.as_str(), &entry.series))
        .chain([("Other", &record.other_costs), ("Total", &record.total_costs)]);

    for (name, series) in rows {
        items.push(CardElement::TextBlock(TextBlock::cell(
            kind.cell_text(name, series),
            kind.wraps(),
        )));
    }

    Column {
        horizontal_content_alignment: kind.alignment(),
        ..Column::new(kind.width(), items)
    }
}

/// One card section for a record
///
/// # Errors
///
/// Returns [`CostReportError::Internal`] if the columns end up with
/// different numbers of cells.
pub fn section(record: &ReportRecord) -> Result<CardElement> {
    let columns: Vec<Column> = ColumnKind::ALL
        .iter()
        .map(|kind| table_column(*kind, record))
        .collect();

    let expected = record.top_services.len() + 3;
    if let Some(column) = columns.iter().find(|c| c.items.len() != expected) {
        return Err(CostReportError::Internal(format!(
            "column of width {} has {} cells, expected {}",
            column.width,
            column.items.len(),
            expected
        )));
    }

    Ok(CardElement::Container(Container {
        separator: true,
        spacing: Some(Spacing::Medium),
        items: vec![
            CardElement::TextBlock(TextBlock {
                wrap: true,
                ..TextBlock::plain(summary_line(record))
            }),
            CardElement::ColumnSet(ColumnSet { columns }),
        ],
    }))
}

fn header(reports: &[ReportRecord]) -> CardElement {
    CardElement::ColumnSet(ColumnSet {
        columns: vec![
            Column::new(
                "auto",
                vec![CardElement::Image(Image {
                    url: ICON_URL.to_string(),
                    size: Some("Small".to_string()),
                })],
            ),
            Column::new(
                "stretch",
                vec![CardElement::TextBlock(TextBlock {
                    weight: Some(FontWeight::Bolder),
                    wrap: true,
                    ..TextBlock::plain(grand_total_summary(reports))
                })],
            ),
        ],
    })
}

/// Formats every record into a single Adaptive Card
#[derive(Debug, Default, Clone, Copy)]
pub struct TeamsFormatter;

impl TeamsFormatter {
    /// Build the card message without wrapping it in a [`Payload`]
    pub fn message(reports: &[ReportRecord]) -> Result<TeamsMessage> {
        let mut body = Vec::with_capacity(reports.len() + 1);
        body.push(header(reports));
        for record in reports {
            body.push(section(record)?);
        }

        Ok(TeamsMessage {
            attachments: vec![CardAttachment {
                content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
                content: AdaptiveCard {
                    schema: ADAPTIVE_CARD_SCHEMA.to_string(),
                    version: ADAPTIVE_CARD_VERSION.to_string(),
                    body,
                },
            }],
        })
    }
}

impl ReportFormatter for TeamsFormatter {
    fn kind(&self) -> WebhookKind {
        WebhookKind::Teams
    }

    fn format(&self, reports: &[ReportRecord]) -> Result<Payload> {
        Ok(Payload::Teams(Self::message(reports)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{account_record, total_record};
    use serde_json::Value;

    fn card_body(records: &[ReportRecord]) -> Vec<Value> {
        let body = TeamsFormatter.format(records).unwrap().body().unwrap();
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["type"], "message");
        let attachment = &value["attachments"][0];
        assert_eq!(attachment["contentType"], ADAPTIVE_CARD_CONTENT_TYPE);
        assert_eq!(attachment["content"]["type"], "AdaptiveCard");
        attachment["content"]["body"].as_array().unwrap().clone()
    }

    #[test]
    fn test_one_section_per_record_with_four_columns() {
        let records = vec![
            account_record("1", "Foo", 1.0),
            account_record("2", "Bar", 2.0),
            total_record(&["1", "2"], 3.0),
        ];
        let body = card_body(&records);

        let sections: Vec<&Value> = body.iter().filter(|e| e["type"] == "Container").collect();
        assert_eq!(sections.len(), records.len());

        for (section, record) in sections.iter().zip(&records) {
            let items = section["items"].as_array().unwrap();
            assert_eq!(items[0]["type"], "TextBlock");
            assert_eq!(items[0]["text"], summary_line(record));

            let columns = items[1]["columns"].as_array().unwrap();
            assert_eq!(columns.len(), 4);
            for column in columns {
                assert_eq!(column["type"], "Column");
                assert_eq!(
                    column["items"].as_array().unwrap().len(),
                    1 + record.top_services.len() + 2
                );
            }
        }
    }

    #[test]
    fn test_type_tags_come_from_the_types() {
        let message = TeamsFormatter::message(&[account_record("1", "Foo", 1.0)]).unwrap();
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["type"], "message");
        assert_eq!(value["attachments"][0]["content"]["type"], "AdaptiveCard");
        let header_columns = value["attachments"][0]["content"]["body"][0]["columns"]
            .as_array()
            .unwrap();
        assert!(header_columns.iter().all(|c| c["type"] == "Column"));

        let parsed: TeamsMessage = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, message);
    }

    #[test]
    fn test_column_widths_alignment_and_wrap() {
        let records = vec![account_record("1", "Foo", 1.0)];
        let body = card_body(&records);
        let columns = body[1]["items"][1]["columns"].as_array().unwrap();

        let widths: Vec<&str> = columns.iter().map(|c| c["width"].as_str().unwrap()).collect();
        assert_eq!(widths, vec!["42", "20", "10", "13"]);

        assert!(columns[0].get("horizontalContentAlignment").is_none());
        assert!(columns[1].get("horizontalContentAlignment").is_none());
        assert_eq!(columns[2]["horizontalContentAlignment"], "Right");
        assert_eq!(columns[3]["horizontalContentAlignment"], "Right");

        let headings: Vec<&str> = columns
            .iter()
            .map(|c| c["items"][0]["text"].as_str().unwrap())
            .collect();
        assert_eq!(headings, vec!["Service", "Last7d", "$Yday", "delta"]);
        assert_eq!(columns[0]["items"][0]["weight"], "Bolder");

        let service_cell = &columns[0]["items"][1];
        assert_eq!(service_cell["text"], "EC2");
        assert_eq!(service_cell["wrap"], true);
        assert_eq!(service_cell["separator"], true);
        assert_eq!(service_cell["spacing"], "Small");
        assert_eq!(service_cell["height"], "stretch");
        assert!(columns[2]["items"][1].get("wrap").is_none());

        let last = columns[0]["items"].as_array().unwrap().last().unwrap();
        assert_eq!(last["text"], "Total");
        assert_eq!(columns[2]["items"][3]["text"], "$10.00");
    }

    #[test]
    fn test_header_has_icon_and_grand_total() {
        let records = vec![account_record("1", "Foo", 1.0), total_record(&["1"], 1.0)];
        let body = card_body(&records);
        let header = &body[0];
        assert_eq!(header["type"], "ColumnSet");
        assert_eq!(header["columns"][0]["items"][0]["type"], "Image");
        assert_eq!(header["columns"][0]["items"][0]["url"], ICON_URL);
        assert_eq!(
            header["columns"][1]["items"][0]["text"],
            "Total cost yesterday was $10.00"
        );
    }

    #[test]
    fn test_message_round_trips_through_serde() {
        let records = vec![account_record("1", "Foo", 1.0)];
        let message = TeamsFormatter::message(&records).unwrap();
        let json = serde_json::to_string(&message).unwrap();
        let parsed: TeamsMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, message);
    }
}
