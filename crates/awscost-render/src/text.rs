//! Fixed-width text report
//!
//! Each record renders as a summary line followed by a code block holding a
//! monospace table. The Slack formatter sends the same text.

use crate::output::{Payload, ReportFormatter};
use crate::sparkline::{delta, dollars, series_sparkline};
use crate::webhook::WebhookKind;
use awscost_core::error::Result;
use awscost_core::types::{DailyCostSeries, ReportRecord};

/// Width of the service name column
pub const SERVICE_COLUMN_WIDTH: usize = 40;

/// Chat code block delimiter
pub const CODE_FENCE: &str = "```";

/// `"Account {name}({id}) cost yesterday was $X"`, or the Total wording
pub fn summary_line(record: &ReportRecord) -> String {
    if record.is_total() {
        format!(
            "Total cost yesterday was {}",
            dollars(record.yesterday_total())
        )
    } else {
        format!(
            "Account {}({}) cost yesterday was {}",
            record.account_name,
            record.account_id,
            dollars(record.yesterday_total())
        )
    }
}

/// Summary for the whole run, taken from the Total record
///
/// Without a Total record the per-account totals are added up instead.
pub fn grand_total_summary(records: &[ReportRecord]) -> String {
    let total = match records.iter().rev().find(|r| r.is_total()) {
        Some(record) => record.yesterday_total(),
        None => records.iter().map(ReportRecord::yesterday_total).sum(),
    };
    format!("Total cost yesterday was {}", dollars(total))
}

/// Heading for the sparkline column, e.g. "Last7d"
pub fn trend_heading(record: &ReportRecord) -> String {
    format!("Last{}d", record.total_costs.len())
}

fn table_row(out: &mut String, name: &str, spark: &str, amount: &str, change: &str) {
    out.push_str(&format!(
        "{name:<width$} {spark:<7} {amount:<7} {change:<10}\n",
        width = SERVICE_COLUMN_WIDTH
    ));
}

fn series_row(out: &mut String, name: &str, series: &DailyCostSeries) {
    table_row(
        out,
        name,
        &series_sparkline(series),
        &dollars(series.yesterday()),
        &delta(series),
    );
}

/// Summary line and table for one record
pub fn record_block(record: &ReportRecord) -> String {
    let mut out = String::new();
    out.push_str(&summary_line(record));
    out.push('\n');
    out.push_str(CODE_FENCE);
    out.push('\n');

    table_row(&mut out, "Service", &trend_heading(record), "$Yday", "∆%");
    for entry in &record.top_services {
        series_row(&mut out, &entry.service_name, &entry.series);
    }
    series_row(&mut out, "Other", &record.other_costs);
    series_row(&mut out, "Total", &record.total_costs);

    out.push_str(CODE_FENCE);
    out.push('\n');
    out
}

/// Complete text report: grand total, then every record's block
pub fn report_text(records: &[ReportRecord]) -> String {
    let blocks: String = records.iter().map(record_block).collect();
    format!("{}\n\n\n\n{}\n", grand_total_summary(records), blocks)
}

/// Plain-text formatter for consoles and unknown webhook hosts
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn kind(&self) -> WebhookKind {
        WebhookKind::PlainText
    }

    fn format(&self, reports: &[ReportRecord]) -> Result<Payload> {
        Ok(Payload::Text(report_text(reports)))
    }
}
