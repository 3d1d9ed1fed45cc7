//! Cost Explorer daily cost by service

use crate::session::AwsSession;
use async_trait::async_trait;
use aws_sdk_costexplorer::types::{
    DateInterval, Dimension, DimensionValues, Expression, Granularity, GroupDefinition,
    GroupDefinitionType, ResultByTime,
};
use awscost_core::error::{CostReportError, Result};
use awscost_core::provider::{BillingQuery, COST_METRIC, CostQuery, GROUP_BY_DIMENSION};
use awscost_core::types::{BILLING_DATE_FORMAT, DailyServiceCosts, ServiceAmount};
use chrono::NaiveDate;
use tracing::debug;

/// LINKED_ACCOUNT in scope AND NOT RECORD_TYPE in the excluded types
pub fn cost_filter(query: &CostQuery) -> Expression {
    let linked_accounts = Expression::builder()
        .dimensions(
            DimensionValues::builder()
                .key(Dimension::LinkedAccount)
                .set_values(Some(query.scope.ids()))
                .build(),
        )
        .build();

    let excluded_record_types = Expression::builder()
        .not(
            Expression::builder()
                .dimensions(
                    DimensionValues::builder()
                        .key(Dimension::RecordType)
                        .set_values(Some(query.excluded_record_types.clone()))
                        .build(),
                )
                .build(),
        )
        .build();

    Expression::builder()
        .and(linked_accounts)
        .and(excluded_record_types)
        .build()
}

/// Convert Cost Explorer results into one entry per day
///
/// Groups without a service key are skipped; a missing amount counts as zero.
pub fn daily_costs_from_results(results: &[ResultByTime]) -> Result<Vec<DailyServiceCosts>> {
    results
        .iter()
        .map(|result| {
            let start = result
                .time_period()
                .map(|period| period.start())
                .ok_or_else(|| CostReportError::InvalidDate("result without time period".into()))?;
            let day = NaiveDate::parse_from_str(start, BILLING_DATE_FORMAT)
                .map_err(|_| CostReportError::InvalidDate(start.to_string()))?;

            let mut groups = Vec::with_capacity(result.groups().len());
            for group in result.groups() {
                let Some(service) = group.keys().first() else {
                    continue;
                };
                let amount = match group
                    .metrics()
                    .and_then(|metrics| metrics.get(COST_METRIC))
                    .and_then(|metric| metric.amount())
                {
                    Some(raw) => raw.parse::<f64>().map_err(|_| CostReportError::Billing {
                        scope: service.clone(),
                        message: format!("unparsable amount {raw}"),
                    })?,
                    None => 0.0,
                };
                groups.push(ServiceAmount::new(service.clone(), amount));
            }

            Ok(DailyServiceCosts { day, groups })
        })
        .collect()
}

#[async_trait]
impl BillingQuery for AwsSession {
    async fn daily_costs_by_service(&self, query: &CostQuery) -> Result<Vec<DailyServiceCosts>> {
        let billing_error = |message: String| CostReportError::Billing {
            scope: query.scope.to_string(),
            message,
        };

        let interval = DateInterval::builder()
            .start(query.window.start_str())
            .end(query.window.end_str())
            .build()
            .map_err(|e| billing_error(e.to_string()))?;
        let filter = cost_filter(query);

        let mut days = Vec::new();
        let mut next_page_token: Option<String> = None;
        loop {
            let output = self
                .cost_explorer
                .get_cost_and_usage()
                .time_period(interval.clone())
                .granularity(Granularity::Daily)
                .filter(filter.clone())
                .metrics(COST_METRIC)
                .group_by(
                    GroupDefinition::builder()
                        .r#type(GroupDefinitionType::Dimension)
                        .key(GROUP_BY_DIMENSION)
                        .build(),
                )
                .set_next_page_token(next_page_token.take())
                .send()
                .await
                .map_err(|e| {
                    billing_error(aws_sdk_costexplorer::error::DisplayErrorContext(&e).to_string())
                })?;

            days.extend(daily_costs_from_results(output.results_by_time())?);

            match output.next_page_token() {
                Some(token) if !token.is_empty() => {
                    debug!("Fetching next Cost Explorer page for {}", query.scope);
                    next_page_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(days)
    }
}
