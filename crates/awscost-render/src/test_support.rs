//! Report records shared by the formatter unit tests

use awscost_core::types::{AccountScope, DailyCostSeries, ReportRecord, ServiceCostEntry};

fn costs(other_yesterday: f64) -> (ServiceCostEntry, DailyCostSeries, DailyCostSeries) {
    let ec2 = ServiceCostEntry::new("EC2", vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 9.0]);
    let other = DailyCostSeries::from(vec![0.5, 0.5, 0.5, 0.5, 0.5, 0.5, other_yesterday]);
    let mut total = DailyCostSeries::zeros(7);
    total += &ec2.series;
    total += &other;
    (ec2, other, total)
}

/// One account: EC2 at $9 yesterday plus `other_yesterday` of other services
pub fn account_record(id: &str, name: &str, other_yesterday: f64) -> ReportRecord {
    let (ec2, other_costs, total_costs) = costs(other_yesterday);
    ReportRecord {
        account_id: AccountScope::Single(id.to_string()),
        account_name: name.to_string(),
        top_services: vec![ec2],
        other_costs,
        total_costs,
        tax: DailyCostSeries::default(),
    }
}

/// Total record over `ids` with the same shape as [`account_record`]
pub fn total_record(ids: &[&str], other_yesterday: f64) -> ReportRecord {
    let (ec2, other_costs, total_costs) = costs(other_yesterday);
    ReportRecord {
        account_id: AccountScope::All(ids.iter().map(|id| id.to_string()).collect()),
        account_name: "Total".to_string(),
        top_services: vec![ec2],
        other_costs,
        total_costs,
        tax: DailyCostSeries::default(),
    }
}
