//! The fetch-and-aggregate sequence behind one render cycle.
//!
//! Each function runs the catalog queries in order and stops at the first
//! failure, so callers only ever see a complete result or an error.

use serde::Serialize;
use tracing::debug;

use crate::domain::aggregate::DetailReducers;
use crate::domain::{DashboardSnapshot, DetailReport, SnapshotInputs};
use crate::error::Result;
use crate::port::outbound::source::CrmSource;

/// Everything presentation and export need for one render cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub snapshot: DashboardSnapshot,
    pub report: DetailReport,
}

/// Fetch KPI inputs and compute the snapshot.
pub fn load_snapshot(source: &dyn CrmSource) -> Result<DashboardSnapshot> {
    let total_leads = source.total_leads()?;
    let won_leads = source.won_leads()?;
    debug!(total_leads, won_leads, "Fetched lead counts");

    let revenue = source.revenue()?;
    debug!(rows = revenue.len(), "Fetched revenue rows");

    let stage_table = source.pipeline_stage_counts()?;
    let monthly_revenue_table = source.monthly_revenue()?;
    debug!(
        stages = stage_table.len(),
        months = monthly_revenue_table.len(),
        "Fetched chart tables"
    );

    Ok(DashboardSnapshot::compute(SnapshotInputs {
        total_leads,
        won_leads,
        revenue,
        stage_table,
        monthly_revenue_table,
    }))
}

/// Fetch the raw detail rows and collapse them to one row per lead.
pub fn load_detail_report(
    source: &dyn CrmSource,
    reducers: &DetailReducers,
) -> Result<DetailReport> {
    let rows = source.detail_report()?;
    let report = DetailReport::from_rows_with(&rows, reducers);
    debug!(raw = rows.len(), leads = report.len(), "Aggregated detail report");
    Ok(report)
}

/// Run the complete sequence: snapshot first, then the detail report.
pub fn load_view(source: &dyn CrmSource, reducers: &DetailReducers) -> Result<DashboardView> {
    let snapshot = load_snapshot(source)?;
    let report = load_detail_report(source, reducers)?;
    Ok(DashboardView { snapshot, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregate::TextReducer;
    use crate::domain::{DetailReportRow, RevenueRecord};
    use crate::testkit::source::{FailingSource, StaticSource};
    use rust_decimal_macros::dec;

    fn detail(lead_id: i64, stage: Option<&str>, revenue: rust_decimal::Decimal) -> DetailReportRow {
        DetailReportRow {
            lead_id,
            lead_name: format!("Lead {lead_id}"),
            sales_person: None,
            stage: stage.map(str::to_string),
            revenue,
        }
    }

    #[test]
    fn snapshot_uses_deduplicated_revenue() {
        let source = StaticSource::new()
            .with_lead_counts(200, 40)
            .with_revenue(vec![
                RevenueRecord::new(1, dec!(100)),
                RevenueRecord::new(1, dec!(50)),
                RevenueRecord::new(2, dec!(200)),
            ]);

        let snapshot = load_snapshot(&source).unwrap();

        assert_eq!(snapshot.conversion_rate, dec!(20.00));
        assert_eq!(snapshot.total_revenue, dec!(350));
        assert_eq!(snapshot.avg_order_value, dec!(175));
    }

    #[test]
    fn view_collapses_detail_rows_per_lead() {
        let source = StaticSource::new().with_detail(vec![
            detail(5, Some("New"), dec!(100)),
            detail(5, Some("Won"), dec!(50)),
        ]);

        let view = load_view(&source, &DetailReducers::default()).unwrap();

        assert_eq!(view.report.len(), 1);
        let row = &view.report.rows()[0];
        assert_eq!(row.revenue, dec!(150));
        assert_eq!(row.stage.as_deref(), Some("New"));
    }

    #[test]
    fn reducers_are_honoured() {
        let source = StaticSource::new().with_detail(vec![
            detail(5, Some("New"), dec!(1)),
            detail(5, Some("Won"), dec!(1)),
        ]);
        let reducers = DetailReducers {
            stage: TextReducer::Last,
            ..DetailReducers::default()
        };

        let report = load_detail_report(&source, &reducers).unwrap();

        assert_eq!(report.rows()[0].stage.as_deref(), Some("Won"));
    }

    #[test]
    fn failure_in_any_query_fails_the_whole_view() {
        for query in ["total_leads", "revenue", "monthly_revenue", "detail_report"] {
            let source = FailingSource::new(StaticSource::new().with_lead_counts(10, 2), query);
            let result = load_view(&source, &DetailReducers::default());
            assert!(result.is_err(), "expected failure when {query} fails");
        }
    }
}
