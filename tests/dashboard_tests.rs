//! End-to-end pipeline tests: query source to snapshot and report.

use std::sync::Arc;
use std::time::Duration;

use crm_dashboard::adapter::outbound::sql::DieselCrmSource;
use crm_dashboard::application::dashboard::Dashboard;
use crm_dashboard::domain::{DetailReportRow, RevenueRecord};
use crm_dashboard::testkit::database::CrmFixture;
use crm_dashboard::testkit::source::{FailingSource, StaticSource};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn row(lead_id: i64, name: &str, stage: Option<&str>, revenue: Decimal) -> DetailReportRow {
    DetailReportRow {
        lead_id,
        lead_name: name.to_string(),
        sales_person: Some("alice".to_string()),
        stage: stage.map(str::to_string),
        revenue,
    }
}

#[test]
fn duplicate_revenue_rows_are_summed_per_lead() {
    let source = StaticSource::new().with_lead_counts(10, 1).with_revenue(vec![
        RevenueRecord::new(1, dec!(100)),
        RevenueRecord::new(1, dec!(50)),
        RevenueRecord::new(2, dec!(200)),
    ]);
    let dashboard = Dashboard::new(Arc::new(source), None);

    let view = dashboard.load().expect("view");

    assert_eq!(view.snapshot.total_revenue, dec!(350));
    assert_eq!(view.snapshot.avg_order_value, dec!(175));
}

#[test]
fn conversion_rate_is_percentage_of_won_leads() {
    let dashboard = Dashboard::new(Arc::new(StaticSource::new().with_lead_counts(200, 40)), None);

    let view = dashboard.load().expect("view");

    assert_eq!(view.snapshot.conversion_rate, dec!(20.00));
}

#[test]
fn zero_leads_means_zero_rate_and_empty_revenue_means_zero_totals() {
    let dashboard = Dashboard::new(Arc::new(StaticSource::new()), None);

    let view = dashboard.load().expect("view");

    assert_eq!(view.snapshot.conversion_rate, Decimal::ZERO);
    assert_eq!(view.snapshot.total_revenue, Decimal::ZERO);
    assert_eq!(view.snapshot.avg_order_value, Decimal::ZERO);
    assert!(view.report.is_empty());
}

#[test]
fn detail_rows_collapse_to_first_seen_with_summed_revenue() {
    let source = StaticSource::new().with_detail(vec![
        row(5, "Acme", Some("New"), dec!(100)),
        row(5, "Acme renamed", Some("Won"), dec!(50)),
        row(6, "Globex", None, dec!(0)),
    ]);
    let dashboard = Dashboard::new(Arc::new(source), None);

    let view = dashboard.load().expect("view");
    let rows = view.report.rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].lead_name, "Acme");
    assert_eq!(rows[0].stage.as_deref(), Some("New"));
    assert_eq!(rows[0].revenue, dec!(150));
    assert_eq!(rows[1].revenue, dec!(0));
}

#[test]
fn connectivity_failure_produces_no_snapshot_and_is_retried() {
    let source = Arc::new(FailingSource::new(
        StaticSource::new().with_lead_counts(5, 1),
        "revenue",
    ));
    let dashboard = Dashboard::new(source.clone(), None);

    assert!(dashboard.load().is_none());
    assert!(dashboard.cached().is_none());
    assert!(dashboard.load().is_none());

    // Both attempts ran the sequence from the start.
    assert_eq!(source.cycles(), 2);
}

#[test]
fn sqlite_database_feeds_the_whole_pipeline() {
    let mut fixture = CrmFixture::in_memory();
    fixture.seed_sample();
    let source = DieselCrmSource::from_url(fixture.url(), 2, Duration::from_secs(2)).unwrap();
    let dashboard = Dashboard::new(Arc::new(source), None);

    let view = dashboard.try_load().unwrap();
    let snapshot = &view.snapshot;

    assert_eq!(snapshot.total_leads, 5);
    assert_eq!(snapshot.won_leads, 2);
    assert_eq!(snapshot.conversion_rate, dec!(40.00));
    // Three groups: leads 1 and 2, plus the order with no lead.
    assert_eq!(snapshot.total_revenue, dec!(380));
    assert_eq!(snapshot.avg_order_value.round_dp(2), dec!(126.67));
    assert_eq!(snapshot.stage_table.len(), 3);
    assert_eq!(snapshot.monthly_revenue_table.len(), 3);

    let report = view.report.rows();
    assert_eq!(report.len(), 5);
    let ids: Vec<i64> = report.iter().map(|row| row.lead_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(report[0].revenue, dec!(150));
    assert_eq!(report[0].sales_person.as_deref(), Some("alice"));
    assert_eq!(report[3].revenue, dec!(0));
}

#[test]
fn total_revenue_matches_the_monthly_chart() {
    let mut fixture = CrmFixture::in_memory();
    fixture.seed_sample();
    let source = DieselCrmSource::from_url(fixture.url(), 2, Duration::from_secs(2)).unwrap();
    let dashboard = Dashboard::new(Arc::new(source), None);

    let view = dashboard.try_load().unwrap();
    let charted: Decimal = view
        .snapshot
        .monthly_revenue_table
        .iter()
        .map(|month| month.total)
        .sum();

    assert_eq!(view.snapshot.total_revenue, charted);
}

#[test]
fn refresh_picks_up_new_rows() {
    let mut fixture = CrmFixture::in_memory();
    fixture.seed_sample();
    let source = DieselCrmSource::from_url(fixture.url(), 2, Duration::from_secs(2)).unwrap();
    let dashboard = Dashboard::new(Arc::new(source), None);

    assert_eq!(dashboard.try_load().unwrap().snapshot.total_leads, 5);

    fixture.lead(6, Some("Hooli"), None, Some(1));
    assert_eq!(dashboard.try_load().unwrap().snapshot.total_leads, 5);

    dashboard.refresh();
    assert_eq!(dashboard.try_load().unwrap().snapshot.total_leads, 6);
}
