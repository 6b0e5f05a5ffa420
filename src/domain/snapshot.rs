//! The computed dashboard state for one render cycle.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregate::{aggregate_revenue, average_order_value, conversion_rate, total_revenue};
use super::money::Amount;
use super::record::{MonthlyRevenue, PipelineStageCount, RevenueRecord};

/// KPIs and chart-ready tables for one render cycle.
///
/// Built once per cache interval and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub total_leads: i64,
    pub won_leads: i64,
    /// Percentage in `[0, 100]`, two decimal places.
    pub conversion_rate: Decimal,
    pub total_revenue: Amount,
    pub avg_order_value: Amount,
    /// Leads per stage, descending by count.
    pub stage_table: Vec<PipelineStageCount>,
    /// Revenue per month, chronological.
    pub monthly_revenue_table: Vec<MonthlyRevenue>,
    pub generated_at: DateTime<Utc>,
}

/// Raw query outputs feeding [`DashboardSnapshot::compute`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotInputs {
    pub total_leads: i64,
    pub won_leads: i64,
    pub revenue: Vec<RevenueRecord>,
    pub stage_table: Vec<PipelineStageCount>,
    pub monthly_revenue_table: Vec<MonthlyRevenue>,
}

impl DashboardSnapshot {
    /// Compute KPIs from raw query outputs.
    ///
    /// Revenue rows are deduplicated per lead before totals and the mean are
    /// taken. Stage and monthly tables are already grouped by their queries
    /// and pass through unchanged.
    #[must_use]
    pub fn compute(inputs: SnapshotInputs) -> Self {
        let revenue = aggregate_revenue(&inputs.revenue);

        Self {
            total_leads: inputs.total_leads,
            won_leads: inputs.won_leads,
            conversion_rate: conversion_rate(inputs.total_leads, inputs.won_leads),
            total_revenue: total_revenue(&revenue),
            avg_order_value: average_order_value(&revenue),
            stage_table: inputs.stage_table,
            monthly_revenue_table: inputs.monthly_revenue_table,
            generated_at: Utc::now(),
        }
    }
}
