//! Read-side CRM data contract.

use crate::domain::{DetailReportRow, MonthlyRevenue, PipelineStageCount, RevenueRecord};
use crate::error::Result;

/// The fixed catalog of CRM queries the dashboard reads.
///
/// Every operation is a parameterless, side-effect-free read. A connectivity
/// or execution failure is returned as an error, never as a partial result.
pub trait CrmSource: Send + Sync {
    /// Count of all leads.
    fn total_leads(&self) -> Result<i64>;

    /// Count of leads whose pipeline stage is named `Won`.
    fn won_leads(&self) -> Result<i64>;

    /// One row per confirmed sales order linked to a lead.
    fn revenue(&self) -> Result<Vec<RevenueRecord>>;

    /// Lead count per stage, descending by count.
    fn pipeline_stage_counts(&self) -> Result<Vec<PipelineStageCount>>;

    /// Confirmed revenue per `YYYY-MM`, ascending by month.
    fn monthly_revenue(&self) -> Result<Vec<MonthlyRevenue>>;

    /// One row per (lead, sales order) pairing; leads without orders appear
    /// once with zero revenue.
    fn detail_report(&self) -> Result<Vec<DetailReportRow>>;
}
