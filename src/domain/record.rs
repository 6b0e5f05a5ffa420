//! Row types produced by the query catalog.
//!
//! Each type mirrors the column shape of one catalog query. Rows are plain
//! values: the pipeline never mutates them in place, it folds them into new
//! collections.

use serde::Serialize;

use super::money::Amount;

/// Identifier of a CRM lead.
pub type LeadId = i64;

/// One confirmed sales order, linked to a lead when `lead_id` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueRecord {
    pub lead_id: Option<LeadId>,
    pub amount_total: Amount,
}

impl RevenueRecord {
    #[must_use]
    pub fn new(lead_id: LeadId, amount_total: Amount) -> Self {
        Self {
            lead_id: Some(lead_id),
            amount_total,
        }
    }

    /// A confirmed order that no lead points at.
    #[must_use]
    pub fn unlinked(amount_total: Amount) -> Self {
        Self {
            lead_id: None,
            amount_total,
        }
    }
}

/// Number of leads sitting in one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStageCount {
    pub stage: String,
    pub cnt: i64,
}

/// Confirmed revenue summed over one calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub total: Amount,
}

/// One lead enriched with owner, stage, and revenue.
///
/// Before aggregation there is one row per (lead, sales order) pairing;
/// afterwards `lead_id` is unique. `revenue` is zero, never absent, when the
/// lead has no linked order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailReportRow {
    pub lead_id: LeadId,
    pub lead_name: String,
    pub sales_person: Option<String>,
    pub stage: Option<String>,
    pub revenue: Amount,
}
