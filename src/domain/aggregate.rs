//! Aggregation rules that turn raw query rows into canonical tables and KPIs.
//!
//! Both the revenue table and the detail report can carry several rows per
//! lead, one per linked sales order. They are grouped by `lead_id`, which is
//! always a grouping key and never a summed value. Output rows are ordered by
//! ascending `lead_id`; revenue rows without a lead follow, one per order.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::money::Amount;
use super::record::{DetailReportRow, LeadId, RevenueRecord};

/// Decimal places kept in the conversion rate.
pub const CONVERSION_RATE_SCALE: u32 = 2;

/// Collapse revenue rows so that each lead appears exactly once.
///
/// Amounts of rows sharing a `lead_id` are summed. Runs the same way whether a
/// lead has one order or many. Orders without a lead share no key, so each
/// stays a group of its own and still counts toward totals.
#[must_use]
pub fn aggregate_revenue(records: &[RevenueRecord]) -> Vec<RevenueRecord> {
    let mut by_lead: BTreeMap<LeadId, Amount> = BTreeMap::new();
    let mut unlinked = Vec::new();
    for record in records {
        match record.lead_id {
            Some(lead_id) => {
                *by_lead.entry(lead_id).or_insert(Decimal::ZERO) += record.amount_total;
            }
            None => unlinked.push(record.clone()),
        }
    }

    by_lead
        .into_iter()
        .map(|(lead_id, amount_total)| RevenueRecord::new(lead_id, amount_total))
        .chain(unlinked)
        .collect()
}

/// Sum of `amount_total`, zero for an empty table.
#[must_use]
pub fn total_revenue(records: &[RevenueRecord]) -> Amount {
    records.iter().map(|record| record.amount_total).sum()
}

/// Mean of `amount_total`, zero for an empty table.
#[must_use]
pub fn average_order_value(records: &[RevenueRecord]) -> Amount {
    if records.is_empty() {
        return Decimal::ZERO;
    }
    total_revenue(records) / Decimal::from(records.len())
}

/// Percentage of won leads, rounded to two decimals and kept within `[0, 100]`.
///
/// Zero when there are no leads. Counts come from separate queries, so a
/// won count above the total is clamped rather than reported above 100.
#[must_use]
pub fn conversion_rate(total_leads: i64, won_leads: i64) -> Decimal {
    if total_leads <= 0 {
        return Decimal::ZERO;
    }

    let won = Decimal::from(won_leads.max(0));
    let rate = won * Decimal::ONE_HUNDRED / Decimal::from(total_leads);
    rate.round_dp(CONVERSION_RATE_SCALE)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// How a text column of a duplicate group collapses into one value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextReducer {
    /// Keep the value of the first row seen, even when it is null.
    #[default]
    First,
    /// Keep the first non-null value seen.
    FirstNonNull,
    /// Keep the value of the last row seen.
    Last,
}

impl TextReducer {
    fn reduce<T: Clone>(self, kept: &mut T, incoming: &T, is_null: impl Fn(&T) -> bool) {
        match self {
            Self::First => {}
            Self::FirstNonNull => {
                if is_null(kept) && !is_null(incoming) {
                    *kept = incoming.clone();
                }
            }
            Self::Last => *kept = incoming.clone(),
        }
    }
}

/// How the amount column of a duplicate group collapses into one value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AmountReducer {
    #[default]
    Sum,
    Max,
}

impl AmountReducer {
    fn reduce(self, kept: &mut Amount, incoming: Amount) {
        match self {
            Self::Sum => *kept += incoming,
            Self::Max => *kept = (*kept).max(incoming),
        }
    }
}

/// Per-column reducer map used to collapse duplicate detail-report rows.
///
/// `lead_id` is absent on purpose: it is the grouping key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailReducers {
    pub lead_name: TextReducer,
    pub sales_person: TextReducer,
    pub stage: TextReducer,
    pub revenue: AmountReducer,
}

/// Collapse detail rows with the default reducers: first-seen name, owner
/// and stage, summed revenue.
#[must_use]
pub fn aggregate_detail_report(rows: &[DetailReportRow]) -> Vec<DetailReportRow> {
    aggregate_detail_report_with(rows, &DetailReducers::default())
}

/// Collapse detail rows so each `lead_id` appears once, applying `reducers`
/// column by column.
#[must_use]
pub fn aggregate_detail_report_with(
    rows: &[DetailReportRow],
    reducers: &DetailReducers,
) -> Vec<DetailReportRow> {
    let mut by_lead: BTreeMap<LeadId, DetailReportRow> = BTreeMap::new();

    for row in rows {
        match by_lead.entry(row.lead_id) {
            Entry::Vacant(slot) => {
                slot.insert(row.clone());
            }
            Entry::Occupied(mut slot) => {
                let kept = slot.get_mut();
                reducers
                    .lead_name
                    .reduce(&mut kept.lead_name, &row.lead_name, String::is_empty);
                reducers
                    .sales_person
                    .reduce(&mut kept.sales_person, &row.sales_person, Option::is_none);
                reducers
                    .stage
                    .reduce(&mut kept.stage, &row.stage, Option::is_none);
                reducers.revenue.reduce(&mut kept.revenue, row.revenue);
            }
        }
    }

    by_lead.into_values().collect()
}
