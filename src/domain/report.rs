//! Canonical detail report and its display labels.
//!
//! Relabeling is a presentation concern kept apart from aggregation: labels
//! change how a column is titled, never the values underneath.

use serde::Serialize;

use super::aggregate::{aggregate_detail_report_with, DetailReducers};
use super::money::Amount;
use super::record::DetailReportRow;

/// Columns of the detail report, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportColumn {
    LeadId,
    LeadName,
    SalesPerson,
    Stage,
    Revenue,
}

impl ReportColumn {
    pub const ALL: [ReportColumn; 5] = [
        ReportColumn::LeadId,
        ReportColumn::LeadName,
        ReportColumn::SalesPerson,
        ReportColumn::Stage,
        ReportColumn::Revenue,
    ];

    /// Column name as returned by the detail query.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeadId => "lead_id",
            Self::LeadName => "lead_name",
            Self::SalesPerson => "sales_person",
            Self::Stage => "stage",
            Self::Revenue => "revenue",
        }
    }

    /// Normalized (uppercase) label shown to users.
    #[must_use]
    pub fn label(self) -> String {
        self.name().to_uppercase()
    }

    /// All labels in display order.
    #[must_use]
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|column| column.label()).collect()
    }
}

/// A single typed cell of the detail report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue<'a> {
    Integer(i64),
    Text(Option<&'a str>),
    Amount(Amount),
}

impl DetailReportRow {
    /// Value of `column` for this row.
    #[must_use]
    pub fn cell(&self, column: ReportColumn) -> CellValue<'_> {
        match column {
            ReportColumn::LeadId => CellValue::Integer(self.lead_id),
            ReportColumn::LeadName => CellValue::Text(Some(self.lead_name.as_str())),
            ReportColumn::SalesPerson => CellValue::Text(self.sales_person.as_deref()),
            ReportColumn::Stage => CellValue::Text(self.stage.as_deref()),
            ReportColumn::Revenue => CellValue::Amount(self.revenue),
        }
    }
}

/// The deduplicated detail report, one row per lead.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DetailReport {
    rows: Vec<DetailReportRow>,
}

impl DetailReport {
    /// Build the report from raw join rows using the default reducers.
    #[must_use]
    pub fn from_rows(rows: &[DetailReportRow]) -> Self {
        Self::from_rows_with(rows, &DetailReducers::default())
    }

    /// Build the report from raw join rows with explicit reducers.
    #[must_use]
    pub fn from_rows_with(rows: &[DetailReportRow], reducers: &DetailReducers) -> Self {
        Self {
            rows: aggregate_detail_report_with(rows, reducers),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[DetailReportRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
