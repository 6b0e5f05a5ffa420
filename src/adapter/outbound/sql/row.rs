//! Row shapes returned by the catalog queries.

use diesel::sql_types::{BigInt, Double, Nullable, Text};
use diesel::QueryableByName;

use crate::domain::money::amount_from_f64;
use crate::domain::{DetailReportRow, MonthlyRevenue, PipelineStageCount, RevenueRecord};

/// Single-column count result.
#[derive(Debug, QueryableByName)]
pub struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub value: i64,
}

#[derive(Debug, QueryableByName)]
pub struct RevenueRow {
    #[diesel(sql_type = Nullable<BigInt>)]
    pub lead_id: Option<i64>,
    #[diesel(sql_type = Double)]
    pub amount_total: f64,
}

#[derive(Debug, QueryableByName)]
pub struct StageCountRow {
    #[diesel(sql_type = Text)]
    pub stage: String,
    #[diesel(sql_type = BigInt)]
    pub cnt: i64,
}

#[derive(Debug, QueryableByName)]
pub struct MonthlyRevenueRow {
    #[diesel(sql_type = Text)]
    pub month: String,
    #[diesel(sql_type = Double)]
    pub total: f64,
}

#[derive(Debug, QueryableByName)]
pub struct DetailRow {
    #[diesel(sql_type = BigInt)]
    pub lead_id: i64,
    #[diesel(sql_type = Text)]
    pub lead_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub sales_person: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub stage: Option<String>,
    #[diesel(sql_type = Double)]
    pub revenue: f64,
}

impl From<RevenueRow> for RevenueRecord {
    fn from(row: RevenueRow) -> Self {
        RevenueRecord {
            lead_id: row.lead_id,
            amount_total: amount_from_f64(row.amount_total),
        }
    }
}

impl From<StageCountRow> for PipelineStageCount {
    fn from(row: StageCountRow) -> Self {
        PipelineStageCount {
            stage: row.stage,
            cnt: row.cnt,
        }
    }
}

impl From<MonthlyRevenueRow> for MonthlyRevenue {
    fn from(row: MonthlyRevenueRow) -> Self {
        MonthlyRevenue {
            month: row.month,
            total: amount_from_f64(row.total),
        }
    }
}

impl From<DetailRow> for DetailReportRow {
    fn from(row: DetailRow) -> Self {
        DetailReportRow {
            lead_id: row.lead_id,
            lead_name: row.lead_name,
            sales_person: row.sales_person,
            stage: row.stage,
            revenue: amount_from_f64(row.revenue),
        }
    }
}
