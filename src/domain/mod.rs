//! Backend-agnostic domain logic: row types, aggregation rules, and the
//! dashboard snapshot.

pub mod aggregate;
pub mod money;
pub mod record;
pub mod report;
pub mod snapshot;

pub use money::Amount;
pub use record::{DetailReportRow, LeadId, MonthlyRevenue, PipelineStageCount, RevenueRecord};
pub use report::{CellValue, DetailReport, ReportColumn};
pub use snapshot::{DashboardSnapshot, SnapshotInputs};
