//! CSV rendering of the detail report.

use crate::domain::{CellValue, DetailReport, ReportColumn};
use crate::error::{Error, Result};

pub const CSV_MIME: &str = "text/csv";

/// Header of uppercase labels, then one record per report row. Missing text
/// is written as an empty field.
pub fn build_csv(report: &DetailReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(ReportColumn::labels())?;

    for row in report.rows() {
        let record = ReportColumn::ALL.map(|column| match row.cell(column) {
            CellValue::Integer(value) => value.to_string(),
            CellValue::Text(text) => text.unwrap_or_default().to_string(),
            CellValue::Amount(amount) => amount.to_string(),
        });
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Export(format!("failed to flush CSV: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DetailReportRow;
    use rust_decimal_macros::dec;

    #[test]
    fn csv_has_header_and_rows() {
        let report = DetailReport::from_rows(&[DetailReportRow {
            lead_id: 7,
            lead_name: "Doe, Jane".into(),
            sales_person: None,
            stage: Some("New".into()),
            revenue: dec!(12.50),
        }]);

        let text = String::from_utf8(build_csv(&report).unwrap()).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "LEAD_ID,LEAD_NAME,SALES_PERSON,STAGE,REVENUE");
        assert_eq!(lines[1], "7,\"Doe, Jane\",,New,12.50");
    }

    #[test]
    fn empty_report_is_header_only() {
        let text = String::from_utf8(build_csv(&DetailReport::default()).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
