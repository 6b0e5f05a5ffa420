//! Two-sheet XLSX workbook: KPI summary plus the detail report.

use std::io::Cursor;

use rust_decimal::prelude::ToPrimitive;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::application::presentation::KpiTile;
use crate::domain::{CellValue, DetailReport, ReportColumn};
use crate::error::{Error, Result};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SUMMARY_SHEET: &str = "Summary";
pub const REPORT_SHEET: &str = "CRM Report";

/// Build the workbook bytes.
///
/// `Summary` holds a `Metric`/`Value` header and one row per tile, values
/// copied verbatim from the tile strings. `CRM Report` holds the uppercase
/// column labels and one row per report row, without an index column.
pub fn build_workbook(tiles: &[KpiTile], report: &DetailReport) -> Result<Vec<u8>> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();

    write_summary(add_sheet(&mut book, SUMMARY_SHEET)?, tiles);
    write_report(add_sheet(&mut book, REPORT_SHEET)?, report);

    let mut out = Cursor::new(Vec::<u8>::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out)
        .map_err(|e| Error::Export(format!("failed to write workbook: {e}")))?;
    Ok(out.into_inner())
}

fn add_sheet<'a>(book: &'a mut Spreadsheet, name: &str) -> Result<&'a mut Worksheet> {
    book.new_sheet(name)
        .map_err(|e| Error::Export(format!("failed to add sheet '{name}': {e}")))
}

fn write_summary(sheet: &mut Worksheet, tiles: &[KpiTile]) {
    sheet.get_cell_mut((1, 1)).set_value_string("Metric");
    sheet.get_cell_mut((2, 1)).set_value_string("Value");

    for (row, tile) in (2u32..).zip(tiles) {
        sheet.get_cell_mut((1, row)).set_value_string(tile.label);
        sheet.get_cell_mut((2, row)).set_value_string(tile.value.as_str());
    }
}

fn write_report(sheet: &mut Worksheet, report: &DetailReport) {
    for (col, column) in (1u32..).zip(ReportColumn::ALL) {
        sheet.get_cell_mut((col, 1)).set_value_string(column.label());
    }

    for (row, record) in (2u32..).zip(report.rows()) {
        for (col, column) in (1u32..).zip(ReportColumn::ALL) {
            match record.cell(column) {
                CellValue::Integer(value) => {
                    // Lead ids stay well inside f64's exact integer range.
                    #[allow(clippy::cast_precision_loss)]
                    sheet.get_cell_mut((col, row)).set_value_number(value as f64);
                }
                CellValue::Text(Some(text)) => {
                    sheet.get_cell_mut((col, row)).set_value_string(text);
                }
                CellValue::Text(None) => {}
                CellValue::Amount(amount) => {
                    sheet
                        .get_cell_mut((col, row))
                        .set_value_number(amount.to_f64().unwrap_or_default());
                }
            }
        }
    }
}
