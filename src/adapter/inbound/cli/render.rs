//! Terminal rendering of one dashboard view.

use owo_colors::Style;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::json;
use tabled::builder::Builder;
use tabled::settings::Style as TableStyle;

use super::chart::{bar_chart, line_chart};
use super::output;
use crate::application::pipeline::DashboardView;
use crate::application::presentation::{
    format_amount, format_count, format_currency, kpi_tiles, KpiTile,
};
use crate::config::DashboardConfig;
use crate::domain::{CellValue, DetailReport, ReportColumn};

/// Print tiles, both charts, and the detail table; or one JSON document in
/// JSON mode.
pub fn render_view(view: &DashboardView, config: &DashboardConfig) {
    let tiles = kpi_tiles(&view.snapshot, &config.currency_symbol);

    if output::is_json() {
        output::json_output(json!({
            "command": "show",
            "tiles": tiles,
            "snapshot": view.snapshot,
            "report": view.report,
        }));
        return;
    }

    render_tiles(&tiles);

    output::section("Sales Pipeline");
    let stages: Vec<(String, Decimal)> = view
        .snapshot
        .stage_table
        .iter()
        .map(|row| (row.stage.clone(), Decimal::from(row.cnt)))
        .collect();
    if stages.is_empty() {
        output::note("No leads in any stage");
    } else {
        let lines = bar_chart(&stages, config.chart_width, |value| {
            value
                .to_i64()
                .map_or_else(|| value.to_string(), format_count)
        });
        output::lines(&lines.join("\n"));
    }

    output::section("Revenue Trend");
    let months: Vec<(String, Decimal)> = view
        .snapshot
        .monthly_revenue_table
        .iter()
        .map(|row| (row.month.clone(), row.total))
        .collect();
    if months.is_empty() {
        output::note("No confirmed revenue yet");
    } else {
        let symbol = config.currency_symbol.as_str();
        let lines = line_chart(&months, config.chart_width, |value| {
            format_currency(value, symbol)
        });
        output::lines(&lines.join("\n"));
    }

    output::section("Detailed CRM Report");
    if view.report.is_empty() {
        output::note("No leads found");
    } else {
        output::lines(&report_table(&view.report));
    }
}

/// Print the four KPI tiles as label/value fields.
pub fn render_tiles(tiles: &[KpiTile]) {
    output::section("Key Metrics");
    for tile in tiles {
        output::field(tile.label, output::paint(&tile.value, Style::new().bold()));
    }
}

/// The detail report as a rounded table with uppercase headers.
#[must_use]
pub fn report_table(report: &DetailReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(ReportColumn::labels());

    for row in report.rows() {
        builder.push_record(ReportColumn::ALL.map(|column| match row.cell(column) {
            CellValue::Integer(value) => value.to_string(),
            CellValue::Text(text) => text.unwrap_or_default().to_string(),
            CellValue::Amount(amount) => format_amount(amount),
        }));
    }

    let mut table = builder.build();
    table.with(TableStyle::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DetailReportRow;
    use rust_decimal_macros::dec;

    #[test]
    fn report_table_shows_labels_and_formatted_revenue() {
        let report = DetailReport::from_rows(&[DetailReportRow {
            lead_id: 3,
            lead_name: "Initech".into(),
            sales_person: None,
            stage: Some("Qualified".into()),
            revenue: dec!(1234.5),
        }]);

        let table = report_table(&report);

        for label in ReportColumn::labels() {
            assert!(table.contains(&label), "missing {label}");
        }
        assert!(table.contains("Initech"));
        assert!(table.contains("1,234.50"));
        assert!(table.starts_with('╭'));
    }
}
