//! KPI tiles and the number formatting shared by the terminal view and the
//! spreadsheet summary.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Amount, DashboardSnapshot};

pub const TOTAL_LEADS: &str = "Total Leads";
pub const CONVERSION_RATE: &str = "Conversion Rate";
pub const TOTAL_REVENUE: &str = "Total Revenue";
pub const AVG_ORDER_VALUE: &str = "Avg Order Value";

/// One labelled, pre-formatted KPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiTile {
    pub label: &'static str,
    pub value: String,
}

/// The four headline tiles, in display order.
#[must_use]
pub fn kpi_tiles(snapshot: &DashboardSnapshot, currency_symbol: &str) -> Vec<KpiTile> {
    vec![
        KpiTile {
            label: TOTAL_LEADS,
            value: format_count(snapshot.total_leads),
        },
        KpiTile {
            label: CONVERSION_RATE,
            value: format_percent(snapshot.conversion_rate),
        },
        KpiTile {
            label: TOTAL_REVENUE,
            value: format_currency(snapshot.total_revenue, currency_symbol),
        },
        KpiTile {
            label: AVG_ORDER_VALUE,
            value: format_currency(snapshot.avg_order_value, currency_symbol),
        },
    ]
}

/// Integer with thousands separators, e.g. `1,234`.
#[must_use]
pub fn format_count(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(&value.unsigned_abs().to_string()))
}

/// Percentage with two decimals, e.g. `20.00%`.
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

/// Amount with thousands separators and two decimals, e.g. `1,234.56`.
#[must_use]
pub fn format_amount(value: Amount) -> String {
    let rounded = value.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{}.{fraction}", group_thousands(whole))
}

/// Amount prefixed with a currency symbol, e.g. `₹ 1,234.56`.
#[must_use]
pub fn format_currency(value: Amount, symbol: &str) -> String {
    format!("{symbol} {}", format_amount(value))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RevenueRecord, SnapshotInputs};
    use rust_decimal_macros::dec;

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_234), "1,234");
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_count(-4_500), "-4,500");
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(format_percent(dec!(20)), "20.00%");
        assert_eq!(format_percent(dec!(33.333)), "33.33%");
        assert_eq!(format_percent(Decimal::ZERO), "0.00%");
    }

    #[test]
    fn amounts_are_grouped_and_rounded() {
        assert_eq!(format_amount(dec!(1234.5)), "1,234.50");
        assert_eq!(format_amount(dec!(1000000)), "1,000,000.00");
        assert_eq!(format_amount(dec!(0.005)), "0.00");
        assert_eq!(format_amount(dec!(-12.3)), "-12.30");
        assert_eq!(format_currency(dec!(1234.56), "₹"), "₹ 1,234.56");
    }

    #[test]
    fn tiles_follow_snapshot_values() {
        let snapshot = DashboardSnapshot::compute(SnapshotInputs {
            total_leads: 1_200,
            won_leads: 240,
            revenue: vec![
                RevenueRecord::new(1, dec!(100)),
                RevenueRecord::new(1, dec!(50)),
                RevenueRecord::new(2, dec!(200)),
            ],
            ..SnapshotInputs::default()
        });

        let tiles = kpi_tiles(&snapshot, "$");
        let pairs: Vec<(&str, &str)> = tiles
            .iter()
            .map(|tile| (tile.label, tile.value.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("Total Leads", "1,200"),
                ("Conversion Rate", "20.00%"),
                ("Total Revenue", "$ 350.00"),
                ("Avg Order Value", "$ 175.00"),
            ]
        );
    }
}
