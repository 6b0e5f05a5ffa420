//! Text charts for the terminal view.
//!
//! Both charts are pure: they return lines for the caller to print.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const BAR: char = '█';
const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Horizontal bars, one per item, scaled so the largest fills `width`.
///
/// Non-zero values always get at least one cell.
#[must_use]
pub fn bar_chart(
    items: &[(String, Decimal)],
    width: usize,
    format: impl Fn(Decimal) -> String,
) -> Vec<String> {
    let label_width = label_width(items);
    let max = max_value(items);

    items
        .iter()
        .map(|(label, value)| {
            let cells = scaled(*value, max, width);
            format!(
                "{label:<label_width$} │{} {}",
                BAR.to_string().repeat(cells),
                format(*value)
            )
        })
        .collect()
}

/// A sparkline followed by one `─●` row per point, in the given order.
#[must_use]
pub fn line_chart(
    points: &[(String, Decimal)],
    width: usize,
    format: impl Fn(Decimal) -> String,
) -> Vec<String> {
    if points.is_empty() {
        return Vec::new();
    }

    let label_width = label_width(points);
    let max = max_value(points);

    let mut lines = Vec::with_capacity(points.len() + 1);
    let spark = sparkline(points.iter().map(|(_, value)| *value), max);
    lines.push(format!("{:label_width$} {spark}", ""));

    for (label, value) in points {
        let cells = scaled(*value, max, width);
        let track = if cells == 0 {
            "●".to_string()
        } else {
            format!("{}●", "─".repeat(cells.saturating_sub(1)))
        };
        lines.push(format!("{label:<label_width$} {track} {}", format(*value)));
    }
    lines
}

fn label_width(items: &[(String, Decimal)]) -> usize {
    items
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
}

fn max_value(items: &[(String, Decimal)]) -> Decimal {
    items
        .iter()
        .map(|(_, value)| *value)
        .max()
        .unwrap_or_default()
}

fn sparkline(values: impl Iterator<Item = Decimal>, max: Decimal) -> String {
    values
        .map(|value| {
            let top = SPARKS.len() - 1;
            SPARKS[scaled(value, max, top).min(top)]
        })
        .collect()
}

fn scaled(value: Decimal, max: Decimal, width: usize) -> usize {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return 0;
    }
    let ratio = value / max * Decimal::from(width);
    ratio.round().to_usize().unwrap_or(width).clamp(1, width.max(1))
}
