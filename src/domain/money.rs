//! Monetary types for revenue representation.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Currency amount represented as a Decimal for precision.
pub type Amount = Decimal;

/// Scale kept when converting floating-point amounts read from the database.
const AMOUNT_SCALE: u32 = 6;

/// Convert a floating-point amount read from SQL into an [`Amount`].
///
/// Non-finite values map to zero.
#[must_use]
pub fn amount_from_f64(value: f64) -> Amount {
    Decimal::from_f64(value)
        .map(|amount| amount.round_dp(AMOUNT_SCALE).normalize())
        .unwrap_or(Decimal::ZERO)
}
