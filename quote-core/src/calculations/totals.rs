use rust_decimal::Decimal;

use crate::models::{QuoteLine, QuoteTotals};

/// Sums line amounts and applies tax.
///
/// Tax is left unrounded: line totals are whole amounts, so tax carries at
/// most the precision of `tax_rate`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::compute_totals;
///
/// let totals = compute_totals(&[], dec!(0.05));
///
/// assert_eq!(totals.subtotal, dec!(0));
/// assert_eq!(totals.total, dec!(0));
/// ```
pub fn compute_totals(
    lines: &[QuoteLine],
    tax_rate: Decimal,
) -> QuoteTotals {
    let subtotal: Decimal = lines.iter().map(|line| line.total_amount).sum();
    let tax = subtotal * tax_rate;

    QuoteTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}
