//! Rounding helpers shared by the area and pricing calculations.
//!
//! Area and money are rounded differently: partial area units are always
//! billed as whole units (ceiling), while money is rounded to the nearest
//! whole amount with midpoints going away from zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a money amount to a whole number using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_to_whole;
///
/// assert_eq!(round_to_whole(dec!(129.4)), dec!(129));
/// assert_eq!(round_to_whole(dec!(129.5)), dec!(130));
/// assert_eq!(round_to_whole(dec!(129.6)), dec!(130));
/// ```
pub fn round_to_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a value to one decimal place using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_to_tenth;
///
/// assert_eq!(round_to_tenth(dec!(33.33)), dec!(33.3));
/// assert_eq!(round_to_tenth(dec!(16.65)), dec!(16.7));
/// ```
pub fn round_to_tenth(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a fractional unit count up to whole units.
///
/// Values at or below zero yield zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::ceil_units;
///
/// assert_eq!(ceil_units(dec!(1)), 1);
/// assert_eq!(ceil_units(dec!(1.0001)), 2);
/// assert_eq!(ceil_units(dec!(0.1)), 1);
/// ```
pub fn ceil_units(value: Decimal) -> u64 {
    if value <= Decimal::ZERO {
        return 0;
    }
    value.ceil().to_u64().unwrap_or(u64::MAX)
}
