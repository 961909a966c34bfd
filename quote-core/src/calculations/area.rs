//! Billable area in 30cm × 30cm units.
//!
//! Two rounding policies exist:
//!
//! | Policy     | Formula                              | Used for |
//! |------------|--------------------------------------|----------|
//! | per piece  | `ceil(L × W / unit) × Q`             | plain cutting, each piece wastes its own offcut |
//! | batch      | `ceil(L × W × Q / unit)`             | die-cut, contour, composite panel, or trim; pieces are nested on one sheet |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::calculations::{AreaCalculator, AreaRounding};
//!
//! let calculator = AreaCalculator::default();
//!
//! // 50 small pieces: every piece rounds up to one unit on its own...
//! assert_eq!(calculator.area_units(dec!(10), dec!(10), 50, AreaRounding::PerPiece), 50);
//! // ...but nested on one sheet they only take six.
//! assert_eq!(calculator.area_units(dec!(10), dec!(10), 50, AreaRounding::Batch), 6);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::ceil_units;
use crate::models::{AREA_UNIT_CM2, CuttingMode};

/// Where area is rounded up to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaRounding {
    /// Round each piece, then multiply by the quantity.
    PerPiece,
    /// Multiply out the whole batch, then round once.
    Batch,
}

impl AreaRounding {
    /// Batch rounding applies to any special cutting mode or when trim is
    /// requested.
    pub fn for_line(
        cutting_mode: CuttingMode,
        trim: bool,
    ) -> Self {
        if cutting_mode.is_special() || trim {
            Self::Batch
        } else {
            Self::PerPiece
        }
    }
}

/// Converts rectangles into billable area units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaCalculator {
    unit_cm2: Decimal,
}

impl Default for AreaCalculator {
    fn default() -> Self {
        Self::new(Decimal::from(AREA_UNIT_CM2))
    }
}

impl AreaCalculator {
    /// `unit_cm2` must be positive; [`crate::PricingConfig::validate`]
    /// guarantees this for configured values.
    pub fn new(unit_cm2: Decimal) -> Self {
        Self { unit_cm2 }
    }

    /// Area units billed for `quantity` pieces of `length × width` cm.
    ///
    /// Inputs are expected within the [`crate::DimensionInput`] limits, which
    /// keep every intermediate product in `Decimal` range.
    pub fn area_units(
        &self,
        length: Decimal,
        width: Decimal,
        quantity: u32,
        rounding: AreaRounding,
    ) -> u64 {
        let piece_area = length * width;

        match rounding {
            AreaRounding::PerPiece => {
                ceil_units(piece_area / self.unit_cm2).saturating_mul(u64::from(quantity))
            }
            AreaRounding::Batch => {
                ceil_units(piece_area * Decimal::from(quantity) / self.unit_cm2)
            }
        }
    }
}
