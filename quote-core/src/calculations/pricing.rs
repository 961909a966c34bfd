//! Line pricing against the material area ledger.
//!
//! # Pricing Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Split the catalog name into base material and cutting mode |
//! | 2    | Batch rounding if the mode is special or trim is requested |
//! | 3    | Area units from the rectangle and quantity |
//! | 4    | Discount tier from the ledger (already including this line) |
//! | 5    | Unit rate: discount price or standard price |
//! | 6    | Trim surcharge per unit (18 discounted / 20 standard), waived for small die-cut |
//! | 7    | Total: `(unit rate + surcharge) × area`, rounded to a whole amount |
//! | 8    | Unit price: total ÷ quantity, rounded to one decimal |
//!
//! Steps 4 to 8 are re-run for every line on each recompute; steps 1 to 3
//! only when a line is created.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::calculations::{MaterialAreaLedger, PricingEngine};
//! use quote_core::{DimensionInput, Material, PricingConfig};
//!
//! let config = PricingConfig::default();
//! let engine = PricingEngine::new(&config);
//! let vinyl = Material {
//!     name: "Vinyl".to_string(),
//!     price: dec!(10),
//!     discount_price: dec!(8),
//! };
//! let dimension = DimensionInput::new(dec!(100), dec!(100), 9).unwrap();
//!
//! let mut ledger = MaterialAreaLedger::default();
//! let area = engine.area_units(&dimension, &vinyl.key(), false);
//! ledger.add_area("Vinyl", area);
//!
//! let price = engine.price(&dimension, &vinyl, false, &ledger);
//!
//! assert_eq!(price.area_units, 108);
//! assert!(price.discounted);
//! assert_eq!(price.total_amount, dec!(864));
//! assert_eq!(price.unit_price, dec!(96));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::area::{AreaCalculator, AreaRounding};
use crate::calculations::common::{round_to_tenth, round_to_whole};
use crate::calculations::ledger::MaterialAreaLedger;
use crate::models::{DimensionInput, Material, MaterialKey, PricingConfig};

/// Outcome of pricing one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePrice {
    /// Area units billed for the line.
    pub area_units: u64,

    /// Whether the material was at the discount tier when priced.
    pub discounted: bool,

    /// Material price per area unit for the tier.
    pub unit_rate: Decimal,

    /// Trim surcharge per area unit (zero when not applicable).
    pub surcharge_rate: Decimal,

    /// Billed amount, rounded to a whole number.
    pub total_amount: Decimal,

    /// Per-piece display price, rounded to one decimal. Never fed back into
    /// billing.
    pub unit_price: Decimal,
}

/// Prices lines from the shop's [`PricingConfig`].
#[derive(Debug, Clone)]
pub struct PricingEngine<'a> {
    config: &'a PricingConfig,
    area: AreaCalculator,
}

impl<'a> PricingEngine<'a> {
    pub fn new(config: &'a PricingConfig) -> Self {
        Self {
            config,
            area: AreaCalculator::new(config.area_unit_cm2),
        }
    }

    /// Area units a new line of `material` would contribute to the ledger.
    pub fn area_units(
        &self,
        dimension: &DimensionInput,
        material: &MaterialKey,
        trim: bool,
    ) -> u64 {
        let rounding = AreaRounding::for_line(material.cutting_mode, trim);
        self.area.area_units(
            dimension.length(),
            dimension.width(),
            dimension.quantity(),
            rounding,
        )
    }

    /// Prices a line from its raw dimensions.
    ///
    /// The caller must already have added this line's area to `ledger`, so
    /// that the line counts toward its own material's discount threshold.
    pub fn price(
        &self,
        dimension: &DimensionInput,
        material: &Material,
        trim: bool,
        ledger: &MaterialAreaLedger,
    ) -> LinePrice {
        let key = material.key();
        let area_units = self.area_units(dimension, &key, trim);
        self.price_area(&key, material, dimension.quantity(), area_units, trim, ledger)
    }

    /// Re-prices a listed line from its recorded area against the current
    /// ledger. Area is not recomputed.
    pub fn reprice(
        &self,
        material: &Material,
        quantity: u32,
        area_units: u64,
        trim: bool,
        ledger: &MaterialAreaLedger,
    ) -> LinePrice {
        let key = material.key();
        self.price_area(&key, material, quantity, area_units, trim, ledger)
    }

    fn price_area(
        &self,
        key: &MaterialKey,
        material: &Material,
        quantity: u32,
        area_units: u64,
        trim: bool,
        ledger: &MaterialAreaLedger,
    ) -> LinePrice {
        let discounted = ledger.is_discounted(&key.base);
        let unit_rate = self.unit_rate(material, discounted);
        let surcharge_rate = self.surcharge_rate(key, trim, discounted);
        let total_amount = self.total_amount(unit_rate, surcharge_rate, area_units);
        let unit_price = self.unit_price(total_amount, quantity);

        LinePrice {
            area_units,
            discounted,
            unit_rate,
            surcharge_rate,
            total_amount,
            unit_price,
        }
    }

    fn unit_rate(
        &self,
        material: &Material,
        discounted: bool,
    ) -> Decimal {
        if discounted {
            material.discount_price
        } else {
            material.price
        }
    }

    fn surcharge_rate(
        &self,
        key: &MaterialKey,
        trim: bool,
        discounted: bool,
    ) -> Decimal {
        if !trim || key.cutting_mode.exempts_trim_surcharge() {
            return Decimal::ZERO;
        }
        if discounted {
            self.config.trim_surcharge_discounted
        } else {
            self.config.trim_surcharge
        }
    }

    fn total_amount(
        &self,
        unit_rate: Decimal,
        surcharge_rate: Decimal,
        area_units: u64,
    ) -> Decimal {
        round_to_whole((unit_rate + surcharge_rate) * Decimal::from(area_units))
    }

    fn unit_price(
        &self,
        total_amount: Decimal,
        quantity: u32,
    ) -> Decimal {
        if quantity == 0 {
            return Decimal::ZERO;
        }
        round_to_tenth(total_amount / Decimal::from(quantity))
    }
}
