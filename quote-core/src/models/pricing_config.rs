use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Square centimetres in one billing area unit (30cm × 30cm).
pub const AREA_UNIT_CM2: u32 = 900;

/// Cumulative area units at which a material switches to its discount price.
pub const DISCOUNT_THRESHOLD_UNITS: u64 = 100;

/// Errors returned by [`PricingConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingConfigError {
    #[error("area unit must be at least 1 cm², got {0} cm²")]
    InvalidAreaUnit(Decimal),

    #[error("discount threshold must be at least 1 area unit")]
    InvalidDiscountThreshold,

    #[error("trim surcharge must be non-negative, got {0}")]
    InvalidTrimSurcharge(Decimal),

    #[error("discounted trim surcharge must be non-negative, got {0}")]
    InvalidDiscountedTrimSurcharge(Decimal),

    #[error("minimum charge must be non-negative, got {0}")]
    InvalidMinimumCharge(Decimal),

    #[error("tax rate must be between 0 and 1, got {0}")]
    InvalidTaxRate(Decimal),
}

/// Shop-wide pricing constants.
///
/// The defaults are the rates the shop quotes with today; a config file may
/// override any of them.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::PricingConfig;
///
/// let config = PricingConfig::default();
///
/// assert_eq!(config.area_unit_cm2, dec!(900));
/// assert_eq!(config.discount_threshold_units, 100);
/// assert_eq!(config.tax_rate, dec!(0.05));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Size of one billing area unit in cm².
    pub area_unit_cm2: Decimal,

    /// Cumulative area units of a base material needed for the discount tier.
    pub discount_threshold_units: u64,

    /// Trim surcharge per area unit at the standard tier.
    pub trim_surcharge: Decimal,

    /// Trim surcharge per area unit at the discount tier.
    pub trim_surcharge_discounted: Decimal,

    /// Per-material billed total below which lines are flagged.
    pub minimum_charge: Decimal,

    /// Sales tax applied to the subtotal.
    pub tax_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            area_unit_cm2: Decimal::from(AREA_UNIT_CM2),
            discount_threshold_units: DISCOUNT_THRESHOLD_UNITS,
            trim_surcharge: Decimal::from(20),
            trim_surcharge_discounted: Decimal::from(18),
            minimum_charge: Decimal::from(200),
            tax_rate: Decimal::new(5, 2),
        }
    }
}

impl PricingConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`PricingConfigError`] if:
    /// - `area_unit_cm2` is below 1 cm²
    /// - `discount_threshold_units` is zero
    /// - either trim surcharge is negative
    /// - `minimum_charge` is negative
    /// - `tax_rate` is not in [0, 1]
    pub fn validate(&self) -> Result<(), PricingConfigError> {
        if self.area_unit_cm2 < Decimal::ONE {
            return Err(PricingConfigError::InvalidAreaUnit(self.area_unit_cm2));
        }
        if self.discount_threshold_units == 0 {
            return Err(PricingConfigError::InvalidDiscountThreshold);
        }
        if self.trim_surcharge < Decimal::ZERO {
            return Err(PricingConfigError::InvalidTrimSurcharge(
                self.trim_surcharge,
            ));
        }
        if self.trim_surcharge_discounted < Decimal::ZERO {
            return Err(PricingConfigError::InvalidDiscountedTrimSurcharge(
                self.trim_surcharge_discounted,
            ));
        }
        if self.minimum_charge < Decimal::ZERO {
            return Err(PricingConfigError::InvalidMinimumCharge(
                self.minimum_charge,
            ));
        }
        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE {
            return Err(PricingConfigError::InvalidTaxRate(self.tax_rate));
        }
        Ok(())
    }
}
