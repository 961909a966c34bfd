mod dimension;
mod material;
mod pricing_config;
mod quote_line;
mod quote_totals;

pub use dimension::{DimensionError, DimensionInput, MAX_QUANTITY, MAX_SIDE_CM};
pub use material::{CuttingMode, Material, MaterialKey};
pub use pricing_config::{
    AREA_UNIT_CM2, DISCOUNT_THRESHOLD_UNITS, PricingConfig, PricingConfigError,
};
pub use quote_line::{LineId, QuoteLine};
pub use quote_totals::QuoteTotals;
