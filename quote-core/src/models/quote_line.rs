use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DimensionInput, MaterialKey};

/// Session-unique identifier of a quote line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(pub u64);

impl fmt::Display for LineId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A priced line on the quote.
///
/// `area_units` is fixed when the line is created. The pricing fields
/// (`discounted`, `total_amount`, `unit_price`, `below_minimum`) are
/// overwritten whenever the session recomputes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteLine {
    pub id: LineId,

    /// Catalog name the line was priced from.
    pub material_name: String,

    pub material: MaterialKey,
    pub dimension: DimensionInput,

    /// Area units this line contributes to its base material's ledger entry.
    pub area_units: u64,

    pub trim: bool,

    // Derived on every recompute
    pub discounted: bool,
    pub total_amount: Decimal,
    pub unit_price: Decimal,
    pub below_minimum: bool,
}

impl QuoteLine {
    /// Name shown on the quote: the catalog name plus a ` +trim` marker.
    pub fn display_name(&self) -> String {
        if self.trim {
            format!("{} +trim", self.material)
        } else {
            self.material.to_string()
        }
    }

    pub fn base_material(&self) -> &str {
        &self.material.base
    }

    pub fn quantity(&self) -> u32 {
        self.dimension.quantity()
    }
}
