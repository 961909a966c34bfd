use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog entry. Both prices are per area unit (30cm × 30cm).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Catalog name, possibly carrying a cutting-mode suffix.
    pub name: String,

    /// Standard unit price.
    pub price: Decimal,

    /// Unit price once the material reaches the volume-discount tier.
    /// Expected to be at or below `price`.
    pub discount_price: Decimal,
}

impl Material {
    /// Parses the catalog name into its base material and cutting mode.
    pub fn key(&self) -> MaterialKey {
        MaterialKey::parse(&self.name)
    }
}

/// Cutting workflow encoded in a catalog name.
///
/// Any mode other than [`CuttingMode::None`] nests pieces on a shared sheet,
/// so area is rounded once per batch instead of once per piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CuttingMode {
    #[default]
    None,
    SmallDieCut,
    ContourCut,
    CompositePanelCut,
}

impl CuttingMode {
    /// Every mode that is recognised from a name suffix.
    pub const SPECIAL: [CuttingMode; 3] = [
        CuttingMode::SmallDieCut,
        CuttingMode::ContourCut,
        CuttingMode::CompositePanelCut,
    ];

    /// The catalog-name suffix tag for this mode.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::SmallDieCut => Some("+small-die-cut"),
            Self::ContourCut => Some("+contour-cut"),
            Self::CompositePanelCut => Some("+composite-panel-cut"),
        }
    }

    pub fn is_special(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Small die-cut work already includes trimming, so it never pays the
    /// trim surcharge.
    pub fn exempts_trim_surcharge(&self) -> bool {
        matches!(self, Self::SmallDieCut)
    }
}

/// A catalog name split into the base material used for area accounting and
/// the cutting mode used for rounding and surcharge rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialKey {
    pub base: String,
    pub cutting_mode: CuttingMode,
}

impl MaterialKey {
    /// Splits a catalog name on its cutting-mode suffix, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use quote_core::{CuttingMode, MaterialKey};
    ///
    /// let key = MaterialKey::parse("PVC Sticker+contour-cut");
    /// assert_eq!(key.base, "PVC Sticker");
    /// assert_eq!(key.cutting_mode, CuttingMode::ContourCut);
    ///
    /// let plain = MaterialKey::parse("Vinyl");
    /// assert_eq!(plain.base, "Vinyl");
    /// assert_eq!(plain.cutting_mode, CuttingMode::None);
    /// ```
    pub fn parse(name: &str) -> Self {
        let name = name.trim();

        for mode in CuttingMode::SPECIAL {
            let Some(suffix) = mode.suffix() else {
                continue;
            };
            if let Some(base) = name.strip_suffix(suffix) {
                return Self {
                    base: base.trim_end().to_string(),
                    cutting_mode: mode,
                };
            }
        }

        Self {
            base: name.to_string(),
            cutting_mode: CuttingMode::None,
        }
    }
}

impl fmt::Display for MaterialKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if let Some(suffix) = self.cutting_mode.suffix() {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}
