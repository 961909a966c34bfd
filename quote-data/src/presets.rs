//! Named print sizes.
//!
//! A preset stands in for typing a length and width: the size picker offers
//! poster, banner and stand sizes, and the CLI accepts `@A1` in place of
//! `59.4x84.1`. The built-in book can be extended from configuration.

use std::fmt;

use quote_core::{DimensionError, DimensionInput};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetGroup {
    Poster,
    Banner,
    Stand,
}

impl PresetGroup {
    pub const ALL: [PresetGroup; 3] = [PresetGroup::Poster, PresetGroup::Banner, PresetGroup::Stand];

    pub fn label(&self) -> &'static str {
        match self {
            PresetGroup::Poster => "Posters",
            PresetGroup::Banner => "Banners",
            PresetGroup::Stand => "Stands",
        }
    }
}

impl fmt::Display for PresetGroup {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresetError {
    #[error("no size preset named '{0}'")]
    UnknownPreset(String),

    #[error("preset '{name}' has an invalid size: {source}")]
    InvalidSize {
        name: String,
        #[source]
        source: DimensionError,
    },
}

/// A named rectangle, in centimetres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePreset {
    pub group: PresetGroup,
    pub name: String,
    pub length: Decimal,
    pub width: Decimal,
}

impl SizePreset {
    fn builtin(
        group: PresetGroup,
        name: &str,
        length: Decimal,
        width: Decimal,
    ) -> Self {
        Self {
            group,
            name: name.to_string(),
            length,
            width,
        }
    }

    /// Applies a piece count to this size.
    ///
    /// # Errors
    ///
    /// Fails when the preset carries a non-positive side (possible for
    /// presets read from configuration) or `quantity` is zero.
    pub fn to_dimension(
        &self,
        quantity: u32,
    ) -> Result<DimensionInput, PresetError> {
        DimensionInput::new(self.length, self.width, quantity).map_err(|source| {
            PresetError::InvalidSize {
                name: self.name.clone(),
                source,
            }
        })
    }
}

/// Ordered collection of presets with case-insensitive lookup by name.
#[derive(Debug, Clone, Default)]
pub struct PresetBook {
    presets: Vec<SizePreset>,
}

impl PresetBook {
    pub fn new(presets: Vec<SizePreset>) -> Self {
        let mut book = Self::default();
        book.extend(presets);
        book
    }

    /// Common poster, banner and stand sizes.
    pub fn builtin() -> Self {
        use rust_decimal_macros::dec;
        use PresetGroup::{Banner, Poster, Stand};

        Self {
            presets: vec![
                SizePreset::builtin(Poster, "A0", dec!(84.1), dec!(118.9)),
                SizePreset::builtin(Poster, "A1", dec!(59.4), dec!(84.1)),
                SizePreset::builtin(Poster, "A2", dec!(42), dec!(59.4)),
                SizePreset::builtin(Poster, "A3", dec!(29.7), dec!(42)),
                SizePreset::builtin(Poster, "B1", dec!(72.8), dec!(103)),
                SizePreset::builtin(Poster, "B2", dec!(51.5), dec!(72.8)),
                SizePreset::builtin(Banner, "Banner 60x180", dec!(60), dec!(180)),
                SizePreset::builtin(Banner, "Banner 90x300", dec!(90), dec!(300)),
                SizePreset::builtin(Banner, "Banner 120x400", dec!(120), dec!(400)),
                SizePreset::builtin(Stand, "X-stand", dec!(60), dec!(160)),
                SizePreset::builtin(Stand, "Roll-up 85", dec!(85), dec!(200)),
                SizePreset::builtin(Stand, "Roll-up 100", dec!(100), dec!(200)),
            ],
        }
    }

    /// Adds presets, replacing any existing preset with the same name.
    pub fn extend(
        &mut self,
        presets: impl IntoIterator<Item = SizePreset>,
    ) {
        for preset in presets {
            match self.position(&preset.name) {
                Some(index) => {
                    debug!(name = %preset.name, "replacing size preset");
                    self.presets[index] = preset;
                }
                None => self.presets.push(preset),
            }
        }
    }

    /// Finds a preset by name, ignoring ASCII case and surrounding spaces.
    pub fn lookup(
        &self,
        name: &str,
    ) -> Result<&SizePreset, PresetError> {
        self.position(name)
            .map(|index| &self.presets[index])
            .ok_or_else(|| PresetError::UnknownPreset(name.trim().to_string()))
    }

    pub fn by_group(
        &self,
        group: PresetGroup,
    ) -> impl Iterator<Item = &SizePreset> {
        self.presets.iter().filter(move |preset| preset.group == group)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SizePreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    fn position(
        &self,
        name: &str,
    ) -> Option<usize> {
        let name = name.trim();
        self.presets
            .iter()
            .position(|preset| preset.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // Lookup
    // =========================================================================

    #[test]
    fn lookup_ignores_case() {
        let book = PresetBook::builtin();

        let preset = book.lookup(" a1 ").unwrap();

        assert_eq!(preset.name, "A1");
        assert_eq!(preset.length, dec!(59.4));
        assert_eq!(preset.width, dec!(84.1));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let book = PresetBook::builtin();

        assert_eq!(
            book.lookup("A9"),
            Err(PresetError::UnknownPreset("A9".to_string()))
        );
    }

    #[test]
    fn groups_keep_insertion_order() {
        let book = PresetBook::builtin();

        let stands: Vec<&str> = book
            .by_group(PresetGroup::Stand)
            .map(|preset| preset.name.as_str())
            .collect();

        assert_eq!(stands, vec!["X-stand", "Roll-up 85", "Roll-up 100"]);
    }

    // =========================================================================
    // Extension
    // =========================================================================

    #[test]
    fn extend_replaces_same_name() {
        let mut book = PresetBook::builtin();
        let before = book.len();

        book.extend([
            SizePreset {
                group: PresetGroup::Poster,
                name: "a1".to_string(),
                length: dec!(60),
                width: dec!(85),
            },
            SizePreset {
                group: PresetGroup::Banner,
                name: "Shop banner".to_string(),
                length: dec!(300),
                width: dec!(90),
            },
        ]);

        assert_eq!(book.len(), before + 1);
        assert_eq!(book.lookup("A1").unwrap().length, dec!(60));
        assert_eq!(book.lookup("shop BANNER").unwrap().group, PresetGroup::Banner);
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    #[test]
    fn to_dimension_applies_quantity() {
        let book = PresetBook::builtin();

        let dimension = book.lookup("Roll-up 85").unwrap().to_dimension(3).unwrap();

        assert_eq!(dimension.length(), dec!(85));
        assert_eq!(dimension.width(), dec!(200));
        assert_eq!(dimension.quantity(), 3);
    }

    #[test]
    fn invalid_configured_preset_is_rejected() {
        let preset = SizePreset {
            group: PresetGroup::Poster,
            name: "Broken".to_string(),
            length: dec!(0),
            width: dec!(10),
        };

        assert!(matches!(
            preset.to_dimension(1),
            Err(PresetError::InvalidSize { ref name, .. }) if name == "Broken"
        ));
    }
}
