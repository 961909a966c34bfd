//! Parsing of `--item` values.
//!
//! ```text
//! Vinyl=100x100*9            9 pieces of 100cm x 100cm
//! Canvas=59.4x84.1           one piece, quantity defaults to 1
//! PVC Sticker+contour-cut=10x10*50,trim
//! Vinyl=@A1*2                size taken from a preset
//! ```

use std::str::FromStr;
use std::sync::LazyLock;

use quote_core::{DimensionError, DimensionInput};
use quote_data::{PresetBook, PresetError};
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

static ITEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^\s*(?P<material>[^=]+?)\s*=\s*
        (?:
            @(?P<preset>[^*,]+?)
          | (?P<length>\d+(?:\.\d+)?)\s*[x×]\s*(?P<width>\d+(?:\.\d+)?)
        )
        \s*(?:\*\s*(?P<quantity>\d+))?
        \s*(?P<trim>,\s*trim)?
        \s*$",
    )
    .expect("invalid item pattern")
});

#[derive(Debug, Error, PartialEq)]
pub enum ItemArgError {
    #[error("expected <material>=<L>x<W>[*<qty>][,trim] or <material>=@<preset>[*<qty>][,trim], got '{0}'")]
    Malformed(String),

    #[error("invalid number '{input}': {source}")]
    InvalidNumber {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),

    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

/// Where an item's size comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeSpec {
    Explicit { length: Decimal, width: Decimal },
    Preset(String),
}

/// One `--item` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg {
    pub material: String,
    pub size: SizeSpec,
    pub quantity: u32,
    pub trim: bool,
}

impl ItemArg {
    /// Resolves the size against `presets` and validates it.
    pub fn dimension(
        &self,
        presets: &PresetBook,
    ) -> Result<DimensionInput, ItemArgError> {
        match &self.size {
            SizeSpec::Explicit { length, width } => {
                Ok(DimensionInput::new(*length, *width, self.quantity)?)
            }
            SizeSpec::Preset(name) => Ok(presets.lookup(name)?.to_dimension(self.quantity)?),
        }
    }
}

fn parse_decimal(input: &str) -> Result<Decimal, ItemArgError> {
    input.parse().map_err(|source| ItemArgError::InvalidNumber {
        input: input.to_string(),
        source,
    })
}

impl FromStr for ItemArg {
    type Err = ItemArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = ITEM_PATTERN
            .captures(s)
            .ok_or_else(|| ItemArgError::Malformed(s.to_string()))?;

        let size = match (caps.name("preset"), caps.name("length"), caps.name("width")) {
            (Some(preset), _, _) => SizeSpec::Preset(preset.as_str().to_string()),
            (None, Some(length), Some(width)) => SizeSpec::Explicit {
                length: parse_decimal(length.as_str())?,
                width: parse_decimal(width.as_str())?,
            },
            _ => return Err(ItemArgError::Malformed(s.to_string())),
        };

        let quantity = match caps.name("quantity") {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| ItemArgError::InvalidQuantity(m.as_str().to_string()))?,
            None => 1,
        };

        Ok(ItemArg {
            material: caps["material"].to_string(),
            size,
            quantity,
            trim: caps.name("trim").is_some(),
        })
    }
}
