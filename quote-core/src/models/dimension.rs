use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Longest accepted side, in centimetres.
pub const MAX_SIDE_CM: u32 = 10_000;

/// Most pieces accepted on one line.
pub const MAX_QUANTITY: u32 = 1_000_000;

/// Reasons a requested size is rejected before it reaches the pricing engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DimensionError {
    #[error("length must be positive, got {0}")]
    NonPositiveLength(Decimal),

    #[error("width must be positive, got {0}")]
    NonPositiveWidth(Decimal),

    #[error("quantity must be at least 1")]
    ZeroQuantity,

    #[error("sides are limited to {MAX_SIDE_CM} cm, got {0}")]
    SideTooLarge(Decimal),

    #[error("quantity is limited to {MAX_QUANTITY}, got {0}")]
    QuantityTooLarge(u32),
}

/// One requested rectangle size and piece count. Lengths are in centimetres.
///
/// Only constructible through [`DimensionInput::new`], so every value the
/// engine sees is already validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionInput {
    length: Decimal,
    width: Decimal,
    quantity: u32,
}

impl DimensionInput {
    /// # Errors
    ///
    /// Returns [`DimensionError`] if either side is zero, negative or longer
    /// than [`MAX_SIDE_CM`], or if `quantity` is zero or above
    /// [`MAX_QUANTITY`].
    pub fn new(
        length: Decimal,
        width: Decimal,
        quantity: u32,
    ) -> Result<Self, DimensionError> {
        if length <= Decimal::ZERO {
            return Err(DimensionError::NonPositiveLength(length));
        }
        if width <= Decimal::ZERO {
            return Err(DimensionError::NonPositiveWidth(width));
        }
        if quantity == 0 {
            return Err(DimensionError::ZeroQuantity);
        }
        let max_side = Decimal::from(MAX_SIDE_CM);
        if let Some(side) = [length, width].into_iter().find(|side| *side > max_side) {
            return Err(DimensionError::SideTooLarge(side));
        }
        if quantity > MAX_QUANTITY {
            return Err(DimensionError::QuantityTooLarge(quantity));
        }
        Ok(Self {
            length,
            width,
            quantity,
        })
    }

    pub fn length(&self) -> Decimal {
        self.length
    }

    pub fn width(&self) -> Decimal {
        self.width
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Size as shown on a quote, e.g. `100x59.4cm`.
    pub fn size_label(&self) -> String {
        format!("{}x{}cm", self.length.normalize(), self.width.normalize())
    }
}
