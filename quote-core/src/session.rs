//! The quote line collection and its recompute orchestration.
//!
//! A [`QuoteSession`] owns the catalog, the pricing configuration, the
//! [`MaterialAreaLedger`], and the ordered list of [`QuoteLine`]s. Every add
//! or remove first updates the ledger, then re-prices every line, because a
//! change to one material's cumulative area can move all of that material's
//! lines between discount tiers.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::{Catalog, DimensionInput, Material, PricingConfig, QuoteSession};
//!
//! let catalog = Catalog::new(vec![Material {
//!     name: "Vinyl".to_string(),
//!     price: dec!(10),
//!     discount_price: dec!(8),
//! }]);
//! let mut session = QuoteSession::new(catalog, PricingConfig::default()).unwrap();
//!
//! let small = session
//!     .add_line("Vinyl", DimensionInput::new(dec!(30), dec!(30), 1).unwrap(), false)
//!     .unwrap();
//! assert_eq!(session.line(small).unwrap().total_amount, dec!(10));
//!
//! // 108 more units push Vinyl past the threshold; the first line follows.
//! session
//!     .add_line("Vinyl", DimensionInput::new(dec!(100), dec!(100), 9).unwrap(), false)
//!     .unwrap();
//! assert_eq!(session.line(small).unwrap().total_amount, dec!(8));
//! assert_eq!(session.totals().subtotal, dec!(872));
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculations::{MaterialAreaLedger, PricingEngine, compute_totals};
use crate::catalog::Catalog;
use crate::models::{
    DimensionInput, LineId, Material, PricingConfig, PricingConfigError, QuoteLine, QuoteTotals,
};

/// Reasons a quote operation is rejected. A rejected operation leaves the
/// session unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("material '{0}' is not in the catalog")]
    UnknownMaterial(String),

    #[error("material '{0}' has no standard price")]
    UnpricedMaterial(String),

    #[error("no dimensions were submitted")]
    EmptyBatch,

    #[error("quote line {0} not found")]
    LineNotFound(LineId),

    #[error("invalid pricing configuration: {0}")]
    InvalidConfig(#[from] PricingConfigError),
}

/// One user's quote: catalog, ledger, and the lines currently listed.
#[derive(Debug, Clone)]
pub struct QuoteSession {
    catalog: Catalog,
    config: PricingConfig,
    ledger: MaterialAreaLedger,
    lines: Vec<QuoteLine>,
    next_id: u64,
}

impl QuoteSession {
    /// Starts an empty quote.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidConfig`] if `config` fails validation.
    pub fn new(
        catalog: Catalog,
        config: PricingConfig,
    ) -> Result<Self, QuoteError> {
        config.validate()?;
        info!(materials = catalog.len(), "quote session started");

        Ok(Self {
            ledger: MaterialAreaLedger::new(config.discount_threshold_units),
            catalog,
            config,
            lines: Vec::new(),
            next_id: 1,
        })
    }

    /// Adds one line. See [`QuoteSession::add_lines`].
    pub fn add_line(
        &mut self,
        material_name: &str,
        dimension: DimensionInput,
        trim: bool,
    ) -> Result<LineId, QuoteError> {
        self.add_lines(material_name, &[dimension], trim)?
            .into_iter()
            .next()
            .ok_or(QuoteError::EmptyBatch)
    }

    /// Adds one line per dimension, all sharing a material and trim flag.
    ///
    /// Every line's area is committed to the ledger before any of them is
    /// priced, then the whole quote is recomputed. Either all lines are added
    /// or none are.
    ///
    /// # Errors
    ///
    /// * [`QuoteError::EmptyBatch`] if `dimensions` is empty.
    /// * [`QuoteError::UnknownMaterial`] if the material is not in the catalog.
    /// * [`QuoteError::UnpricedMaterial`] if its standard price is zero.
    pub fn add_lines(
        &mut self,
        material_name: &str,
        dimensions: &[DimensionInput],
        trim: bool,
    ) -> Result<Vec<LineId>, QuoteError> {
        if dimensions.is_empty() {
            return Err(QuoteError::EmptyBatch);
        }
        let material = self.resolve_material(material_name)?.clone();
        let key = material.key();
        let engine = PricingEngine::new(&self.config);

        for dimension in dimensions {
            let units = engine.area_units(dimension, &key, trim);
            self.ledger.add_area(&key.base, units);
        }

        let mut ids = Vec::with_capacity(dimensions.len());
        for dimension in dimensions {
            let price = engine.price(dimension, &material, trim, &self.ledger);
            let id = LineId(self.next_id);
            self.next_id += 1;

            debug!(
                line = %id,
                material = %key,
                size = %dimension.size_label(),
                quantity = dimension.quantity(),
                area_units = price.area_units,
                discounted = price.discounted,
                total = %price.total_amount,
                "line priced"
            );

            self.lines.push(QuoteLine {
                id,
                material_name: material.name.clone(),
                material: key.clone(),
                dimension: *dimension,
                area_units: price.area_units,
                trim,
                discounted: price.discounted,
                total_amount: price.total_amount,
                unit_price: price.unit_price,
                below_minimum: false,
            });
            ids.push(id);
        }

        info!(
            material = %key,
            lines = ids.len(),
            trim,
            material_units = self.ledger.area_for(&key.base),
            "lines added"
        );
        self.recompute_all();
        Ok(ids)
    }

    /// Removes a line, returns its area to the ledger, and recomputes.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::LineNotFound`] if no line has `id`.
    pub fn remove_line(
        &mut self,
        id: LineId,
    ) -> Result<QuoteLine, QuoteError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.id == id)
            .ok_or(QuoteError::LineNotFound(id))?;

        let line = self.lines.remove(index);
        self.ledger.remove_area(line.base_material(), line.area_units);

        info!(
            line = %id,
            material = %line.material,
            area_units = line.area_units,
            "line removed"
        );
        self.recompute_all();
        Ok(line)
    }

    /// Re-prices every line, in list order, against the current ledger and
    /// refreshes the below-minimum flags. Recorded areas are not touched.
    pub fn recompute_all(&mut self) {
        let engine = PricingEngine::new(&self.config);

        for line in &mut self.lines {
            let Some(material) = self.catalog.get(&line.material_name) else {
                warn!(line = %line.id, material = %line.material_name, "material missing from catalog, keeping last price");
                continue;
            };
            let price = engine.reprice(
                material,
                line.quantity(),
                line.area_units,
                line.trim,
                &self.ledger,
            );

            if price.discounted != line.discounted {
                debug!(line = %line.id, discounted = price.discounted, "discount tier changed");
            }
            line.discounted = price.discounted;
            line.total_amount = price.total_amount;
            line.unit_price = price.unit_price;
        }

        self.flag_below_minimum();
        debug_assert!(
            self.ledger_matches_lines(),
            "material area ledger diverged from quote lines"
        );
    }

    /// Clears every line and the ledger. Line ids keep counting up.
    pub fn reset(&mut self) {
        info!(lines = self.lines.len(), "quote cleared");
        self.lines.clear();
        self.ledger.reset();
    }

    pub fn lines(&self) -> &[QuoteLine] {
        &self.lines
    }

    pub fn line(
        &self,
        id: LineId,
    ) -> Option<&QuoteLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn ledger(&self) -> &MaterialAreaLedger {
        &self.ledger
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn totals(&self) -> QuoteTotals {
        compute_totals(&self.lines, self.config.tax_rate)
    }

    /// Billed amount per base material, sorted by name.
    pub fn material_totals(&self) -> BTreeMap<String, Decimal> {
        let mut totals = BTreeMap::new();
        for line in &self.lines {
            *totals
                .entry(line.base_material().to_string())
                .or_insert(Decimal::ZERO) += line.total_amount;
        }
        totals
    }

    /// Whether every ledger entry equals the summed area of its lines.
    pub fn ledger_matches_lines(&self) -> bool {
        let mut expected: BTreeMap<&str, u64> = BTreeMap::new();
        for line in &self.lines {
            *expected.entry(line.base_material()).or_insert(0) += line.area_units;
        }
        expected.retain(|_, units| *units > 0);

        self.ledger.iter().eq(expected)
    }

    fn resolve_material(
        &self,
        name: &str,
    ) -> Result<&Material, QuoteError> {
        // A missing material reads as a zero price too; `get` tells the two apart.
        let (price, _) = self.catalog.unit_prices_or_zero(name);
        match self.catalog.get(name) {
            None => {
                warn!(material = name, "rejected submission for unknown material");
                Err(QuoteError::UnknownMaterial(name.to_string()))
            }
            Some(_) if price <= Decimal::ZERO => {
                warn!(material = name, "rejected submission for unpriced material");
                Err(QuoteError::UnpricedMaterial(name.to_string()))
            }
            Some(material) => Ok(material),
        }
    }

    fn flag_below_minimum(&mut self) {
        let totals = self.material_totals();
        let minimum = self.config.minimum_charge;

        for line in &mut self.lines {
            let material_total = totals
                .get(line.base_material())
                .copied()
                .unwrap_or(Decimal::ZERO);
            line.below_minimum = material_total < minimum;
        }
    }
}
