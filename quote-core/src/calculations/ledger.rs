//! Running area totals per base material.
//!
//! The ledger is what makes discounts retroactive: the discount tier of a
//! material depends only on its cumulative area across every listed line,
//! never on the order lines were added in.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::error;

use crate::models::DISCOUNT_THRESHOLD_UNITS;

/// Cumulative billed area units keyed by base material name.
///
/// Entries that fall to zero are dropped, so an empty quote always has an
/// empty ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialAreaLedger {
    areas: BTreeMap<String, u64>,
    threshold: u64,
}

impl Default for MaterialAreaLedger {
    fn default() -> Self {
        Self::new(DISCOUNT_THRESHOLD_UNITS)
    }
}

impl MaterialAreaLedger {
    /// Creates an empty ledger whose discount tier starts at `threshold` units.
    pub fn new(threshold: u64) -> Self {
        Self {
            areas: BTreeMap::new(),
            threshold,
        }
    }

    pub fn add_area(
        &mut self,
        base_material: &str,
        units: u64,
    ) {
        if units == 0 {
            return;
        }
        let entry = self.areas.entry(base_material.to_string()).or_insert(0);
        *entry = entry.saturating_add(units);
    }

    /// Subtracts a line's contribution.
    ///
    /// Removing more than was recorded means line and ledger bookkeeping have
    /// diverged. Debug builds panic; release builds log and clamp to zero.
    pub fn remove_area(
        &mut self,
        base_material: &str,
        units: u64,
    ) {
        let current = self.area_for(base_material);
        debug_assert!(
            current >= units,
            "ledger underflow for '{base_material}': removing {units} from {current}"
        );

        let remaining = current.checked_sub(units).unwrap_or_else(|| {
            error!(
                material = base_material,
                recorded = current,
                requested = units,
                "ledger underflow, clamping to zero"
            );
            0
        });

        if remaining == 0 {
            self.areas.remove(base_material);
        } else {
            self.areas.insert(base_material.to_string(), remaining);
        }
    }

    pub fn area_for(
        &self,
        base_material: &str,
    ) -> u64 {
        self.areas.get(base_material).copied().unwrap_or(0)
    }

    pub fn is_discounted(
        &self,
        base_material: &str,
    ) -> bool {
        self.area_for(base_material) >= self.threshold
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Entries sorted by base material name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.areas.iter().map(|(name, units)| (name.as_str(), *units))
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn reset(&mut self) {
        self.areas.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn add_area_accumulates_per_material() {
        let mut ledger = MaterialAreaLedger::default();

        ledger.add_area("Vinyl", 40);
        ledger.add_area("Vinyl", 2);
        ledger.add_area("Canvas", 7);

        assert_eq!(ledger.area_for("Vinyl"), 42);
        assert_eq!(ledger.area_for("Canvas"), 7);
        assert_eq!(ledger.area_for("Paper"), 0);
    }

    #[test]
    fn add_zero_area_creates_no_entry() {
        let mut ledger = MaterialAreaLedger::default();

        ledger.add_area("Vinyl", 0);

        assert!(ledger.is_empty());
    }

    #[test]
    fn remove_area_drops_entry_at_zero() {
        let mut ledger = MaterialAreaLedger::default();
        ledger.add_area("Vinyl", 12);

        ledger.remove_area("Vinyl", 12);

        assert!(ledger.is_empty());
    }

    #[test]
    fn remove_area_leaves_remainder() {
        let mut ledger = MaterialAreaLedger::default();
        ledger.add_area("Vinyl", 109);

        ledger.remove_area("Vinyl", 108);

        assert_eq!(ledger.area_for("Vinyl"), 1);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "ledger underflow"))]
    fn remove_area_underflow_clamps_to_zero() {
        let mut ledger = MaterialAreaLedger::default();
        ledger.add_area("Vinyl", 5);

        ledger.remove_area("Vinyl", 8);

        assert_eq!(ledger.area_for("Vinyl"), 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn discount_tier_starts_at_threshold() {
        let mut ledger = MaterialAreaLedger::default();

        ledger.add_area("Vinyl", 99);
        assert!(!ledger.is_discounted("Vinyl"));

        ledger.add_area("Vinyl", 1);
        assert!(ledger.is_discounted("Vinyl"));
    }

    #[test]
    fn custom_threshold() {
        let mut ledger = MaterialAreaLedger::new(10);
        ledger.add_area("Canvas", 10);

        assert!(ledger.is_discounted("Canvas"));
        assert_eq!(ledger.threshold(), 10);
    }

    #[test]
    fn iter_is_sorted_by_name() {
        let mut ledger = MaterialAreaLedger::default();
        ledger.add_area("Vinyl", 3);
        ledger.add_area("Canvas", 5);

        let entries: Vec<_> = ledger.iter().collect();

        assert_eq!(entries, vec![("Canvas", 5), ("Vinyl", 3)]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut ledger = MaterialAreaLedger::default();
        ledger.add_area("Vinyl", 150);
        ledger.add_area("Canvas", 5);

        ledger.reset();

        assert!(ledger.is_empty());
        assert!(!ledger.is_discounted("Vinyl"));
    }
}
