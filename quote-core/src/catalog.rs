use rust_decimal::Decimal;

use crate::models::Material;

/// Read-only material list, in the order it was supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    materials: Vec<Material>,
}

impl Catalog {
    pub fn new(materials: Vec<Material>) -> Self {
        Self { materials }
    }

    /// Exact-name lookup. If a name appears twice the first entry wins.
    pub fn get(
        &self,
        name: &str,
    ) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// `(price, discount_price)` for `name`, or zeros when the material is
    /// missing. Callers treat a zero standard price as an unusable material.
    pub fn unit_prices_or_zero(
        &self,
        name: &str,
    ) -> (Decimal, Decimal) {
        self.get(name)
            .map(|m| (m.price, m.discount_price))
            .unwrap_or((Decimal::ZERO, Decimal::ZERO))
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Material {
                name: "Vinyl".to_string(),
                price: dec!(10),
                discount_price: dec!(8),
            },
            Material {
                name: "Canvas".to_string(),
                price: dec!(35),
                discount_price: dec!(30),
            },
        ])
    }

    #[test]
    fn get_finds_exact_name() {
        let catalog = catalog();

        assert_eq!(catalog.get("Canvas").map(|m| m.price), Some(dec!(35)));
        assert!(catalog.get("canvas").is_none());
    }

    #[test]
    fn unit_prices_or_zero_for_missing_material() {
        let catalog = catalog();

        assert_eq!(catalog.unit_prices_or_zero("Vinyl"), (dec!(10), dec!(8)));
        assert_eq!(catalog.unit_prices_or_zero("Paper"), (dec!(0), dec!(0)));
    }

    #[test]
    fn preserves_supplied_order() {
        let catalog = catalog();

        let names: Vec<_> = catalog.materials().iter().map(|m| m.name.as_str()).collect();

        assert_eq!(names, vec!["Vinyl", "Canvas"]);
        assert_eq!(catalog.len(), 2);
    }
}
