//! Material catalog loading.
//!
//! Two formats carry the same three fields:
//!
//! JSON (the shop's `materials.json`):
//!
//! ```json
//! [
//!   { "name": "Vinyl", "price": 10, "discount_price": 8 },
//!   { "name": "PVC Sticker+contour-cut", "price": 18, "discount_price": 15 }
//! ]
//! ```
//!
//! CSV:
//!
//! ```csv
//! name,price,discount_price
//! Vinyl,10,8
//! ```
//!
//! File order is kept; it is the order materials are offered in.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use quote_core::{Catalog, Material};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when loading a material catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported catalog format '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),

    #[error("material '{0}' appears more than once")]
    DuplicateMaterial(String),

    #[error("material '{name}' has a negative price")]
    NegativePrice { name: String },

    #[error("material name on entry {0} is empty")]
    EmptyName(usize),
}

/// Loader for material catalogs.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse a JSON array of materials.
    pub fn from_json_str(input: &str) -> Result<Catalog, CatalogLoadError> {
        let materials: Vec<Material> = serde_json::from_str(input)?;
        Self::build(materials)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Catalog, CatalogLoadError> {
        let materials: Vec<Material> = serde_json::from_reader(reader)?;
        Self::build(materials)
    }

    /// Parse a CSV with `name,price,discount_price` headers.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Catalog, CatalogLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let materials = csv_reader
            .deserialize::<Material>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::build(materials)
    }

    /// Load a catalog file, choosing the parser from its extension.
    pub fn load_path(path: &Path) -> Result<Catalog, CatalogLoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let open = || {
            File::open(path).map_err(|source| CatalogLoadError::Io {
                path: path.display().to_string(),
                source,
            })
        };

        let catalog = match extension.as_str() {
            "json" => Self::from_json_reader(open()?)?,
            "csv" => Self::from_csv_reader(open()?)?,
            _ => return Err(CatalogLoadError::UnsupportedFormat(extension)),
        };

        debug!(path = %path.display(), materials = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    fn build(materials: Vec<Material>) -> Result<Catalog, CatalogLoadError> {
        let mut seen = HashSet::new();

        for (index, material) in materials.iter().enumerate() {
            if material.name.trim().is_empty() {
                return Err(CatalogLoadError::EmptyName(index + 1));
            }
            if !seen.insert(material.name.as_str()) {
                return Err(CatalogLoadError::DuplicateMaterial(material.name.clone()));
            }
            if material.price < Decimal::ZERO || material.discount_price < Decimal::ZERO {
                return Err(CatalogLoadError::NegativePrice {
                    name: material.name.clone(),
                });
            }
            if material.discount_price > material.price {
                warn!(
                    material = %material.name,
                    price = %material.price,
                    discount_price = %material.discount_price,
                    "discount price is higher than standard price"
                );
            }
        }

        Ok(Catalog::new(materials))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_JSON: &str = r#"[
        { "name": "Vinyl", "price": 10, "discount_price": 8 },
        { "name": "Canvas", "price": "35.5", "discount_price": 30 }
    ]"#;

    const TEST_CSV: &str = "\
name,price,discount_price
Vinyl,10,8
Backlit Film+small-die-cut, 30 , 25
";

    #[test]
    fn parse_json_catalog() {
        let catalog = CatalogLoader::from_json_str(TEST_JSON).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.materials()[0].name, "Vinyl");
        assert_eq!(catalog.get("Canvas").map(|m| m.price), Some(dec!(35.5)));
    }

    #[test]
    fn parse_csv_catalog_trims_cells() {
        let catalog = CatalogLoader::from_csv_reader(TEST_CSV.as_bytes()).unwrap();

        let film = catalog.get("Backlit Film+small-die-cut").unwrap();
        assert_eq!(film.price, dec!(30));
        assert_eq!(film.discount_price, dec!(25));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let json = r#"[
            { "name": "Vinyl", "price": 10, "discount_price": 8 },
            { "name": "Vinyl", "price": 12, "discount_price": 9 }
        ]"#;

        let result = CatalogLoader::from_json_str(json);

        assert!(matches!(result, Err(CatalogLoadError::DuplicateMaterial(name)) if name == "Vinyl"));
    }

    #[test]
    fn negative_prices_are_rejected() {
        let csv = "name,price,discount_price\nVinyl,-1,0\n";

        let result = CatalogLoader::from_csv_reader(csv.as_bytes());

        assert!(matches!(result, Err(CatalogLoadError::NegativePrice { .. })));
    }

    #[test]
    fn empty_name_is_rejected() {
        let json = r#"[{ "name": " ", "price": 10, "discount_price": 8 }]"#;

        let result = CatalogLoader::from_json_str(json);

        assert!(matches!(result, Err(CatalogLoadError::EmptyName(1))));
    }

    #[test]
    fn discount_above_price_is_accepted() {
        let json = r#"[{ "name": "Odd", "price": 5, "discount_price": 6 }]"#;

        let catalog = CatalogLoader::from_json_str(json).unwrap();

        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn missing_column_is_csv_error() {
        let csv = "name,price\nVinyl,10\n";

        let result = CatalogLoader::from_csv_reader(csv.as_bytes());

        assert!(matches!(result, Err(CatalogLoadError::Csv(_))));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let result = CatalogLoader::load_path(Path::new("materials.xlsx"));

        assert!(matches!(result, Err(CatalogLoadError::UnsupportedFormat(ext)) if ext == "xlsx"));
    }
}
