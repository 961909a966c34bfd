//! Order sheet loader.
//!
//! An order sheet is the batch form of the quote form: each row is one
//! requested size. Consecutive rows with the same material and trim flag
//! form one submission, exactly as if they had been entered as several
//! dimension groups on one form.
//!
//! ## CSV Format
//!
//! | Column     | Required | Type    | Notes |
//! |------------|----------|---------|-------|
//! | `material` | yes      | string  | Catalog name, including any cutting-mode suffix |
//! | `length`   | yes      | decimal | cm, positive, at most 10000 |
//! | `width`    | yes      | decimal | cm, positive, at most 10000 |
//! | `quantity` | yes      | integer | 1 to 1000000 |
//! | `trim`     | no       | flag    | `true/false`, `yes/no`, `y/n`, `1/0`; empty means no |
//!
//! ```csv
//! material,length,width,quantity,trim
//! Vinyl,100,100,9,
//! Vinyl,30,30,1,
//! PVC Sticker+contour-cut,10,10,50,yes
//! ```

use std::path::Path;

use quote_core::{DimensionError, DimensionInput};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
struct CsvRow {
    material: String,
    length: Decimal,
    width: Decimal,
    quantity: u32,
    #[serde(default)]
    trim: Option<String>,
}

/// Errors that can occur while loading an order sheet.
#[derive(Debug, Error)]
pub enum OrderLoadError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("invalid size on row {row}: {source}")]
    InvalidDimension {
        row: usize,
        #[source]
        source: DimensionError,
    },

    #[error("unrecognised trim flag '{value}' on row {row}")]
    InvalidTrimFlag { value: String, row: usize },

    #[error("material is empty on row {0}")]
    EmptyMaterial(usize),
}

/// One submission: sizes sharing a material and trim flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBatch {
    pub material: String,
    pub trim: bool,
    pub dimensions: Vec<DimensionInput>,
}

/// Parses a trim cell. Empty or missing means no trim.
pub fn parse_trim_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Some(false),
        "true" | "yes" | "y" | "1" | "trim" => Some(true),
        _ => None,
    }
}

/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<(String, bool, DimensionInput), OrderLoadError> {
    let material = row.material.trim().to_string();
    if material.is_empty() {
        return Err(OrderLoadError::EmptyMaterial(row_number));
    }

    let trim_cell = row.trim.unwrap_or_default();
    let trim = parse_trim_flag(&trim_cell).ok_or_else(|| OrderLoadError::InvalidTrimFlag {
        value: trim_cell.clone(),
        row: row_number,
    })?;

    let dimension = DimensionInput::new(row.length, row.width, row.quantity).map_err(|source| {
        OrderLoadError::InvalidDimension {
            row: row_number,
            source,
        }
    })?;

    Ok((material, trim, dimension))
}

/// Parse an order sheet and group it into batches, in file order.
///
/// Any invalid row rejects the whole sheet.
pub fn load_from_str(input: &str) -> Result<Vec<OrderBatch>, OrderLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true) // the trailing trim column may be omitted
        .from_reader(input.as_bytes());

    let mut batches: Vec<OrderBatch> = Vec::new();

    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        let (material, trim, dimension) = convert_row(result?, idx + 1)?;

        match batches.last_mut() {
            Some(batch) if batch.material == material && batch.trim == trim => {
                batch.dimensions.push(dimension);
            }
            _ => batches.push(OrderBatch {
                material,
                trim,
                dimensions: vec![dimension],
            }),
        }
    }

    Ok(batches)
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<OrderBatch>, OrderLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| OrderLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const ORDER_CSV: &str = "\
material,length,width,quantity,trim
Vinyl,100,100,9,
Vinyl,30,30,1,no
PVC Sticker+contour-cut,10,10,50,yes
PVC Sticker+contour-cut,20,20,10,y
Vinyl,59.4,84.1,2,
";

    // -----------------------------------------------------------------------
    // parse_trim_flag
    // -----------------------------------------------------------------------

    #[test]
    fn trim_flag_accepts_common_spellings() {
        for value in ["true", "YES", "y", "1", " Trim "] {
            assert_eq!(parse_trim_flag(value), Some(true), "{value}");
        }
        for value in ["", "false", "No", "n", "0"] {
            assert_eq!(parse_trim_flag(value), Some(false), "{value}");
        }
        assert_eq!(parse_trim_flag("maybe"), None);
    }

    // -----------------------------------------------------------------------
    // grouping
    // -----------------------------------------------------------------------

    #[test]
    fn consecutive_rows_form_batches() {
        let batches = load_from_str(ORDER_CSV).unwrap();

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].material, "Vinyl");
        assert_eq!(batches[0].dimensions.len(), 2);
        assert!(!batches[0].trim);
        assert_eq!(batches[1].material, "PVC Sticker+contour-cut");
        assert!(batches[1].trim);
        assert_eq!(batches[1].dimensions.len(), 2);
        assert_eq!(batches[2].dimensions[0].length(), dec!(59.4));
    }

    #[test]
    fn trim_change_starts_new_batch() {
        let csv = "\
material,length,width,quantity,trim
Vinyl,30,30,1,
Vinyl,30,30,1,yes
";
        let batches = load_from_str(csv).unwrap();

        assert_eq!(batches.len(), 2);
        assert!(!batches[0].trim);
        assert!(batches[1].trim);
    }

    #[test]
    fn trim_column_may_be_omitted() {
        let csv = "material,length,width,quantity\nVinyl,30,30,4\n";

        let batches = load_from_str(csv).unwrap();

        assert_eq!(batches.len(), 1);
        assert!(!batches[0].trim);
        assert_eq!(batches[0].dimensions[0].quantity(), 4);
    }

    // -----------------------------------------------------------------------
    // rejection
    // -----------------------------------------------------------------------

    #[test]
    fn zero_quantity_reports_row() {
        let csv = "material,length,width,quantity,trim\nVinyl,30,30,1,\nVinyl,30,30,0,\n";

        let result = load_from_str(csv);

        assert!(matches!(
            result,
            Err(OrderLoadError::InvalidDimension {
                row: 2,
                source: DimensionError::ZeroQuantity
            })
        ));
    }

    #[test]
    fn negative_length_reports_row() {
        let csv = "material,length,width,quantity,trim\nVinyl,-30,30,1,\n";

        let result = load_from_str(csv);

        assert!(matches!(
            result,
            Err(OrderLoadError::InvalidDimension { row: 1, .. })
        ));
    }

    #[test]
    fn oversized_row_rejects_sheet() {
        let csv = "material,length,width,quantity,trim\nVinyl,30,30,1,\nVinyl,100000000000000000000,30,1,\n";

        let result = load_from_str(csv);

        assert!(matches!(
            result,
            Err(OrderLoadError::InvalidDimension {
                row: 2,
                source: DimensionError::SideTooLarge(_)
            })
        ));
    }

    #[test]
    fn bad_trim_flag_reports_row() {
        let csv = "material,length,width,quantity,trim\nVinyl,30,30,1,sometimes\n";

        let result = load_from_str(csv);

        assert!(matches!(
            result,
            Err(OrderLoadError::InvalidTrimFlag { row: 1, ref value }) if value == "sometimes"
        ));
    }

    #[test]
    fn empty_material_reports_row() {
        let csv = "material,length,width,quantity,trim\n ,30,30,1,\n";

        let result = load_from_str(csv);

        assert!(matches!(result, Err(OrderLoadError::EmptyMaterial(1))));
    }

    #[test]
    fn non_numeric_quantity_is_parse_error() {
        let csv = "material,length,width,quantity,trim\nVinyl,30,30,two,\n";

        let result = load_from_str(csv);

        assert!(matches!(result, Err(OrderLoadError::Parse(_))));
    }
}
