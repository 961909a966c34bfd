//! Integration tests: files on disk through the loaders into a quote session.

use std::path::Path;

use pretty_assertions::assert_eq;
use quote_core::{PricingConfig, QuoteSession};
use quote_data::{CatalogLoader, PresetBook, order_loader};
use rust_decimal_macros::dec;

const MATERIALS_JSON: &str = include_str!("../test-data/materials.json");
const MATERIALS_CSV: &str = include_str!("../test-data/materials.csv");
const ORDER_CSV: &str = include_str!("../test-data/order.csv");

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data").join(name)
}

fn session_from_order() -> QuoteSession {
    let catalog = CatalogLoader::from_json_str(MATERIALS_JSON).expect("Failed to parse catalog");
    let mut session =
        QuoteSession::new(catalog, PricingConfig::default()).expect("Default config is valid");

    let batches = order_loader::load_from_str(ORDER_CSV).expect("Failed to parse order");
    for batch in &batches {
        session
            .add_lines(&batch.material, &batch.dimensions, batch.trim)
            .expect("Failed to add batch");
    }
    session
}

#[test]
fn test_json_and_csv_catalogs_agree() {
    let from_json = CatalogLoader::from_json_str(MATERIALS_JSON).expect("Failed to parse JSON");
    let from_csv =
        CatalogLoader::from_csv_reader(MATERIALS_CSV.as_bytes()).expect("Failed to parse CSV");

    assert_eq!(from_json.materials(), from_csv.materials());
}

#[test]
fn test_load_path_dispatches_on_extension() {
    let json = CatalogLoader::load_path(&fixture("materials.json")).expect("Failed to load JSON");
    let csv = CatalogLoader::load_path(&fixture("materials.csv")).expect("Failed to load CSV");

    assert_eq!(json.len(), 5);
    assert_eq!(csv.len(), 5);
}

#[test]
fn test_missing_catalog_file_is_io_error() {
    let result = CatalogLoader::load_path(&fixture("missing.json"));

    assert!(matches!(
        result,
        Err(quote_data::CatalogLoadError::Io { .. })
    ));
}

#[test]
fn test_order_file_groups_rows() {
    let batches = order_loader::load_from_file(&fixture("order.csv")).expect("Failed to load order");

    let summary: Vec<(&str, usize, bool)> = batches
        .iter()
        .map(|batch| (batch.material.as_str(), batch.dimensions.len(), batch.trim))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Vinyl", 2, false),
            ("PVC Sticker+contour-cut", 1, true),
            ("Canvas", 1, false),
        ]
    );
}

#[test]
fn test_order_prices_through_session() {
    let session = session_from_order();

    let amounts: Vec<_> = session.lines().iter().map(|line| line.total_amount).collect();
    assert_eq!(amounts, vec![dec!(864), dec!(8), dec!(228), dec!(420)]);

    let vinyl_discounted: Vec<bool> = session.lines()[..2].iter().map(|line| line.discounted).collect();
    assert_eq!(vinyl_discounted, vec![true, true]);

    assert_eq!(session.ledger().area_for("Vinyl"), 109);
    assert_eq!(session.ledger().area_for("PVC Sticker"), 6);
    assert_eq!(session.ledger().area_for("Canvas"), 12);
    assert!(session.ledger_matches_lines());
}

#[test]
fn test_order_totals() {
    let session = session_from_order();

    let totals = session.totals();

    assert_eq!(totals.subtotal, dec!(1520));
    assert_eq!(totals.tax, dec!(76));
    assert_eq!(totals.total, dec!(1596));
}

#[test]
fn test_preset_feeds_session() {
    let catalog = CatalogLoader::from_json_str(MATERIALS_JSON).expect("Failed to parse catalog");
    let mut session =
        QuoteSession::new(catalog, PricingConfig::default()).expect("Default config is valid");
    let book = PresetBook::builtin();

    let dimension = book
        .lookup("a1")
        .and_then(|preset| preset.to_dimension(2))
        .expect("A1 is built in");
    let id = session.add_line("Canvas", dimension, false).expect("Failed to add line");

    let line = session.line(id).expect("Line was just added");
    assert_eq!(line.area_units, 12);
    assert_eq!(line.total_amount, dec!(420));
}
