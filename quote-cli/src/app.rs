//! Builds a quote from the loaded catalog, order sheet and `--item` values.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use quote_core::{Catalog, QuoteSession, render_quote};
use quote_data::{OrderBatch, PresetBook, PresetGroup};
use tracing::info;

use crate::args::ItemArg;
use crate::config::AppConfig;

/// Built-in presets with the configured ones layered on top.
pub fn preset_book(config: &AppConfig) -> PresetBook {
    let mut book = PresetBook::builtin();
    book.extend(config.presets.iter().cloned());
    book
}

pub fn build_session(
    catalog: Catalog,
    config: &AppConfig,
) -> Result<QuoteSession> {
    QuoteSession::new(catalog, config.pricing.clone()).context("failed to start quote")
}

/// Adds each order-sheet batch as one submission, in file order.
pub fn apply_batches(
    session: &mut QuoteSession,
    batches: &[OrderBatch],
) -> Result<()> {
    for (index, batch) in batches.iter().enumerate() {
        session
            .add_lines(&batch.material, &batch.dimensions, batch.trim)
            .with_context(|| format!("order group {} ({})", index + 1, batch.material))?;
    }
    info!(batches = batches.len(), lines = session.len(), "order sheet applied");
    Ok(())
}

/// Adds each `--item` as its own submission.
pub fn apply_items(
    session: &mut QuoteSession,
    items: &[ItemArg],
    presets: &PresetBook,
) -> Result<()> {
    for item in items {
        let dimension = item
            .dimension(presets)
            .with_context(|| format!("item for '{}'", item.material))?;
        session
            .add_line(&item.material, dimension, item.trim)
            .with_context(|| format!("item for '{}'", item.material))?;
    }
    Ok(())
}

/// Heading line printed above the quote body.
pub fn quote_header(date: NaiveDate) -> String {
    format!("Quote dated {}\n", date.format("%Y-%m-%d"))
}

/// Full printable quote: header, blank line, body.
pub fn quote_text(
    session: &QuoteSession,
    date: NaiveDate,
) -> String {
    format!("{}\n{}", quote_header(date), render_quote(session))
}

pub fn list_materials(catalog: &Catalog) -> String {
    catalog
        .materials()
        .iter()
        .map(|m| format!("{}  {} / {}\n", m.name, m.price, m.discount_price))
        .collect()
}

pub fn list_presets(book: &PresetBook) -> String {
    PresetGroup::ALL
        .into_iter()
        .map(|group| {
            let sizes: String = book
                .by_group(group)
                .map(|preset| {
                    format!(
                        "  {}  {}x{}cm\n",
                        preset.name,
                        preset.length.normalize(),
                        preset.width.normalize()
                    )
                })
                .collect();
            format!("{group}:\n{sizes}")
        })
        .collect()
}
