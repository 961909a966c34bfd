use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::{debug, info, warn};

use quote_cli::{
    app,
    args::ItemArg,
    config::AppConfig,
    logging,
};
use quote_data::{CatalogLoader, order_loader};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Print shop quote calculator.
///
/// Prices each requested size by area, applies the volume rate once a
/// material's total area on the quote reaches the threshold, and prints a
/// plain-text quote.
#[derive(Debug, Parser)]
#[command(name = "print-quote")]
struct Cli {
    /// Material catalog (`.json` or `.csv`).
    #[arg(long)]
    catalog: PathBuf,

    /// TOML file with pricing, logging and preset settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Order sheet CSV (`material,length,width,quantity,trim`).
    #[arg(long)]
    order: Option<PathBuf>,

    /// One item, e.g. `Vinyl=100x100*9`, `Vinyl=@A1*2,trim`. Repeatable.
    #[arg(long = "item", value_name = "ITEM")]
    items: Vec<ItemArg>,

    /// Print the catalog and exit.
    #[arg(long)]
    list_materials: bool,

    /// Print the size presets and exit.
    #[arg(long)]
    list_presets: bool,

    /// Log filter, e.g. `debug` or `info,quote_core=trace`. Overrides the config file.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Suppress log output on stderr.
    #[arg(long, short)]
    quiet: bool,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref().unwrap_or("info"));
    if cli.quiet {
        logging::set_stderr_enabled(false)?;
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };

    // RUST_LOG and --log-level both outrank the config file.
    if cli.log_level.is_none() && std::env::var_os("RUST_LOG").is_none() {
        if let Some(level) = &config.logging.level {
            if let Err(error) = logging::set_log_level(level) {
                warn!(%error, "ignoring configured log level");
            }
        }
    }
    if let Some(path) = cli.log_file.as_ref().or(config.logging.file.as_ref()) {
        logging::enable_file_logging(path)?;
        debug!(path = %path.display(), "file logging enabled");
    }

    let result = run(&cli, &config);
    logging::disable_file_logging();
    result
}

fn run(
    cli: &Cli,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let presets = app::preset_book(config);
    if cli.list_presets {
        print!("{}", app::list_presets(&presets));
        return Ok(());
    }

    let catalog = CatalogLoader::load_path(&cli.catalog)
        .with_context(|| format!("failed to load catalog {}", cli.catalog.display()))?;
    if cli.list_materials {
        print!("{}", app::list_materials(&catalog));
        return Ok(());
    }

    let mut session = app::build_session(catalog, config)?;

    if let Some(path) = &cli.order {
        let batches = order_loader::load_from_file(path)
            .with_context(|| format!("failed to load order sheet {}", path.display()))?;
        app::apply_batches(&mut session, &batches)?;
    }
    app::apply_items(&mut session, &cli.items, &presets)?;

    let totals = session.totals();
    info!(lines = session.len(), total = %totals.total, "quote ready");

    print!("{}", app::quote_text(&session, Local::now().date_naive()));
    Ok(())
}
