//! Area-based volume-discount pricing for print quotes.
//!
//! Materials are billed per 30cm × 30cm area unit. Once the cumulative area
//! of a base material across the whole quote reaches the discount threshold,
//! every line of that material is re-priced at the discount rate.

pub mod calculations;
pub mod catalog;
pub mod models;
pub mod report;
pub mod session;

pub use catalog::Catalog;
pub use models::*;
pub use report::{QuoteReport, render_quote};
pub use session::{QuoteError, QuoteSession};
