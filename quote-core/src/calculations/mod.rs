//! Area, ledger, pricing, and totals calculations.
//!
//! Everything here is synchronous and free of I/O. The only mutable state is
//! [`MaterialAreaLedger`], which is owned by a [`crate::QuoteSession`].

pub mod area;
pub mod common;
pub mod ledger;
pub mod pricing;
pub mod totals;

pub use area::{AreaCalculator, AreaRounding};
pub use ledger::MaterialAreaLedger;
pub use pricing::{LinePrice, PricingEngine};
pub use totals::compute_totals;
