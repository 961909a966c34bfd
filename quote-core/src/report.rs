//! Plain-text rendering of a quote for sharing.
//!
//! The report is a projection of [`QuoteSession`] state and never feeds back
//! into pricing.

use std::fmt;

use crate::session::QuoteSession;

/// Borrowing view that formats a session as a text quote.
pub struct QuoteReport<'a> {
    session: &'a QuoteSession,
}

impl<'a> QuoteReport<'a> {
    pub fn new(session: &'a QuoteSession) -> Self {
        Self { session }
    }
}

impl fmt::Display for QuoteReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let lines = self.session.lines();
        if lines.is_empty() {
            return writeln!(f, "No items on this quote.");
        }

        let config = self.session.config();
        let name_width = lines
            .iter()
            .map(|line| line.display_name().chars().count())
            .max()
            .unwrap_or(0)
            .max("Material".len());
        let rule = "-".repeat(name_width + 50);

        writeln!(
            f,
            "{:<name_width$}  {:>14}  {:>5}  {:>10}  {:>10}",
            "Material", "Size", "Qty", "Unit", "Amount"
        )?;
        writeln!(f, "{rule}")?;

        for line in lines {
            let mut marks = String::new();
            if line.discounted {
                marks.push('*');
            }
            if line.below_minimum {
                marks.push('!');
            }
            let row = format!(
                "{:<name_width$}  {:>14}  {:>5}  {:>10}  {:>10} {marks}",
                line.display_name(),
                line.dimension.size_label(),
                line.quantity(),
                line.unit_price.to_string(),
                line.total_amount.to_string(),
            );
            writeln!(f, "{}", row.trim_end())?;
        }

        let totals = self.session.totals();
        let tax_percent = (config.tax_rate * rust_decimal::Decimal::ONE_HUNDRED).normalize();
        writeln!(f, "{rule}")?;
        writeln!(f, "Subtotal: {}", totals.subtotal)?;
        writeln!(f, "Tax ({tax_percent}%): {}", totals.tax.normalize())?;
        writeln!(f, "Total: {}", totals.total.normalize())?;

        if lines.iter().any(|line| line.discounted) {
            writeln!(
                f,
                "* volume rate: {}+ area units of the material",
                config.discount_threshold_units
            )?;
        }
        if lines.iter().any(|line| line.below_minimum) {
            writeln!(
                f,
                "! material total is below the ${} minimum charge",
                config.minimum_charge.normalize()
            )?;
        }
        Ok(())
    }
}

/// Renders `session` as a shareable text quote.
pub fn render_quote(session: &QuoteSession) -> String {
    QuoteReport::new(session).to_string()
}
