//! Inflation command implementation.

use crate::cmd::{header, section};
use anyhow::{Context, Result};
use bandwatch_macro::read_inflation_csv;
use std::path::Path;

/// Show a UK CPI table, newest month first.
pub(crate) fn show_inflation(input: &Path) -> Result<()> {
    header("Macro Indicators - UK");

    let series = read_inflation_csv(input)
        .with_context(|| format!("reading inflation table {}", input.display()))?;

    if let Some(latest) = series.latest() {
        println!(
            "CPI 12-month rate:  {:.1}% ({})",
            latest.twelve_month,
            latest.date.format("%b %Y")
        );
        println!(
            "CPI 1-month rate:   {:.1}% ({})",
            latest.one_month,
            latest.date.format("%b %Y")
        );
        println!();
    }

    section("CPI FIGURES");
    println!("{:<10} {:>10} {:>10}", "Month", "1-Month", "12-Month");
    println!("{}", "─".repeat(32));
    for record in series.newest_first() {
        println!(
            "{:<10} {:>9.1}% {:>9.1}%",
            record.date.format("%b %Y").to_string(),
            record.one_month,
            record.twelve_month
        );
    }
    println!();

    Ok(())
}
