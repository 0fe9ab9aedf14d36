//! Scan command implementation.

use crate::cmd::{header, section};
use crate::config::AppConfig;
use crate::data;
use anyhow::{Context, Result};
use bandwatch_report::{BatchReport, SignalBoard, export, run_batch};
use bandwatch_signals::breach::{BreachConfig, MovingAverageBreach, TickerSignalRow};
use std::path::Path;

/// Run the breach engine over every ticker of a price table.
pub(crate) fn run_scan(
    config: &AppConfig,
    prices: &Path,
    output: Option<&Path>,
    signals_output: Option<&Path>,
    breach_limit: Option<u32>,
) -> Result<()> {
    header("Moving Average Breach Scan");

    let mut breach: BreachConfig = config.breach.clone();
    if let Some(limit) = breach_limit {
        breach.breach_limit = limit;
    }

    let windows: Vec<String> = breach
        .moving_averages
        .iter()
        .map(|(w, t)| format!("MA{w} ({t}%)"))
        .collect();
    println!("Prices:   {}", prices.display());
    println!("Windows:  {}", windows.join(", "));
    println!("Limit:    {}", breach.breach_limit);
    println!();

    let table = data::load_table(prices)?;
    println!(
        "Loaded {} rows of data for {} tickers",
        table.len(),
        table.tickers().len()
    );
    println!();

    let report = run_batch(&MovingAverageBreach::new(breach), &table)?;

    print_board(&SignalBoard::from_rows(report.all_rows()));
    print_latest(&report);

    if !report.failures().is_empty() {
        section("FAILED TICKERS");
        for failure in report.failures() {
            println!("  {:<10} {}", failure.ticker, failure.error);
        }
        println!();
    }

    if output.is_some() || signals_output.is_some() {
        let rows: Vec<TickerSignalRow> = report.all_rows().cloned().collect();
        if let Some(path) = output {
            export::write_csv_path(&rows, path)
                .with_context(|| format!("writing results to {}", path.display()))?;
            println!("Results written to {}", path.display());
        }
        if let Some(path) = signals_output {
            export::write_signals_csv_path(&rows, path)
                .with_context(|| format!("writing signals to {}", path.display()))?;
            println!("Signals written to {}", path.display());
        }
        println!();
    }

    Ok(())
}

fn print_board(board: &SignalBoard) {
    let Some(date) = board.date else {
        println!("No prices to scan.\n");
        return;
    };

    section(&format!("SIGNALS (as of {date})"));
    if board.is_empty() {
        println!("No tickers breach the limit.\n");
        return;
    }

    println!("{:<10} {:>12} {:>8} {:>8}", "Ticker", "Price", "Breach", "Signal");
    println!("{}", "─".repeat(41));
    for row in board.iter() {
        println!(
            "{:<10} {:>12.2} {:>8} {:>8}",
            row.ticker,
            row.price,
            row.total_breach,
            row.signal_label()
        );
    }
    println!();
}

fn print_latest(report: &BatchReport<TickerSignalRow>) {
    section("LATEST");
    println!(
        "{:<10} {:>12} {:>12} {:>8} {:>8}",
        "Ticker", "Date", "Price", "Breach", "Signal"
    );
    println!("{}", "─".repeat(54));
    for row in report.latest() {
        println!(
            "{:<10} {:>12} {:>12.2} {:>8} {:>8}",
            row.ticker,
            row.date.to_string(),
            row.price,
            row.total_breach,
            row.signal_label()
        );
    }
    println!();
}
