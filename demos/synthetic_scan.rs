//! Breach scan over synthetic prices.
//!
//! This example demonstrates:
//! - Building a price table from in-memory series
//! - Running the breach model over every ticker
//! - Reading the signal board and one ticker's chart markers
//! - Summarizing a ticker with the technical scorecard

use bandwatch::prelude::*;
use bandwatch::signals::markers::{DEFAULT_TOLERANCE, markers};
use bandwatch::signals::scorecard::summarize;
use chrono::{Duration, NaiveDate};

/// Trading days generated per ticker.
const DAYS: usize = 260;

/// Ticker, daily drift, cycle amplitude and the day of a one-off shock.
const UNIVERSE: &[(&str, f64, f64, Option<(usize, f64)>)] = &[
    ("STEADY", 0.0004, 0.01, None),
    ("CYCLER", 0.0, 0.12, None),
    ("CRASH", 0.0003, 0.02, Some((DAYS - 3, -0.25))),
    ("SPIKE", 0.0002, 0.02, Some((DAYS - 2, 0.30))),
];

fn synthetic_series(
    ticker: &str,
    drift: f64,
    amplitude: f64,
    shock: Option<(usize, f64)>,
) -> Result<PriceSeries> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).ok_or("bad start date")?;
    let mut level = 100.0;
    let pairs = (0..DAYS).map(|i| {
        level *= 1.0 + drift;
        if let Some((day, size)) = shock
            && i >= day
        {
            level *= 1.0 + size / 3.0;
        }
        let cycle = 1.0 + amplitude * (i as f64 / 20.0).sin();
        (start + Duration::days(i as i64), level * cycle)
    });
    PriceSeries::from_pairs(ticker, pairs.collect::<Vec<_>>())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let series = UNIVERSE
        .iter()
        .map(|&(ticker, drift, amplitude, shock)| {
            synthetic_series(ticker, drift, amplitude, shock)
        })
        .collect::<Result<Vec<_>>>()?;
    let table = PriceTable::from_series(&series)?;

    let report = run_batch(&MovingAverageBreach::default(), &table)?;
    let board = SignalBoard::from_rows(report.all_rows());

    println!("Signal board");
    println!("============");
    match board.date {
        Some(date) => println!("As of {date}: {} signals", board.len()),
        None => println!("No data"),
    }
    for row in board.iter() {
        println!(
            "  {:<8} {:>10.2} {:>4} {}",
            row.ticker,
            row.price,
            row.total_breach,
            row.signal_label()
        );
    }

    println!();
    println!("CYCLER markers");
    println!("==============");
    for marker in markers(report.rows("CYCLER")?, DEFAULT_TOLERANCE) {
        println!(
            "  {} {:>10.2} {:>4} {}",
            marker.date,
            marker.price,
            marker.total_breach,
            marker.kind.label()
        );
    }

    println!();
    println!("Technical scorecard");
    println!("===================");
    let scorecard = TechnicalScorecard::default();
    let tolerance = scorecard.config().tolerance;
    for s in &series {
        let rows = scorecard.evaluate(s)?;
        if let Some(summary) = summarize(&rows, tolerance) {
            let last = summary.last_signal.map_or_else(
                || "none".to_string(),
                |l| format!("{} on {}", l.direction, l.date),
            );
            println!(
                "  {:<8} {:>10.2}  big moves: {:>3}  last: {}",
                summary.ticker, summary.last_price, summary.big_moves, last
            );
        }
    }

    Ok(())
}
