//! Markers command implementation.

use crate::cmd::{header, section};
use crate::config::AppConfig;
use crate::data;
use anyhow::Result;
use bandwatch_signals::breach::compute_breaches;
use bandwatch_signals::markers::{MarkerKind, markers, tail};
use std::path::Path;

/// Show the chart markers of one ticker.
pub(crate) fn show_markers(
    config: &AppConfig,
    prices: &Path,
    ticker: &str,
    tolerance: Option<u32>,
    points: Option<usize>,
) -> Result<()> {
    header("Breach Markers");

    let tolerance = tolerance.unwrap_or(config.markers.tolerance);
    let points = points.unwrap_or(config.markers.points);

    println!("Ticker:     {ticker}");
    println!("Tolerance:  {tolerance}");
    println!("Points:     {points}");
    println!();

    let series = data::load_series(prices, ticker)?;
    let rows = compute_breaches(&series, &config.breach)?;
    let visible = tail(&rows, points);
    let drawn = markers(visible, tolerance);

    if let (Some(first), Some(last)) = (visible.first(), visible.last()) {
        section(&format!("MARKERS ({} to {})", first.date, last.date));
    }
    if drawn.is_empty() {
        println!("No markers in the last {} rows.\n", visible.len());
        return Ok(());
    }

    println!(
        "{:<12} {:>12} {:>8} {:>6} {:>14}",
        "Date", "Price", "Breach", "Side", "Marker"
    );
    println!("{}", "─".repeat(56));
    for annotation in &drawn {
        let side = annotation.kind.side().map_or("", |s| s.as_str());
        println!(
            "{:<12} {:>12.2} {:>8} {:>6} {:>14}",
            annotation.date.to_string(),
            annotation.price,
            annotation.total_breach,
            side,
            annotation.kind.label()
        );
    }
    println!();

    let starts = drawn
        .iter()
        .filter(|a| matches!(a.kind, MarkerKind::Start(_)))
        .count();
    println!("{} markers, {} runs\n", drawn.len(), starts);

    Ok(())
}
