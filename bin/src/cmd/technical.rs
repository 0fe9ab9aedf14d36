//! Technical command implementation.

use crate::cmd::{header, section};
use crate::config::AppConfig;
use crate::data;
use anyhow::Result;
use bandwatch_signals::scorecard::{TechnicalScorecard, date_range, summarize};
use bandwatch_traits::{Date, SeriesModel};
use std::path::Path;

/// Show the technical scorecard of one ticker.
pub(crate) fn show_technical(
    config: &AppConfig,
    prices: &Path,
    ticker: &str,
    tolerance: Option<u32>,
    start: Option<Date>,
    end: Option<Date>,
) -> Result<()> {
    header("Technical Analysis");

    let mut scorecard = config.scorecard.clone();
    if let Some(tolerance) = tolerance {
        scorecard.tolerance = tolerance;
    }
    let tolerance = scorecard.tolerance;
    let model = TechnicalScorecard::new(scorecard);
    model.validate()?;

    let series = data::load_series(prices, ticker)?;
    let rows = model.evaluate(&series)?;

    let Some(summary) = summarize(&rows, tolerance) else {
        println!("No prices for {ticker}.\n");
        return Ok(());
    };

    println!("Ticker:     {ticker}");
    println!(
        "Price:      {:.2} (as of {})",
        summary.last_price, summary.last_date
    );
    match summary.last_signal {
        Some(last) => println!(
            "Last:       {} @ {:.2} (as of {})",
            last.direction, last.price, last.date
        ),
        None => println!("Last:       no signal"),
    }
    println!("Average:    {:.2}", summary.average_price);
    println!("Tolerance:  {tolerance} of {} votes", model.config().max_votes());
    println!();

    let visible = date_range(&rows, start, end);
    let moves: Vec<_> = visible
        .iter()
        .filter(|r| r.is_big_move(tolerance))
        .collect();

    section(&format!("BIG MOVES ({} of {} days)", moves.len(), visible.len()));
    if moves.is_empty() {
        println!("None in range.\n");
        return Ok(());
    }

    println!(
        "{:<12} {:>12} {:>5} {:>5} {:>9} {:>6} {:>6} {:>6}",
        "Date", "Price", "Buy", "Sell", "Combined", "T-1", "T-2", "Side"
    );
    println!("{}", "─".repeat(68));
    for row in moves.iter().rev() {
        let side = row.direction(tolerance).map_or("", |s| s.as_str());
        let lag = |v: Option<i32>| v.map_or_else(String::new, |v| v.to_string());
        println!(
            "{:<12} {:>12.2} {:>5} {:>5} {:>9} {:>6} {:>6} {:>6}",
            row.date.to_string(),
            row.price,
            row.buy_votes,
            row.sell_votes,
            row.combined,
            lag(row.combined_prev),
            lag(row.combined_prev2),
            side
        );
    }
    println!();

    Ok(())
}
