//! bandwatch CLI binary.
//!
//! Provides a command-line interface for the bandwatch signal models.

mod cmd;
mod config;
mod data;
mod logging;

use anyhow::Result;
use bandwatch_traits::{Date, parse_date};
use clap::{Parser, Subcommand};
use config::AppConfig;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "bandwatch")]
#[command(about = "Moving-average breach signals for equity prices", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true, env = "BANDWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Show debug logs and detailed listings
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan every ticker of a price table for breach signals
    Scan {
        /// Price CSV (wide or long layout)
        #[arg(short, long)]
        prices: PathBuf,

        /// Write the result table to this CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the rows carrying a signal to this CSV
        #[arg(long)]
        signals_output: Option<PathBuf>,

        /// Net breach count that raises a signal
        #[arg(long)]
        breach_limit: Option<u32>,
    },

    /// Show chart markers for one ticker
    Markers {
        /// Price CSV (wide or long layout)
        #[arg(short, long)]
        prices: PathBuf,

        /// Ticker symbol
        #[arg(short, long)]
        ticker: String,

        /// Net breach magnitude that gets a marker
        #[arg(long)]
        tolerance: Option<u32>,

        /// Number of trailing rows to consider
        #[arg(long)]
        points: Option<usize>,
    },

    /// Show the technical scorecard for one ticker
    Technical {
        /// Price CSV (wide or long layout)
        #[arg(short, long)]
        prices: PathBuf,

        /// Ticker symbol
        #[arg(short, long)]
        ticker: String,

        /// Votes on one side that make a big move (0-6)
        #[arg(long)]
        tolerance: Option<u32>,

        /// First date of the big move table (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start: Option<Date>,

        /// Last date of the big move table (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        end: Option<Date>,
    },

    /// Show a UK CPI inflation table
    Inflation {
        /// ONS CPI CSV export
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List available models
    Models,
}

fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan {
            prices,
            output,
            signals_output,
            breach_limit,
        } => {
            cmd::scan::run_scan(
                &config,
                &prices,
                output.as_deref(),
                signals_output.as_deref(),
                breach_limit,
            )?;
        }
        Commands::Markers {
            prices,
            ticker,
            tolerance,
            points,
        } => {
            cmd::markers::show_markers(&config, &prices, &ticker, tolerance, points)?;
        }
        Commands::Technical {
            prices,
            ticker,
            tolerance,
            start,
            end,
        } => {
            cmd::technical::show_technical(&config, &prices, &ticker, tolerance, start, end)?;
        }
        Commands::Inflation { input } => {
            cmd::inflation::show_inflation(&input)?;
        }
        Commands::Models => {
            cmd::models::list_models(cli.verbose);
        }
    }

    Ok(())
}
