//! Batch runs and reporting for bandwatch.
//!
//! This crate turns single-ticker models into table-wide reports:
//! - Batch runner evaluating every ticker of a price table with per-ticker
//!   failure isolation
//! - Signal board of the most recent day's BUY and SELL rows
//! - Result tables as polars `DataFrame`s and CSV files
//!
//! # Example
//!
//! ```
//! use bandwatch_report::{SignalBoard, run_batch};
//! use bandwatch_signals::breach::MovingAverageBreach;
//! use bandwatch_traits::PriceTable;
//!
//! let csv = "Date,AAPL,MSFT\n2024-01-01,10,50\n2024-01-02,11,50\n";
//! let table = PriceTable::from_csv_bytes(csv.as_bytes().to_vec()).unwrap();
//!
//! // a 10% jump puts AAPL 4.76% over MA5/10/15/20
//! let report = run_batch(&MovingAverageBreach::default(), &table).unwrap();
//! let board = SignalBoard::from_rows(report.all_rows());
//! assert_eq!(board.sells.len(), 1);
//! assert_eq!(board.sells[0].ticker, "AAPL");
//! assert!(board.buys.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod batch;
pub mod board;
pub mod export;

// Re-export main types
pub use batch::{BatchReport, TickerFailure, run_batch};
pub use board::SignalBoard;
pub use export::{export_frame, results_frame, signals_frame, write_csv, write_signals_csv};
