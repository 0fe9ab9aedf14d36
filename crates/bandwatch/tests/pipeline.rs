//! End-to-end run from a price CSV to the signal board and CSV export.

use bandwatch::prelude::*;
use bandwatch::report::write_csv;
use bandwatch::signals::markers::{MarkerKind, markers};
use chrono::{Duration, NaiveDate};

const DAYS: usize = 30;

fn price_csv() -> String {
    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let mut csv = String::from("Date,AAPL,MSFT,BAD\n");
    for i in 0..DAYS {
        let date = start + Duration::days(i as i64);
        let last = i == DAYS - 1;
        let aapl = if last { 80.0 } else { 100.0 };
        let msft = if last { 130.0 } else { 100.0 };
        let bad = if i == 3 { -1.0 } else { 10.0 };
        csv.push_str(&format!("{date},{aapl},{msft},{bad}\n"));
    }
    csv
}

fn report() -> BatchReport<TickerSignalRow> {
    let table = PriceTable::from_csv_bytes(price_csv().into_bytes()).unwrap();
    run_batch(&MovingAverageBreach::default(), &table).unwrap()
}

#[test]
fn test_board_from_price_table() {
    let report = report();

    assert_eq!(report.len(), 2);
    assert_eq!(report.failures().len(), 1);
    assert_eq!(report.failures()[0].ticker, "BAD");

    let board = SignalBoard::from_rows(report.all_rows());
    assert_eq!(board.buys.len(), 1);
    assert_eq!(board.buys[0].ticker, "AAPL");
    assert_eq!(board.buys[0].total_breach, -5);
    assert_eq!(board.sells.len(), 1);
    assert_eq!(board.sells[0].ticker, "MSFT");
    assert_eq!(board.sells[0].signal, Some(Signal::Sell));
}

#[test]
fn test_quiet_days_have_no_signal() {
    let report = report();
    let rows = report.rows("AAPL").unwrap();

    assert_eq!(rows.len(), DAYS);
    assert!(rows[..DAYS - 1].iter().all(|r| r.signal.is_none()));
    assert!(rows.iter().all(|r| r.total_breach.abs() <= 5));
}

#[test]
fn test_markers_for_one_ticker() {
    let report = report();
    let drawn = markers(report.rows("MSFT").unwrap(), 4);

    assert_eq!(drawn.len(), 1);
    assert_eq!(drawn[0].kind, MarkerKind::Start(Signal::Sell));
    assert_eq!(drawn[0].price, 130.0);
}

#[test]
fn test_export_includes_every_ticker_day() {
    let report = report();
    let rows: Vec<TickerSignalRow> = report.all_rows().cloned().collect();

    let mut buf = Vec::new();
    write_csv(&rows, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();

    assert_eq!(
        lines.next(),
        Some(
            "Date,Ticker,Price,MA5_Breach,MA10_Breach,MA15_Breach,MA20_Breach,MA100_Breach,\
             Total_Breach,Signal"
        )
    );
    assert_eq!(lines.count(), 2 * DAYS);
}

#[test]
fn test_unknown_ticker() {
    assert!(matches!(
        report().rows("NVDA"),
        Err(BandwatchError::MissingTicker(_))
    ));
}
