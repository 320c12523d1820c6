//! Load command implementation.
//!
//! Reads bar or tick files as stored in the bucket (CSV, optionally gzipped),
//! attaches the trade symbol resolved from the command line, and inserts the
//! whole file as one atomic batch.

use crate::display::{TableArg, open_input, writer_config};
use anyhow::{Context, Result};
use barvault_lib::prelude::*;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct DailyRecord {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: i64,
}

#[derive(Debug, Deserialize)]
struct MinuteRecord {
    datetime: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: i64,
}

#[derive(Debug, Deserialize)]
struct TickRecord {
    datetime: DateTime<Utc>,
    price: f64,
    size: i64,
}

/// Load one file into the chosen fact table.
pub(crate) fn load(
    db: Option<&Path>,
    table: TableArg,
    symbol: &str,
    asset_class: AssetClass,
    exchange: &str,
    file: &Path,
) -> Result<()> {
    let config = writer_config(db);
    let mut writer = SqlWriter::open(&config)
        .with_context(|| format!("Failed to open database {}", config.path))?;

    let symbol_id = writer.ensure_symbol_exists(symbol, asset_class)?;
    let exchange_id = writer.ensure_exchange_exists(exchange)?;
    let id = writer.ensure_trade_symbol_exists(symbol_id, exchange_id)?;

    let input = open_input(file)?;
    let written = match table {
        TableArg::Daily => {
            let bars: Vec<DailyBar> = read_records::<DailyRecord>(input)?
                .into_iter()
                .map(|r| DailyBar::new(id, r.date, r.open, r.high, r.low, r.close, r.volume))
                .collect();
            writer.insert_bulk_daily_data(&bars)?
        }
        TableArg::Minute => {
            let bars: Vec<MinuteBar> = read_records::<MinuteRecord>(input)?
                .into_iter()
                .map(|r| {
                    MinuteBar::new(id, r.datetime, r.open, r.high, r.low, r.close, r.volume)
                })
                .collect();
            writer.insert_bulk_minute_data(&bars)?
        }
        TableArg::Tick => {
            let ticks: Vec<TickRow> = read_records::<TickRecord>(input)?
                .into_iter()
                .map(|r| TickRow::new(id, r.datetime, r.price, r.size))
                .collect();
            writer.insert_bulk_tick_data(&ticks)?
        }
    };

    info!(file = %file.display(), table = %table.table(), rows = written, "loaded");
    println!("Loaded {written} rows into {} (trade symbol {id})", table.table());

    writer.close()?;
    Ok(())
}

/// Parse every CSV record, reporting the first bad line.
fn read_records<T: DeserializeOwned>(input: impl Read) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_reader(input);
    reader
        .deserialize()
        .enumerate()
        // Line 1 is the header.
        .map(|(i, record)| record.with_context(|| format!("Invalid record on line {}", i + 2)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_daily_records() {
        let data = "date,open,high,low,close,volume\n\
                    2021-01-01,10.0,15,9,12.5,1000\n\
                    2021-01-02,12.5,13,11,11.5,800\n";
        let records: Vec<DailyRecord> = read_records(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2021, 1, 2).unwrap());
        assert_eq!(records[1].volume, 800);
    }

    #[test]
    fn test_read_records_reports_line() {
        let data = "datetime,price,size\n\
                    2021-02-10T13:50:00Z,10.0,15\n\
                    not-a-time,10.0,15\n";
        let err = read_records::<TickRecord>(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_load_daily_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("bars.db");
        let file = dir.path().join("CLH21.csv");
        std::fs::write(
            &file,
            "date,open,high,low,close,volume\n\
             2021-01-04,48.4,49.1,47.2,47.6,1200\n\
             2021-01-05,47.6,50.2,47.5,49.9,1500\n",
        )
        .unwrap();

        load(
            Some(db.as_path()),
            TableArg::Daily,
            "CLH21",
            AssetClass::Futures,
            "ECBOT",
            &file,
        )
        .unwrap();

        let writer = SqlWriter::open(&WriterConfig::from_path(&db)).unwrap();
        assert_eq!(writer.count_rows(Table::DailyData).unwrap(), 2);
        assert_eq!(writer.count_rows(Table::TradeSymbol).unwrap(), 1);
    }
}
