//! Writer for dimension and fact rows.

use std::collections::BTreeSet;

use barvault_types::{
    AssetClass, DailyBar, ExchangeId, MinuteBar, SymbolId, TickRow, TradeSymbolId,
};
use rusqlite::{Connection, Transaction, ffi, params};
use tracing::{debug, info, warn};

use crate::{FactRow, Result, Table, WriteError, WriterConfig, init_schema};

const UPSERT_SYMBOL: &str = "INSERT INTO Symbol (code, asset_class) VALUES (?1, ?2)
    ON CONFLICT (code, asset_class) DO UPDATE SET code = excluded.code
    RETURNING id";

const UPSERT_EXCHANGE: &str = "INSERT INTO Exchange (name) VALUES (?1)
    ON CONFLICT (name) DO UPDATE SET name = excluded.name
    RETURNING id";

const UPSERT_TRADE_SYMBOL: &str = "INSERT INTO TradeSymbol (exchange_id, symbol_id) VALUES (?1, ?2)
    ON CONFLICT (exchange_id, symbol_id) DO UPDATE SET symbol_id = excluded.symbol_id
    RETURNING id";

/// Persists market data into the six barvault tables.
///
/// Holds one connection for its whole lifetime. Not meant to be shared
/// across threads; run one writer per thread instead.
#[derive(Debug)]
pub struct SqlWriter {
    conn: Connection,
}

impl SqlWriter {
    /// Opens the database described by `config` with foreign keys enforced.
    /// Missing tables are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created.
    pub fn open(config: &WriterConfig) -> Result<Self> {
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(&config.path)?
        };
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        init_schema(&conn)?;

        debug!(path = %config.path, "opened database");
        Ok(Self { conn })
    }

    /// Opens a fresh in-memory database with the schema in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&WriterConfig::default())
    }

    /// Returns the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite refuses to close (e.g. unfinalized statements).
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| WriteError::Connection(e))
    }

    /// Returns the id of the symbol, inserting it first if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn ensure_symbol_exists(&self, symbol: &str, asset_class: AssetClass) -> Result<SymbolId> {
        let id: i64 = self.conn.query_row(
            UPSERT_SYMBOL,
            params![symbol, asset_class.as_str()],
            |row| row.get(0),
        )?;
        debug!(symbol, %asset_class, id, "ensured symbol");
        Ok(SymbolId(id))
    }

    /// Returns the id of the exchange, inserting it first if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn ensure_exchange_exists(&self, exchange: &str) -> Result<ExchangeId> {
        let id: i64 = self
            .conn
            .query_row(UPSERT_EXCHANGE, params![exchange], |row| row.get(0))?;
        debug!(exchange, id, "ensured exchange");
        Ok(ExchangeId(id))
    }

    /// Returns the id linking a symbol to an exchange, inserting it first if absent.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::ForeignKey`] if either dimension row is missing.
    pub fn ensure_trade_symbol_exists(
        &self,
        symbol_id: SymbolId,
        exchange_id: ExchangeId,
    ) -> Result<TradeSymbolId> {
        require(&self.conn, Table::Symbol, symbol_id.into())?;
        require(&self.conn, Table::Exchange, exchange_id.into())?;

        let id: i64 = self.conn.query_row(
            UPSERT_TRADE_SYMBOL,
            params![i64::from(exchange_id), i64::from(symbol_id)],
            |row| row.get(0),
        )?;
        debug!(%symbol_id, %exchange_id, id, "ensured trade symbol");
        Ok(TradeSymbolId(id))
    }

    /// Inserts one daily bar.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Validation`] for malformed prices and
    /// [`WriteError::ForeignKey`] for an unknown trade symbol.
    pub fn insert_daily_data(&self, bar: &DailyBar) -> Result<()> {
        self.insert_one(bar)
    }

    /// Inserts one minute bar.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Validation`] for malformed prices and
    /// [`WriteError::ForeignKey`] for an unknown trade symbol.
    pub fn insert_minute_data(&self, bar: &MinuteBar) -> Result<()> {
        self.insert_one(bar)
    }

    /// Inserts one tick.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Validation`] for a malformed price and
    /// [`WriteError::ForeignKey`] for an unknown trade symbol.
    pub fn insert_tick_data(&self, tick: &TickRow) -> Result<()> {
        self.insert_one(tick)
    }

    /// Inserts daily bars atomically, returning the number written.
    ///
    /// # Errors
    ///
    /// Fails without writing anything if any row is invalid or references
    /// an unknown trade symbol.
    pub fn insert_bulk_daily_data(&mut self, bars: &[DailyBar]) -> Result<usize> {
        self.insert_bulk(bars)
    }

    /// Inserts minute bars atomically, returning the number written.
    ///
    /// # Errors
    ///
    /// Fails without writing anything if any row is invalid or references
    /// an unknown trade symbol.
    pub fn insert_bulk_minute_data(&mut self, bars: &[MinuteBar]) -> Result<usize> {
        self.insert_bulk(bars)
    }

    /// Inserts ticks atomically, returning the number written.
    ///
    /// # Errors
    ///
    /// Fails without writing anything if any row is invalid or references
    /// an unknown trade symbol.
    pub fn insert_bulk_tick_data(&mut self, ticks: &[TickRow]) -> Result<usize> {
        self.insert_bulk(ticks)
    }

    /// Returns the number of rows in `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_rows(&self, table: Table) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }

    fn insert_one<R: FactRow>(&self, row: &R) -> Result<()> {
        row.check()
            .map_err(|source| WriteError::Validation { index: 0, source })?;
        require(&self.conn, Table::TradeSymbol, row.trade_symbol_id().into())?;

        let mut stmt = self.conn.prepare_cached(R::INSERT)?;
        row.execute(&mut stmt)
            .map_err(|e| foreign_key_or(e, row.trade_symbol_id()))?;
        Ok(())
    }

    fn insert_bulk<R: FactRow>(&mut self, rows: &[R]) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }
        prevalidate(&self.conn, rows)?;

        let tx = self.conn.transaction()?;
        match insert_rows(&tx, rows) {
            Ok(count) => {
                tx.commit()?;
                info!(table = %R::TABLE, rows = count, "committed batch");
                Ok(count)
            }
            Err(err) => {
                warn!(table = %R::TABLE, error = %err, "rolling back batch");
                if let Err(rollback) = tx.rollback() {
                    warn!(error = %rollback, "rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// Checks every row before a batch touches the database.
fn prevalidate<R: FactRow>(conn: &Connection, rows: &[R]) -> Result<()> {
    for (index, row) in rows.iter().enumerate() {
        row.check()
            .map_err(|source| WriteError::Validation { index, source })?;
    }

    let ids: BTreeSet<TradeSymbolId> = rows.iter().map(R::trade_symbol_id).collect();
    for id in ids {
        require(conn, Table::TradeSymbol, id.into())?;
    }
    Ok(())
}

fn insert_rows<R: FactRow>(tx: &Transaction<'_>, rows: &[R]) -> Result<usize> {
    let mut stmt = tx.prepare_cached(R::INSERT)?;
    for row in rows {
        row.execute(&mut stmt)
            .map_err(|e| foreign_key_or(e, row.trade_symbol_id()))?;
    }
    Ok(rows.len())
}

fn require(conn: &Connection, table: Table, id: i64) -> Result<()> {
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = ?1)");
    let exists: bool = conn.query_row(&sql, params![id], |row| row.get(0))?;
    if exists {
        Ok(())
    } else {
        Err(WriteError::ForeignKey { table, id })
    }
}

fn foreign_key_or(err: rusqlite::Error, id: TradeSymbolId) -> WriteError {
    match err {
        rusqlite::Error::SqliteFailure(ref e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            WriteError::ForeignKey {
                table: Table::TradeSymbol,
                id: id.into(),
            }
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn writer_with_trade_symbol() -> (SqlWriter, TradeSymbolId) {
        let writer = SqlWriter::open_in_memory().unwrap();
        let symbol = writer
            .ensure_symbol_exists("ZS1M", AssetClass::Futures)
            .unwrap();
        let exchange = writer.ensure_exchange_exists("CME").unwrap();
        let trade_symbol = writer.ensure_trade_symbol_exists(symbol, exchange).unwrap();
        (writer, trade_symbol)
    }

    #[test]
    fn test_ensure_symbol_is_idempotent() {
        let writer = SqlWriter::open_in_memory().unwrap();
        let first = writer
            .ensure_symbol_exists("ESZ21", AssetClass::Futures)
            .unwrap();
        let second = writer
            .ensure_symbol_exists("ESZ21", AssetClass::Futures)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(writer.count_rows(Table::Symbol).unwrap(), 1);
    }

    #[test]
    fn test_same_code_different_asset_class() {
        let writer = SqlWriter::open_in_memory().unwrap();
        let futures = writer.ensure_symbol_exists("SPY", AssetClass::Futures).unwrap();
        let etf = writer.ensure_symbol_exists("SPY", AssetClass::Etfs).unwrap();

        assert_ne!(futures, etf);
        assert_eq!(writer.count_rows(Table::Symbol).unwrap(), 2);
    }

    #[test]
    fn test_ensure_exchange_is_idempotent() {
        let writer = SqlWriter::open_in_memory().unwrap();
        let first = writer.ensure_exchange_exists("GLOBEX").unwrap();
        let second = writer.ensure_exchange_exists("GLOBEX").unwrap();

        assert_eq!(first, second);
        assert_eq!(writer.count_rows(Table::Exchange).unwrap(), 1);
    }

    #[test]
    fn test_ensure_trade_symbol_is_idempotent() {
        let (writer, trade_symbol) = writer_with_trade_symbol();
        let symbol = writer.ensure_symbol_exists("ZS1M", AssetClass::Futures).unwrap();
        let exchange = writer.ensure_exchange_exists("CME").unwrap();

        let again = writer.ensure_trade_symbol_exists(symbol, exchange).unwrap();
        assert_eq!(again, trade_symbol);
        assert_eq!(writer.count_rows(Table::TradeSymbol).unwrap(), 1);
    }

    #[test]
    fn test_ensure_trade_symbol_missing_dimension() {
        let writer = SqlWriter::open_in_memory().unwrap();
        let exchange = writer.ensure_exchange_exists("CME").unwrap();

        let err = writer
            .ensure_trade_symbol_exists(SymbolId(99), exchange)
            .unwrap_err();
        assert!(matches!(
            err,
            WriteError::ForeignKey {
                table: Table::Symbol,
                id: 99
            }
        ));

        let symbol = writer.ensure_symbol_exists("ZS1M", AssetClass::Futures).unwrap();
        let err = writer
            .ensure_trade_symbol_exists(symbol, ExchangeId(77))
            .unwrap_err();
        assert!(matches!(
            err,
            WriteError::ForeignKey {
                table: Table::Exchange,
                id: 77
            }
        ));
        assert_eq!(writer.count_rows(Table::TradeSymbol).unwrap(), 0);
    }

    #[test]
    fn test_insert_single_rows() {
        let (writer, id) = writer_with_trade_symbol();
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let ts = Utc.with_ymd_and_hms(2021, 2, 10, 13, 50, 0).unwrap();

        writer
            .insert_daily_data(&DailyBar::new(id, date, 10.0, 15.0, 9.0, 12.5, 1000))
            .unwrap();
        writer
            .insert_minute_data(&MinuteBar::new(id, ts, 10.0, 15.0, 9.0, 12.5, 1000))
            .unwrap();
        writer
            .insert_tick_data(&TickRow::new(id, ts, 10.0, 15))
            .unwrap();

        assert_eq!(writer.count_rows(Table::DailyData).unwrap(), 1);
        assert_eq!(writer.count_rows(Table::MinuteData).unwrap(), 1);
        assert_eq!(writer.count_rows(Table::TickData).unwrap(), 1);

        let stored: (String, f64, i64) = writer
            .connection()
            .query_row("SELECT date, high, volume FROM DailyData", [], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .unwrap();
        assert_eq!(stored.0, "2021-01-01");
        assert!((stored.1 - 15.0).abs() < 1e-10);
        assert_eq!(stored.2, 1000);
    }

    #[test]
    fn test_insert_unknown_trade_symbol() {
        let (writer, _) = writer_with_trade_symbol();
        let ts = Utc.with_ymd_and_hms(2021, 2, 10, 13, 50, 0).unwrap();

        let err = writer
            .insert_tick_data(&TickRow::new(TradeSymbolId(404), ts, 10.0, 15))
            .unwrap_err();
        assert!(matches!(
            err,
            WriteError::ForeignKey {
                table: Table::TradeSymbol,
                id: 404
            }
        ));
        assert_eq!(writer.count_rows(Table::TickData).unwrap(), 0);
    }

    #[test]
    fn test_insert_invalid_bar() {
        let (writer, id) = writer_with_trade_symbol();
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();

        let err = writer
            .insert_daily_data(&DailyBar::new(id, date, 10.0, 8.0, 9.0, 12.5, 1000))
            .unwrap_err();
        assert!(matches!(err, WriteError::Validation { index: 0, .. }));
        assert_eq!(writer.count_rows(Table::DailyData).unwrap(), 0);
    }

    #[test]
    fn test_empty_bulk_insert() {
        let (mut writer, _) = writer_with_trade_symbol();
        assert_eq!(writer.insert_bulk_daily_data(&[]).unwrap(), 0);
    }

    #[test]
    fn test_close() {
        let (writer, _) = writer_with_trade_symbol();
        writer.close().unwrap();
    }
}
