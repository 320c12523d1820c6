//! Binding of fact row types to their tables.

use barvault_types::{DailyBar, MinuteBar, TickRow, TradeSymbolId, ValidationError};
use rusqlite::{Statement, params};

use crate::Table;

/// A row type that is stored in one fact table.
pub trait FactRow {
    /// Destination table.
    const TABLE: Table;

    /// Parameterized insert statement for one row.
    const INSERT: &'static str;

    /// Returns the referenced trade symbol.
    fn trade_symbol_id(&self) -> TradeSymbolId;

    /// Checks the row's numeric fields.
    ///
    /// # Errors
    ///
    /// Returns the first failed rule.
    fn check(&self) -> Result<(), ValidationError>;

    /// Executes `stmt` (prepared from [`Self::INSERT`]) with this row's values.
    ///
    /// # Errors
    ///
    /// Returns an error if the database rejects the row.
    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize>;
}

impl FactRow for DailyBar {
    const TABLE: Table = Table::DailyData;
    const INSERT: &'static str = "INSERT INTO DailyData
        (trade_symbol_id, date, open, high, low, close, volume)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

    fn trade_symbol_id(&self) -> TradeSymbolId {
        self.trade_symbol_id
    }

    fn check(&self) -> Result<(), ValidationError> {
        self.validate()
    }

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            i64::from(self.trade_symbol_id),
            self.date,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        ])
    }
}

impl FactRow for MinuteBar {
    const TABLE: Table = Table::MinuteData;
    const INSERT: &'static str = "INSERT INTO MinuteData
        (trade_symbol_id, datetime, open, high, low, close, volume)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

    fn trade_symbol_id(&self) -> TradeSymbolId {
        self.trade_symbol_id
    }

    fn check(&self) -> Result<(), ValidationError> {
        self.validate()
    }

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            i64::from(self.trade_symbol_id),
            self.datetime,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        ])
    }
}

impl FactRow for TickRow {
    const TABLE: Table = Table::TickData;
    const INSERT: &'static str = "INSERT INTO TickData
        (trade_symbol_id, datetime, price, size)
        VALUES (?1, ?2, ?3, ?4)";

    fn trade_symbol_id(&self) -> TradeSymbolId {
        self.trade_symbol_id
    }

    fn check(&self) -> Result<(), ValidationError> {
        self.validate()
    }

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            i64::from(self.trade_symbol_id),
            self.datetime,
            self.price,
            self.size,
        ])
    }
}
