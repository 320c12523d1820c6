//! Database schema.

use rusqlite::Connection;

/// Tables the writer reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Instruments, unique per (code, asset class).
    Symbol,
    /// Venues, unique per name.
    Exchange,
    /// Instrument/venue pairs that fact rows reference.
    TradeSymbol,
    /// Daily OHLCV bars.
    DailyData,
    /// Minute OHLCV bars.
    MinuteData,
    /// Trade prints.
    TickData,
}

impl Table {
    /// Returns the SQL table name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Symbol => "Symbol",
            Self::Exchange => "Exchange",
            Self::TradeSymbol => "TradeSymbol",
            Self::DailyData => "DailyData",
            Self::MinuteData => "MinuteData",
            Self::TickData => "TickData",
        }
    }

    /// Returns all tables in dependency order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Symbol,
            Self::Exchange,
            Self::TradeSymbol,
            Self::DailyData,
            Self::MinuteData,
            Self::TickData,
        ]
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS Symbol (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL,
    asset_class TEXT NOT NULL,
    start_date TEXT DEFAULT CURRENT_DATE,
    UNIQUE (code, asset_class)
);

CREATE TABLE IF NOT EXISTS Exchange (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS TradeSymbol (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    exchange_id INTEGER NOT NULL REFERENCES Exchange (id),
    symbol_id INTEGER NOT NULL REFERENCES Symbol (id),
    UNIQUE (exchange_id, symbol_id)
);

CREATE TABLE IF NOT EXISTS DailyData (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    trade_symbol_id INTEGER NOT NULL REFERENCES TradeSymbol (id),
    date TEXT NOT NULL,
    open REAL NOT NULL,
    high REAL NOT NULL,
    low REAL NOT NULL,
    close REAL NOT NULL,
    volume INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_daily_lookup ON DailyData (trade_symbol_id, date);

CREATE TABLE IF NOT EXISTS MinuteData (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    trade_symbol_id INTEGER NOT NULL REFERENCES TradeSymbol (id),
    datetime TEXT NOT NULL,
    open REAL NOT NULL,
    high REAL NOT NULL,
    low REAL NOT NULL,
    close REAL NOT NULL,
    volume INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_minute_lookup ON MinuteData (trade_symbol_id, datetime);

CREATE TABLE IF NOT EXISTS TickData (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    trade_symbol_id INTEGER NOT NULL REFERENCES TradeSymbol (id),
    datetime TEXT NOT NULL,
    price REAL NOT NULL,
    size INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tick_lookup ON TickData (trade_symbol_id, datetime);
";

/// Creates any missing table or index.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}
