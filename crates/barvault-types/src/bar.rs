//! Fact rows: time-stamped observations persisted against a trade symbol.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{TradeSymbolId, ValidationError};

/// One daily OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Trade symbol the bar belongs to.
    pub trade_symbol_id: TradeSymbolId,
    /// Trading day.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: i64,
}

impl DailyBar {
    /// Creates a new daily bar.
    #[must_use]
    pub const fn new(
        trade_symbol_id: TradeSymbolId,
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: i64,
    ) -> Self {
        Self {
            trade_symbol_id,
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Checks that the bar can be stored.
    ///
    /// # Errors
    ///
    /// Returns an error if a price is not finite or `high < low`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_ohlc(self.open, self.high, self.low, self.close)
    }
}

/// One minute OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinuteBar {
    /// Trade symbol the bar belongs to.
    pub trade_symbol_id: TradeSymbolId,
    /// Bar open time (UTC).
    pub datetime: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: i64,
}

impl MinuteBar {
    /// Creates a new minute bar.
    #[must_use]
    pub const fn new(
        trade_symbol_id: TradeSymbolId,
        datetime: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: i64,
    ) -> Self {
        Self {
            trade_symbol_id,
            datetime,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Checks that the bar can be stored.
    ///
    /// # Errors
    ///
    /// Returns an error if a price is not finite or `high < low`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_ohlc(self.open, self.high, self.low, self.close)
    }
}

/// A single trade print.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickRow {
    /// Trade symbol the tick belongs to.
    pub trade_symbol_id: TradeSymbolId,
    /// Trade time (UTC).
    pub datetime: DateTime<Utc>,
    /// Trade price.
    pub price: f64,
    /// Trade size.
    pub size: i64,
}

impl TickRow {
    /// Creates a new tick.
    #[must_use]
    pub const fn new(
        trade_symbol_id: TradeSymbolId,
        datetime: DateTime<Utc>,
        price: f64,
        size: i64,
    ) -> Self {
        Self {
            trade_symbol_id,
            datetime,
            price,
            size,
        }
    }

    /// Checks that the tick can be stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the price is not finite.
    pub fn validate(&self) -> Result<(), ValidationError> {
        finite("price", self.price)
    }
}

fn validate_ohlc(open: f64, high: f64, low: f64, close: f64) -> Result<(), ValidationError> {
    finite("open", open)?;
    finite("high", high)?;
    finite("low", low)?;
    finite("close", close)?;
    if high < low {
        return Err(ValidationError::HighBelowLow { high, low });
    }
    Ok(())
}

fn finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field, value })
    }
}
