//! Symbol specification: the identity of a stored market data series.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::SpecError;

/// Asset class of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    /// Futures contracts.
    Futures,
    /// Exchange-traded funds.
    #[serde(rename = "ETFs")]
    Etfs,
    /// Foreign exchange pairs.
    Forex,
    /// S&P 500 constituents.
    #[serde(rename = "SP500")]
    Sp500,
    /// Individual stocks.
    Stocks,
}

impl AssetClass {
    /// Returns the canonical name, as stored in the `Symbol.asset_class` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Futures => "Futures",
            Self::Etfs => "ETFs",
            Self::Forex => "Forex",
            Self::Sp500 => "SP500",
            Self::Stocks => "Stocks",
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "futures" => Ok(Self::Futures),
            "etfs" | "etf" => Ok(Self::Etfs),
            "forex" | "fx" => Ok(Self::Forex),
            "sp500" => Ok(Self::Sp500),
            "stocks" | "stock" => Ok(Self::Stocks),
            _ => Err(SpecError::unknown(
                "asset class",
                s,
                &["futures", "etfs", "forex", "sp500", "stocks"],
            )),
        }
    }
}

/// How a futures series is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    /// A single dated contract (e.g. `ESZ21`).
    Expiry,
    /// A rolled continuous series.
    Continuous,
}

impl ContractType {
    /// Returns the contract type as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Expiry => "expiry",
            Self::Continuous => "continuous",
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContractType {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expiry" => Ok(Self::Expiry),
            "continuous" => Ok(Self::Continuous),
            _ => Err(SpecError::unknown(
                "contract type",
                s,
                &["expiry", "continuous"],
            )),
        }
    }
}

/// Sampling frequency of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// One bar per minute.
    Minutely,
    /// One bar per trading day.
    Daily,
    /// Every trade.
    Tick,
}

impl Frequency {
    /// Returns the frequency as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minutely => "minutely",
            Self::Daily => "daily",
            Self::Tick => "tick",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minutely" | "minute" | "m1" | "1m" => Ok(Self::Minutely),
            "daily" | "day" | "d1" | "1d" => Ok(Self::Daily),
            "tick" | "ticks" => Ok(Self::Tick),
            _ => Err(SpecError::unknown(
                "frequency",
                s,
                &["minutely", "daily", "tick"],
            )),
        }
    }
}

/// On-disk encoding of a stored file, before gzip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Extension {
    /// Comma separated values.
    #[default]
    #[serde(rename = "csv")]
    Csv,
    /// Apache Parquet.
    #[serde(rename = "pq")]
    Parquet,
}

impl Extension {
    /// Returns the file suffix used in storage paths.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "pq",
        }
    }
}

impl std::fmt::Display for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Extension {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "pq" | "parquet" => Ok(Self::Parquet),
            _ => Err(SpecError::unknown("extension", s, &["csv", "pq"])),
        }
    }
}

/// Everything needed to locate one stored market data file.
///
/// Built per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolSpec {
    symbol: String,
    asset_class: AssetClass,
    contract_type: ContractType,
    exchange: String,
    currency: String,
    frequency: Frequency,
    extension: Extension,
}

impl SymbolSpec {
    /// Creates a new symbol specification.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Empty`] if the symbol, exchange or currency is blank.
    pub fn new(
        symbol: impl Into<String>,
        asset_class: AssetClass,
        contract_type: ContractType,
        exchange: impl Into<String>,
        currency: impl Into<String>,
        frequency: Frequency,
        extension: Extension,
    ) -> Result<Self, SpecError> {
        let symbol = non_empty("symbol", symbol.into())?;
        let exchange = non_empty("exchange", exchange.into())?;
        let currency = non_empty("currency", currency.into())?;
        Ok(Self {
            symbol,
            asset_class,
            contract_type,
            exchange,
            currency,
            frequency,
            extension,
        })
    }

    /// Returns the instrument symbol (e.g. "ESZ21").
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the asset class.
    #[must_use]
    pub const fn asset_class(&self) -> AssetClass {
        self.asset_class
    }

    /// Returns the contract type.
    #[must_use]
    pub const fn contract_type(&self) -> ContractType {
        self.contract_type
    }

    /// Returns the exchange code (e.g. "GLOBEX").
    #[must_use]
    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    /// Returns the quote currency (e.g. "USD").
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Returns the sampling frequency.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the file extension.
    #[must_use]
    pub const fn extension(&self) -> Extension {
        self.extension
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String, SpecError> {
    if value.trim().is_empty() {
        Err(SpecError::Empty { field })
    } else {
        Ok(value)
    }
}
