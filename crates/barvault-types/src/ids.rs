//! Surrogate keys of the dimension tables.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Primary key of a row in the `Symbol` table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SymbolId(pub i64);

/// Primary key of a row in the `Exchange` table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExchangeId(pub i64);

/// Primary key of a row in the `TradeSymbol` table.
///
/// Every fact row references one of these.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TradeSymbolId(pub i64);
