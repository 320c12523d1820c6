//! Core types for the barvault market data storage toolkit.
//!
//! This crate provides the fundamental data structures used throughout barvault:
//!
//! - [`SymbolSpec`] - The identity of a stored market data file
//! - [`AssetClass`], [`ContractType`], [`Frequency`], [`Extension`] - Its enum parts
//! - [`SymbolId`], [`ExchangeId`], [`TradeSymbolId`] - Dimension row surrogate keys
//! - [`DailyBar`], [`MinuteBar`], [`TickRow`] - Fact rows persisted per trade symbol

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barvault/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod error;
mod ids;
mod symbol;

pub use bar::{DailyBar, MinuteBar, TickRow};
pub use error::{SpecError, ValidationError};
pub use ids::{ExchangeId, SymbolId, TradeSymbolId};
pub use symbol::{AssetClass, ContractType, Extension, Frequency, SymbolSpec};
