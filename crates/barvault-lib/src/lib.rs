//! Market data path resolution and SQL persistence toolkit.
//!
//! This is a facade crate that re-exports functionality from the barvault
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use barvault_lib::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = PathResolver::from_env()?;
//!     let spec = SymbolSpec::new(
//!         "ESZ21",
//!         AssetClass::Futures,
//!         ContractType::Expiry,
//!         "GLOBEX",
//!         "USD",
//!         Frequency::Minutely,
//!         Extension::Csv,
//!     )?;
//!     println!("{}", resolver.generate_file_path(&spec)?);
//!
//!     let writer = SqlWriter::open(&WriterConfig::from_env())?;
//!     let symbol = writer.ensure_symbol_exists(spec.symbol(), spec.asset_class())?;
//!     let exchange = writer.ensure_exchange_exists(spec.exchange())?;
//!     let trade_symbol = writer.ensure_trade_symbol_exists(symbol, exchange)?;
//!     println!("trade symbol {trade_symbol}");
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barvault/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use barvault_types::*;

// Re-export path resolution
#[cfg(feature = "paths")]
pub use barvault_paths::{PathError, PathResolver, ResolverConfig, layout};

// Re-export SQL persistence
#[cfg(feature = "sql")]
pub use barvault_sql::{FactRow, SqlWriter, Table, WriteError, WriterConfig, init_schema};

/// Prelude module for convenient imports.
///
/// ```
/// use barvault_lib::prelude::*;
/// ```
pub mod prelude {
    pub use barvault_types::{
        AssetClass, ContractType, DailyBar, ExchangeId, Extension, Frequency, MinuteBar,
        SymbolId, SymbolSpec, TickRow, TradeSymbolId,
    };

    #[cfg(feature = "paths")]
    pub use barvault_paths::{PathError, PathResolver, ResolverConfig};

    #[cfg(feature = "sql")]
    pub use barvault_sql::{SqlWriter, Table, WriteError, WriterConfig};
}
