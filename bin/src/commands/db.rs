//! Database maintenance commands.

use crate::display::writer_config;
use anyhow::{Context, Result};
use barvault_lib::prelude::*;
use std::path::Path;
use tracing::info;

/// Create every table and report their row counts.
pub(crate) fn init_db(db: Option<&Path>) -> Result<()> {
    let config = writer_config(db);
    let writer = SqlWriter::open(&config)
        .with_context(|| format!("Failed to open database {}", config.path))?;
    info!(path = %config.path, "schema ready");

    println!("{:<15} {:>10}", "TABLE", "ROWS");
    println!("{}", "-".repeat(26));
    for table in Table::all() {
        println!("{:<15} {:>10}", table.as_str(), writer.count_rows(*table)?);
    }

    writer.close()?;
    Ok(())
}

/// Ensure the dimension rows of a trade symbol exist and print their ids.
pub(crate) fn ensure(
    db: Option<&Path>,
    symbol: &str,
    asset_class: AssetClass,
    exchange: &str,
) -> Result<()> {
    let config = writer_config(db);
    let writer = SqlWriter::open(&config)
        .with_context(|| format!("Failed to open database {}", config.path))?;

    let symbol_id = writer.ensure_symbol_exists(symbol, asset_class)?;
    let exchange_id = writer.ensure_exchange_exists(exchange)?;
    let trade_symbol_id = writer.ensure_trade_symbol_exists(symbol_id, exchange_id)?;

    println!("Symbol:       {symbol_id}");
    println!("Exchange:     {exchange_id}");
    println!("Trade symbol: {trade_symbol_id}");

    writer.close()?;
    Ok(())
}
