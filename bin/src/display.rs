//! Argument types and shared setup for the barvault CLI.

use anyhow::{Context, Result};
use barvault_lib::prelude::*;
use clap::ValueEnum;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Fact table selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum TableArg {
    Daily,
    Minute,
    Tick,
}

impl TableArg {
    /// Returns the database table this argument writes to.
    pub(crate) const fn table(self) -> Table {
        match self {
            Self::Daily => Table::DailyData,
            Self::Minute => Table::MinuteData,
            Self::Tick => Table::TickData,
        }
    }
}

/// Builds the resolver configuration, preferring an explicit bucket.
pub(crate) fn resolver_config(bucket: Option<&str>) -> Result<ResolverConfig> {
    match bucket {
        Some(bucket) => Ok(ResolverConfig::new(bucket)),
        None => ResolverConfig::from_env().context("No bucket given"),
    }
}

/// Builds the writer configuration, preferring an explicit database path.
pub(crate) fn writer_config(db: Option<&Path>) -> WriterConfig {
    db.map_or_else(WriterConfig::from_env, WriterConfig::from_path)
}

/// Opens a CSV input, transparently decompressing `.gz` files.
pub(crate) fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}
