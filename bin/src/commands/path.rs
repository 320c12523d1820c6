//! Path command implementation.

use crate::display::resolver_config;
use anyhow::Result;
use barvault_lib::prelude::*;

/// Print the storage path of a series.
///
/// Needs no store access, so only the resolver configuration is built.
pub(crate) fn print_path(spec: &SymbolSpec, bucket: Option<&str>) -> Result<()> {
    let config = resolver_config(bucket)?;
    let path = config.generate_file_path(spec)?;
    println!("{path}");
    Ok(())
}
