//! Latest-symbols command implementation.

use crate::display::resolver_config;
use anyhow::Result;
use barvault_lib::prelude::*;
use std::path::Path;

/// Print the newest symbols metadata file in S3 or in a local mirror.
pub(crate) fn print_latest(bucket: Option<&str>, local_root: Option<&Path>) -> Result<()> {
    let config = resolver_config(bucket)?;
    let resolver = match local_root {
        Some(root) => PathResolver::local(config, root)?,
        None => PathResolver::s3(config)?,
    };

    println!("{}", resolver.get_latest_symbols_file()?);
    Ok(())
}
