//! CLI command implementations.

pub(crate) mod db;
pub(crate) mod latest;
pub(crate) mod load;
pub(crate) mod path;
