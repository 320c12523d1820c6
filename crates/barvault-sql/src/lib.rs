//! SQL persistence of market bars and ticks for barvault.
//!
//! - [`SqlWriter`] - Dimension upserts plus single and bulk fact inserts
//! - [`WriterConfig`] - Database location
//! - [`init_schema`] - Creates the six tables the writer expects
//! - [`FactRow`] - Binding of a fact row type to its table

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barvault/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod fact;
mod schema;
mod writer;

pub use config::{DB_PATH_ENV, WriterConfig};
pub use error::{Result, WriteError};
pub use fact::FactRow;
pub use schema::{Table, init_schema};
pub use writer::SqlWriter;
