//! Storage path resolution for barvault market data files.
//!
//! - [`layout::file_path`] - Builds the canonical path of a stored series
//! - [`layout::asset_class_segment`], [`layout::frequency_segment`] - Directory lookup tables
//! - [`PathResolver`] - Path generation bound to a bucket, plus metadata discovery
//! - [`ResolverConfig`] - Bucket and metadata naming settings

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barvault/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
pub mod layout;
mod resolver;

pub use config::{BUCKET_ENV, ResolverConfig};
pub use error::{PathError, Result};
pub use resolver::PathResolver;
