//! Resolver configuration.

use barvault_types::SymbolSpec;

use crate::{PathError, Result, layout};

/// Environment variable holding the bucket name.
pub const BUCKET_ENV: &str = "AM_S3_BUCKET";

/// Configuration for a [`PathResolver`](crate::PathResolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Bucket that roots every generated path.
    pub bucket: String,
    /// Key prefix of the market data tree inside the bucket.
    pub root: String,
    /// Directory under `root` holding symbols metadata files.
    pub metadata_dir: String,
    /// File name prefix of symbols metadata files.
    pub symbols_file_prefix: String,
    /// File name suffix of symbols metadata files.
    pub symbols_file_suffix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            root: "data/ib".to_string(),
            metadata_dir: "metadata".to_string(),
            symbols_file_prefix: "symbols-".to_string(),
            symbols_file_suffix: ".csv".to_string(),
        }
    }
}

impl ResolverConfig {
    /// Creates a configuration for the given bucket with default naming.
    #[must_use]
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    /// Reads the bucket name from the environment (a `.env` file is honored).
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingBucket`] if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_bucket_var(std::env::var(BUCKET_ENV).ok())
    }

    fn from_bucket_var(value: Option<String>) -> Result<Self> {
        match value {
            Some(bucket) if !bucket.trim().is_empty() => Ok(Self::new(bucket)),
            _ => Err(PathError::MissingBucket(BUCKET_ENV)),
        }
    }

    /// Returns the URL every generated path starts with, e.g. `s3://bucket/data/ib`.
    #[must_use]
    pub fn prefix(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.root)
    }

    /// Returns the storage path of a series under this bucket.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidSpecification`] if the layout has no
    /// directory for the asset class or frequency.
    pub fn generate_file_path(&self, spec: &SymbolSpec) -> Result<String> {
        Ok(layout::file_path(&self.prefix(), spec)?)
    }

    /// Returns the object key prefix of the metadata directory.
    #[must_use]
    pub fn metadata_key_prefix(&self) -> String {
        format!("{}/{}", self.root, self.metadata_dir)
    }

    /// Returns true if `file_name` follows the symbols metadata naming convention.
    #[must_use]
    pub fn is_symbols_file(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.symbols_file_prefix)
            && file_name.ends_with(&self.symbols_file_suffix)
    }
}
