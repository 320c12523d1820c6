//! Error types for path resolution.

use barvault_types::SpecError;
use thiserror::Error;

/// Result type alias for path operations.
pub type Result<T> = std::result::Result<T, PathError>;

/// Errors that can occur while resolving storage paths.
#[derive(Error, Debug)]
pub enum PathError {
    /// The symbol specification cannot be mapped onto the storage layout.
    #[error("Invalid specification: {0}")]
    InvalidSpecification(#[from] SpecError),

    /// No metadata file matched under the given prefix.
    #[error("No symbols file found under {prefix}")]
    NotFound {
        /// The listed prefix.
        prefix: String,
    },

    /// The bucket name is not configured.
    #[error("Bucket name not configured, set {0}")]
    MissingBucket(&'static str),

    /// Listing or connecting to the object store failed.
    #[error("Object store error: {0}")]
    Listing(#[from] object_store::Error),

    /// The runtime driving object store calls could not be created.
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}
