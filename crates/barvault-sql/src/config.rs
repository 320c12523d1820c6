//! Writer configuration.

use std::path::Path;

/// Environment variable holding the database location.
pub const DB_PATH_ENV: &str = "BARVAULT_DB_PATH";

/// In-memory database location.
const MEMORY: &str = ":memory:";

/// Configuration for a [`SqlWriter`](crate::SqlWriter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    /// Path to the SQLite database (`:memory:` for in-memory).
    pub path: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            path: MEMORY.to_string(),
        }
    }
}

impl WriterConfig {
    /// Creates a configuration for the database at `path`.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    /// Reads the database location from the environment (a `.env` file is
    /// honored), falling back to an in-memory database.
    #[must_use]
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_path_var(std::env::var(DB_PATH_ENV).ok())
    }

    fn from_path_var(value: Option<String>) -> Self {
        value.map_or_else(Self::default, Self::from_path)
    }

    /// Returns true if the database lives in memory.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == MEMORY
    }
}
