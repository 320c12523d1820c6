//! Error types for barvault values.

use thiserror::Error;

/// Error returned when a symbol specification component is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// An enum name that does not match any known member.
    #[error("unknown {kind} '{value}', expected one of: {expected}")]
    Unknown {
        /// Which enum was being parsed (e.g. "asset class").
        kind: &'static str,
        /// The rejected input.
        value: String,
        /// Comma separated list of accepted names.
        expected: String,
    },

    /// A recognized member that the storage layout has no segment for.
    #[error("{kind} '{value}' has no storage path segment")]
    Unsupported {
        /// Which enum the member belongs to.
        kind: &'static str,
        /// The member's name.
        value: String,
    },

    /// A free-form component (symbol, exchange, currency) is blank.
    #[error("{field} must not be empty")]
    Empty {
        /// The name of the empty field.
        field: &'static str,
    },
}

impl SpecError {
    pub(crate) fn unknown(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self::Unknown {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// Error for fact rows whose numeric fields cannot be stored.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A price field is NaN or infinite.
    #[error("{field} is not a finite number: {value}")]
    NonFinite {
        /// The offending column.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The bar's high is below its low.
    #[error("high {high} is below low {low}")]
    HighBelowLow {
        /// The bar high.
        high: f64,
        /// The bar low.
        low: f64,
    },
}
