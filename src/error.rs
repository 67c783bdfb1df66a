//! Series and pipeline error types.

use crate::Timestamp;
use thiserror::Error;

/// Errors raised by the [`Series`](crate::Series) store and by indicators.
///
/// All of them are local and non-retryable: computation is pure, so
/// repeating a failed call yields the same error. Numeric edge cases
/// (division by zero, zero variance) are never errors; each indicator
/// resolves them to a defined value or an absent marker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    /// Appended column length differs from the row count.
    #[error("column `{column}` has {actual} values, series has {expected} rows")]
    LengthMismatch {
        /// Column being appended.
        column: String,
        /// Row count of the series.
        expected: usize,
        /// Length of the rejected column.
        actual: usize,
    },

    /// A column with this name already exists.
    #[error("column `{0}` already exists")]
    DuplicateColumn(String),

    /// No column with this name exists.
    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    /// An indicator ran before a column it reads was computed.
    ///
    /// Unreachable through [`Engine::run`](crate::Engine::run); indicates a
    /// step invoked out of order.
    #[error("{indicator} requires column `{column}`, which has not been computed")]
    MissingDependency {
        /// Display name of the indicator.
        indicator: String,
        /// Column it tried to read.
        column: String,
    },

    /// Bar timestamps are not strictly increasing.
    #[error("timestamp {current} at row {index} does not follow {previous}")]
    UnorderedTimestamps {
        /// Row of the offending bar.
        index: usize,
        /// Timestamp of the preceding bar.
        previous: Timestamp,
        /// Timestamp of the offending bar.
        current: Timestamp,
    },
}

impl SeriesError {
    /// Creates a `MissingDependency` error.
    #[must_use]
    pub fn missing_dependency(indicator: impl ToString, column: impl Into<String>) -> Self {
        SeriesError::MissingDependency {
            indicator: indicator.to_string(),
            column: column.into(),
        }
    }
}

/// Result alias for series operations.
pub type Result<T> = std::result::Result<T, SeriesError>;
