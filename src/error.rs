//! Error types for the calassist core.

use thiserror::Error;

/// Errors that can occur in calassist operations.
#[derive(Error, Debug)]
pub enum CalassistError {
    #[error("Invalid duration '{0}': expected a string like '30m' or '2h'")]
    InvalidDuration(String),

    #[error("Invalid time of day '{0}': expected a string like '9am' or '18:30'")]
    InvalidTimeOfDay(String),

    #[error("Unknown predicate '{name}'. Valid predicates are: {valid}")]
    UnknownPredicate { name: String, valid: String },

    #[error("Invalid time span: start {start} is not before end {end}")]
    InvalidTimeSpan { start: String, end: String },

    #[error("Event source error: {0}")]
    Source(String),
}

/// Result type alias for calassist operations.
pub type CalassistResult<T> = Result<T, CalassistError>;
