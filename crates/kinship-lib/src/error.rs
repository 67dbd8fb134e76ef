// ABOUTME: Error types for kinship operations
// ABOUTME: Defines KinshipError enum covering all failure modes

use thiserror::Error;

/// Errors that can occur while building, loading, or saving a family tree
#[derive(Error, Debug)]
pub enum KinshipError {
    /// Storage for a new person could not be allocated
    #[error("memory allocation failed")]
    AllocationFailure,

    /// A bounded collection is already at its configured maximum
    #[error("{what} capacity exceeded (limit {limit})")]
    CapacityExceeded { what: &'static str, limit: usize },

    /// I/O error reading or writing files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted tree text could not be parsed
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Text that is not a `<day> <month> <year>` triple
    #[error("invalid date {0:?}, expected <day> <month> <year>")]
    InvalidDate(String),

    /// Name rejected by the tree
    #[error("invalid name {0:?}")]
    InvalidName(String),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration values out of range
    #[error("configuration error: {0}")]
    Config(String),

    /// No person with the given name
    #[error("person not found: {0}")]
    NotFound(String),
}
