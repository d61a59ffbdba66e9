//! Error types for the billscan-core library.
//!
//! Field extraction itself never fails: a pattern that does not match yields
//! an absent value. These errors cover the fallible edges of the library,
//! i.e. loading configuration and compiling user-supplied vendor patterns.

use thiserror::Error;

/// Main error type for the billscan library.
#[derive(Error, Debug)]
pub enum BillscanError {
    /// A configured vendor pattern is not a valid regular expression.
    #[error("invalid vendor pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the billscan library.
pub type Result<T> = std::result::Result<T, BillscanError>;
