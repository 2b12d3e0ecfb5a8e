//! Error types for the transaction analyzer.

use thiserror::Error;

/// Result type alias for loader and analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Errors that can occur while loading or querying transactions.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON input could not be parsed
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV input could not be parsed
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Input file extension is neither `.json` nor `.csv`
    #[error("Unsupported input format: {path} (expected .json or .csv)")]
    UnsupportedFormat { path: String },

    /// A record field could not be coerced to its typed value
    #[error("Malformed record at index {index}: {field}: {message}")]
    MalformedRecord {
        index: usize,
        field: &'static str,
        message: String,
    },

    /// A date argument is not in `YYYY-MM-DD` form
    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate { input: String },

    /// A month or day filter is out of range
    #[error("Invalid {component} {value}")]
    InvalidDateComponent { component: &'static str, value: u32 },

    /// A sum of amounts exceeds the representable range
    #[error("Amount overflow while computing {operation}")]
    AmountOverflow { operation: &'static str },

    /// The query needs at least one transaction
    #[error("Cannot compute {operation} over an empty collection")]
    EmptyCollection { operation: &'static str },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: transaction-analyzer <input.json|input.csv>")]
    MissingArgument,
}
