//! Error types for log reading and output.

/// Result type alias for log operations.
pub type Result<T> = std::result::Result<T, LogError>;

/// Errors raised while turning raw log rows into records, or writing output.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Failed to open the input log.
    #[error("failed to open log '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    /// Failed to create the output file.
    #[error("failed to create output '{path}': {source}")]
    Create {
        path: String,
        source: std::io::Error,
    },

    /// The CSV layer failed (I/O or malformed framing).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("log header has no '{0}' column")]
    MissingColumn(&'static str),

    /// A row lacks a required field, or it is empty.
    #[error("line {line}: missing '{field}' field")]
    MissingField { line: u64, field: &'static str },

    /// The date or time does not parse.
    #[error("line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp { line: u64, value: String },
}
