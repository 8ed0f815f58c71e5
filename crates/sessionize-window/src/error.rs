//! Error types for session windowing.

use chrono::NaiveDateTime;

/// Error type for session windowing operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Inactivity threshold must be a positive number of seconds.
    #[error("Invalid inactivity threshold: {0} (must be > 0 seconds)")]
    InvalidThreshold(i64),

    /// An open session already exists for this visitor.
    #[error("Duplicate open session for visitor: {0}")]
    DuplicateKey(String),

    /// No open session exists for this visitor.
    #[error("No open session for visitor: {0}")]
    NotFound(String),

    /// The active session table has no entries.
    #[error("Active session table is empty")]
    Empty,

    /// A record arrived with a timestamp earlier than its predecessor.
    #[error("Out-of-order record for visitor {visitor_id}: {current} is earlier than {previous}")]
    OutOfOrderInput {
        visitor_id: String,
        previous: NaiveDateTime,
        current: NaiveDateTime,
    },

    /// A rendered summary line could not be parsed back.
    #[error("Malformed session summary: {0}")]
    MalformedSummary(String),

    /// Error from the output sink.
    #[error("Sink error: {0}")]
    Sink(String),
}

/// Result type for session windowing operations.
pub type Result<T> = std::result::Result<T, Error>;
