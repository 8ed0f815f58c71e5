//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading the inactivity threshold.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the threshold file.
    #[error("failed to read inactivity file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// The threshold source contained no value.
    #[error("inactivity threshold is empty")]
    Empty,

    /// The threshold is not an integer.
    #[error("inactivity threshold '{0}' is not an integer")]
    NotInteger(String),

    /// The threshold is zero or negative.
    #[error("inactivity threshold must be positive, got {0}")]
    NonPositive(i64),

    /// No threshold was supplied through any source.
    #[error("no inactivity threshold configured; pass an inactivity file or --inactivity")]
    Missing,
}
