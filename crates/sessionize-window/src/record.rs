//! Parsed access-log events.

use chrono::NaiveDateTime;

/// A single access event for one visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Visitor identifier (the anonymized IP in EDGAR logs).
    pub visitor_id: String,

    /// When the request was made. No timezone; compared literally.
    pub timestamp: NaiveDateTime,
}

impl Record {
    /// Create a new record.
    pub fn new(visitor_id: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            visitor_id: visitor_id.into(),
            timestamp,
        }
    }
}
