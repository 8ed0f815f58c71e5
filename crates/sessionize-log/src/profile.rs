//! Summary statistics over a parsed log, for input validation.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::Serialize;
use sessionize_window::Record;

/// What a batch of records looks like before windowing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogProfile {
    /// Number of records.
    pub records: usize,

    /// Number of distinct visitor ids.
    pub visitors: usize,

    /// Earliest timestamp.
    pub first: Option<NaiveDateTime>,

    /// Latest timestamp.
    pub last: Option<NaiveDateTime>,

    /// Records older than the record before them.
    pub out_of_order: usize,
}

impl LogProfile {
    /// Profile a batch of records.
    pub fn from_records(records: &[Record]) -> Self {
        let visitors: HashSet<&str> = records.iter().map(|r| r.visitor_id.as_str()).collect();
        let out_of_order = records
            .windows(2)
            .filter(|pair| pair[1].timestamp < pair[0].timestamp)
            .count();

        Self {
            records: records.len(),
            visitors: visitors.len(),
            first: records.iter().map(|r| r.timestamp).min(),
            last: records.iter().map(|r| r.timestamp).max(),
            out_of_order,
        }
    }

    /// Seconds between the first and last timestamp.
    pub fn span_secs(&self) -> i64 {
        match (self.first, self.last) {
            (Some(first), Some(last)) => (last - first).num_seconds(),
            _ => 0,
        }
    }

    /// Whether the batch is in non-decreasing timestamp order.
    pub fn is_ordered(&self) -> bool {
        self.out_of_order == 0
    }
}
