//! Open session state and the closed-session summary line.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{Error, Result};

/// Timestamp layout used in summary lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// State for one visitor's currently-open activity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Visitor this session belongs to.
    pub visitor_id: String,

    /// Timestamp of the first event.
    pub start: NaiveDateTime,

    /// Timestamp of the most recent event, once a second event arrives.
    pub last_activity: Option<NaiveDateTime>,

    /// Number of events in this session.
    pub event_count: u64,
}

impl Session {
    /// Open a session for a visitor's first event.
    pub fn open(visitor_id: impl Into<String>, start: NaiveDateTime) -> Self {
        Self {
            visitor_id: visitor_id.into(),
            start,
            last_activity: None,
            event_count: 1,
        }
    }

    /// The timestamp used to judge staleness.
    pub fn reference_time(&self) -> NaiveDateTime {
        self.last_activity.unwrap_or(self.start)
    }

    /// Session end: the last known activity time.
    pub fn end(&self) -> NaiveDateTime {
        self.reference_time()
    }

    /// Seconds elapsed between `now` and the session's reference time.
    pub fn idle_secs(&self, now: NaiveDateTime) -> i64 {
        (now - self.reference_time()).num_seconds()
    }

    /// Record another event at `now`.
    pub fn extend(&mut self, now: NaiveDateTime) {
        self.last_activity = Some(now);
        self.event_count += 1;
    }

    /// Close the session, producing its summary.
    pub fn close(self) -> SessionSummary {
        let end = self.end();
        SessionSummary {
            duration_secs: (end - self.start).num_seconds(),
            visitor_id: self.visitor_id,
            start: self.start,
            end,
            event_count: self.event_count,
        }
    }
}

/// Summary of a closed session, rendered as one output line.
///
/// `Display` renders `<visitor_id>,<start>,<end>,<duration_secs>,<event_count>`
/// without a trailing newline; `FromStr` parses the same layout back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub visitor_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_secs: i64,
    pub event_count: u64,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.visitor_id,
            self.start.format(TIMESTAMP_FORMAT),
            self.end.format(TIMESTAMP_FORMAT),
            self.duration_secs,
            self.event_count
        )
    }
}

impl FromStr for SessionSummary {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let malformed = || Error::MalformedSummary(line.to_string());
        let line = line.trim_end_matches(['\r', '\n']);

        // Split from the right so the visitor id is whatever remains.
        let mut fields = line.rsplitn(5, ',');
        let event_count = fields.next().ok_or_else(malformed)?;
        let duration_secs = fields.next().ok_or_else(malformed)?;
        let end = fields.next().ok_or_else(malformed)?;
        let start = fields.next().ok_or_else(malformed)?;
        let visitor_id = fields.next().ok_or_else(malformed)?;

        if visitor_id.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            visitor_id: visitor_id.to_string(),
            start: NaiveDateTime::parse_from_str(start, TIMESTAMP_FORMAT)
                .map_err(|_| malformed())?,
            end: NaiveDateTime::parse_from_str(end, TIMESTAMP_FORMAT).map_err(|_| malformed())?,
            duration_secs: duration_secs.parse().map_err(|_| malformed())?,
            event_count: event_count.parse().map_err(|_| malformed())?,
        })
    }
}
