//! The session windowing pass.
//!
//! Records are consumed in timestamp order. For each record the windower:
//!
//! 1. checks ordering against the latest timestamp seen (the watermark),
//! 2. extends the visitor's open session, or closes it and opens a fresh one
//!    when the gap exceeds the inactivity threshold,
//! 3. sweeps every other session that has gone silent for longer than the
//!    threshold, oldest first, stopping at the first one still in window.
//!
//! [`SessionWindower::finish`] drains whatever is still open at end of input.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::config::{OrderPolicy, WindowConfig};
use crate::error::{Error, Result};
use crate::record::Record;
use crate::session::Session;
use crate::sink::SessionSink;
use crate::table::ActiveSessionTable;

/// Counters collected over one windowing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WindowStats {
    /// Records consumed.
    pub records: u64,

    /// Sessions emitted, by any route.
    pub sessions: u64,

    /// Sessions closed because the same visitor came back after the threshold.
    pub split: u64,

    /// Sessions closed by the inactivity sweep.
    pub swept: u64,

    /// Sessions closed by the end-of-input drain.
    pub flushed: u64,

    /// Late records moved forward to the watermark.
    pub clamped: u64,

    /// Largest number of simultaneously open sessions.
    pub peak_open: usize,
}

/// Incremental session windower.
pub struct SessionWindower {
    config: WindowConfig,
    table: ActiveSessionTable,
    watermark: Option<NaiveDateTime>,
    stats: WindowStats,
}

impl SessionWindower {
    /// Create a windower with an empty session table.
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            table: ActiveSessionTable::new(),
            watermark: None,
            stats: WindowStats::default(),
        }
    }

    /// Get the windower configuration.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Number of currently-open sessions.
    pub fn open_sessions(&self) -> usize {
        self.table.len()
    }

    /// Read-only view of the open sessions.
    pub fn table(&self) -> &ActiveSessionTable {
        &self.table
    }

    /// Latest timestamp consumed so far.
    pub fn watermark(&self) -> Option<NaiveDateTime> {
        self.watermark
    }

    /// Counters so far.
    pub fn stats(&self) -> &WindowStats {
        &self.stats
    }

    /// Consume one record, emitting any sessions it closes.
    pub fn observe<S: SessionSink>(&mut self, record: &Record, sink: &mut S) -> Result<()> {
        let now = self.admit(record)?;
        let threshold = self.config.inactivity_secs();
        let visitor_id = record.visitor_id.as_str();

        trace!(visitor_id = %visitor_id, now = %now, "Observing record");

        match self.table.lookup(visitor_id).map(|s| s.idle_secs(now)) {
            None => {
                debug!(visitor_id = %visitor_id, start = %now, "Opening session");
                self.table.insert(Session::open(visitor_id, now))?;
            }
            Some(idle) if idle > threshold => {
                let stale = self.table.remove(visitor_id)?;
                debug!(
                    visitor_id = %visitor_id,
                    idle_secs = idle,
                    "Visitor returned after inactivity, splitting session"
                );
                self.stats.split += 1;
                self.close(stale, sink)?;
                self.table.insert(Session::open(visitor_id, now))?;
            }
            Some(_) => self.table.touch(visitor_id, now)?,
        }

        self.sweep(now, sink)?;

        self.stats.records += 1;
        self.stats.peak_open = self.stats.peak_open.max(self.table.len());
        Ok(())
    }

    /// Close every remaining session and return the run's counters.
    ///
    /// Sessions are emitted least-recently-active first. Each one ends at its
    /// own last activity time.
    pub fn finish<S: SessionSink>(mut self, sink: &mut S) -> Result<WindowStats> {
        let remaining = self.table.len();
        while !self.table.is_empty() {
            let session = self.table.pop_oldest()?;
            self.stats.flushed += 1;
            self.close(session, sink)?;
        }

        debug!(flushed = remaining, "Drained open sessions at end of input");
        info!(
            records = self.stats.records,
            sessions = self.stats.sessions,
            peak_open = self.stats.peak_open,
            "Windowing complete"
        );
        Ok(self.stats)
    }

    /// Check `record` against the watermark and return its effective time.
    fn admit(&mut self, record: &Record) -> Result<NaiveDateTime> {
        match self.watermark {
            Some(previous) if record.timestamp < previous => match self.config.order_policy {
                OrderPolicy::Strict => Err(Error::OutOfOrderInput {
                    visitor_id: record.visitor_id.clone(),
                    previous,
                    current: record.timestamp,
                }),
                OrderPolicy::Clamp => {
                    warn!(
                        visitor_id = %record.visitor_id,
                        timestamp = %record.timestamp,
                        watermark = %previous,
                        "Out-of-order record clamped to watermark"
                    );
                    self.stats.clamped += 1;
                    Ok(previous)
                }
            },
            _ => {
                self.watermark = Some(record.timestamp);
                Ok(record.timestamp)
            }
        }
    }

    /// Close sessions idle for longer than the threshold as of `now`.
    fn sweep<S: SessionSink>(&mut self, now: NaiveDateTime, sink: &mut S) -> Result<usize> {
        let threshold = self.config.inactivity_secs();
        let mut swept = 0;

        loop {
            let stale = matches!(self.table.oldest(), Some(s) if s.idle_secs(now) > threshold);
            if !stale {
                break;
            }
            let session = self.table.pop_oldest()?;
            self.close(session, sink)?;
            swept += 1;
        }

        if swept > 0 {
            debug!(count = swept, now = %now, "Swept inactive sessions");
            self.stats.swept += swept as u64;
        }
        Ok(swept)
    }

    fn close<S: SessionSink>(&mut self, session: Session, sink: &mut S) -> Result<()> {
        let summary = session.close();
        debug!(
            visitor_id = %summary.visitor_id,
            start = %summary.start,
            end = %summary.end,
            duration_secs = summary.duration_secs,
            event_count = summary.event_count,
            "Session closed"
        );
        self.stats.sessions += 1;
        sink.emit(summary)
    }
}

/// Window a complete batch of records and drain the table.
pub fn run<I, S>(config: WindowConfig, records: I, sink: &mut S) -> Result<WindowStats>
where
    I: IntoIterator<Item = Record>,
    S: SessionSink,
{
    let mut windower = SessionWindower::new(config);
    for record in records {
        windower.observe(&record, sink)?;
    }
    windower.finish(sink)
}
