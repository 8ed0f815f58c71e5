//! Output hook for closed sessions.
//!
//! The windower performs no I/O; every closed session is handed to a
//! [`SessionSink`], called synchronously once per session. File-backed sinks
//! live outside this crate.

use crate::error::Result;
use crate::session::SessionSummary;

/// Receiver for closed-session summaries.
pub trait SessionSink {
    /// Accept one closed session.
    ///
    /// An error aborts the run; the windower does not retry.
    fn emit(&mut self, summary: SessionSummary) -> Result<()>;
}

/// Collects summaries in memory, in emission order.
impl SessionSink for Vec<SessionSummary> {
    fn emit(&mut self, summary: SessionSummary) -> Result<()> {
        self.push(summary);
        Ok(())
    }
}

impl<S: SessionSink + ?Sized> SessionSink for &mut S {
    fn emit(&mut self, summary: SessionSummary) -> Result<()> {
        (**self).emit(summary)
    }
}
