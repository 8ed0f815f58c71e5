//! Table of currently-open sessions, ordered by recency of activity.

use chrono::NaiveDateTime;
use lru::LruCache;
use tracing::trace;

use crate::error::{Error, Result};
use crate::session::Session;

/// Open sessions keyed by visitor id.
///
/// Backed by an unbounded [`LruCache`]: lookups are O(1) and every insert or
/// touch moves the entry to the most-recently-active end. As long as touches
/// arrive with non-decreasing timestamps, iterating from the least-recent end
/// yields ascending reference times, which lets a sweep stop at the first
/// entry that is still fresh.
pub struct ActiveSessionTable {
    lru: LruCache<String, Session>,
}

impl ActiveSessionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            lru: LruCache::unbounded(),
        }
    }

    /// Look up a visitor's open session without changing the ordering.
    pub fn lookup(&self, visitor_id: &str) -> Option<&Session> {
        self.lru.peek(visitor_id)
    }

    /// Add a newly opened session at the most-recently-active end.
    pub fn insert(&mut self, session: Session) -> Result<()> {
        if self.lru.contains(session.visitor_id.as_str()) {
            return Err(Error::DuplicateKey(session.visitor_id));
        }

        trace!(
            visitor_id = %session.visitor_id,
            table_size = self.lru.len() + 1,
            "Session inserted into table"
        );
        self.lru.put(session.visitor_id.clone(), session);
        Ok(())
    }

    /// Record activity at `now` and move the session to the most-recent end.
    pub fn touch(&mut self, visitor_id: &str, now: NaiveDateTime) -> Result<()> {
        // `get_mut` promotes the entry as a side effect.
        let session = self
            .lru
            .get_mut(visitor_id)
            .ok_or_else(|| Error::NotFound(visitor_id.to_string()))?;
        session.extend(now);
        Ok(())
    }

    /// Detach and return a visitor's open session.
    pub fn remove(&mut self, visitor_id: &str) -> Result<Session> {
        self.lru
            .pop(visitor_id)
            .ok_or_else(|| Error::NotFound(visitor_id.to_string()))
    }

    /// The least-recently-active session, without removing it.
    pub fn oldest(&self) -> Option<&Session> {
        self.lru.peek_lru().map(|(_, session)| session)
    }

    /// Remove and return the least-recently-active session.
    pub fn pop_oldest(&mut self) -> Result<Session> {
        self.lru
            .pop_lru()
            .map(|(_, session)| session)
            .ok_or(Error::Empty)
    }

    /// Iterate from least- to most-recently-active.
    pub fn iter_oldest_first(&self) -> impl Iterator<Item = &Session> {
        self.lru.iter().rev().map(|(_, session)| session)
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.lru.len()
    }

    /// Whether no sessions are open.
    pub fn is_empty(&self) -> bool {
        self.lru.is_empty()
    }
}

impl Default for ActiveSessionTable {
    fn default() -> Self {
        Self::new()
    }
}
