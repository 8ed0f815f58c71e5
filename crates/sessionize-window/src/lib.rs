//! Inactivity-based session windowing for access logs.
//!
//! This crate groups a time-ordered stream of per-visitor records into
//! sessions:
//! - An active-session table with LRU ordering by last activity
//! - Incremental sweeping of sessions idle longer than the threshold
//! - End-of-input draining so every session is emitted exactly once
//! - A sink hook that receives each closed session's summary
//!
//! # Example
//!
//! ```rust,ignore
//! use sessionize_window::{run, SessionSummary, WindowConfig};
//!
//! let config = WindowConfig::new(2)?;
//! let mut summaries: Vec<SessionSummary> = Vec::new();
//! let stats = run(config, records, &mut summaries)?;
//! ```

mod config;
mod error;
mod record;
mod session;
mod sink;
mod table;
mod windower;

pub use config::{OrderPolicy, WindowConfig};
pub use error::{Error, Result};
pub use record::Record;
pub use session::{Session, SessionSummary, TIMESTAMP_FORMAT};
pub use sink::SessionSink;
pub use table::ActiveSessionTable;
pub use windower::{SessionWindower, WindowStats, run};
