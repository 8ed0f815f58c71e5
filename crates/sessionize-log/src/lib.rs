//! Access log input and session summary output.
//!
//! Reads EDGAR-style CSV logs (any column layout, as long as the header names
//! `ip`, `date` and `time`) into [`Record`]s, and writes closed sessions as
//! one line each.
//!
//! [`Record`]: sessionize_window::Record

mod error;
mod profile;
mod reader;
mod writer;

pub use error::{LogError, Result};
pub use profile::LogProfile;
pub use reader::{LogReader, read_records};
pub use writer::SummaryWriter;
