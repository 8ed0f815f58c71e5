//! Configuration for the sessionize tool.
//!
//! The only setting is the inactivity threshold, in whole seconds:
//! - Read from the first non-empty line of a text file
//! - Or supplied directly (CLI flag / environment), which takes precedence
//!
//! Values are validated here, before any log record is processed.

pub mod error;
pub mod resolver;
pub mod threshold;

pub use error::{ConfigError, Result};
pub use resolver::{ResolvedThreshold, ThresholdSource, resolve_threshold};
pub use threshold::{InactivityThreshold, load_inactivity_file};
