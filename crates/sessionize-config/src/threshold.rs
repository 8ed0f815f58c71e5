//! The inactivity threshold value and its one-line file format.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::{ConfigError, Result};

/// Maximum silent gap, in whole seconds, before a session ends. Always > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct InactivityThreshold(i64);

impl InactivityThreshold {
    /// Validate a number of seconds.
    pub fn new(secs: i64) -> Result<Self> {
        if secs <= 0 {
            return Err(ConfigError::NonPositive(secs));
        }
        Ok(Self(secs))
    }

    /// The threshold in seconds.
    pub fn secs(self) -> i64 {
        self.0
    }
}

impl FromStr for InactivityThreshold {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ConfigError::Empty);
        }
        let secs = s
            .parse::<i64>()
            .map_err(|_| ConfigError::NotInteger(s.to_string()))?;
        Self::new(secs)
    }
}

impl fmt::Display for InactivityThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Read the threshold from the first non-empty line of `path`.
pub fn load_inactivity_file(path: &Path) -> Result<InactivityThreshold> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;

    let line = contents
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or(ConfigError::Empty)?;

    let threshold: InactivityThreshold = line.parse()?;
    debug!(path = %path.display(), threshold = %threshold, "Loaded inactivity threshold");
    Ok(threshold)
}
