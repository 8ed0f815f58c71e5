//! Threshold resolution: explicit override first, then the inactivity file.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::threshold::{InactivityThreshold, load_inactivity_file};
use crate::{ConfigError, Result};

/// A threshold together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedThreshold {
    /// The validated threshold.
    pub threshold: InactivityThreshold,
    /// Where the value was resolved from.
    pub source: ThresholdSource,
}

/// Tracks how the threshold was resolved for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThresholdSource {
    /// Supplied directly (CLI flag or environment variable).
    Override,
    /// Read from an inactivity file.
    File(PathBuf),
}

impl fmt::Display for ThresholdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdSource::Override => write!(f, "--inactivity"),
            ThresholdSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolve the threshold.
///
/// An override in seconds wins; the file is not read in that case.
/// Without either, fails with [`ConfigError::Missing`].
pub fn resolve_threshold(
    override_secs: Option<i64>,
    file: Option<&Path>,
) -> Result<ResolvedThreshold> {
    if let Some(secs) = override_secs {
        return Ok(ResolvedThreshold {
            threshold: InactivityThreshold::new(secs)?,
            source: ThresholdSource::Override,
        });
    }

    let path = file.ok_or(ConfigError::Missing)?;
    Ok(ResolvedThreshold {
        threshold: load_inactivity_file(path)?,
        source: ThresholdSource::File(path.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inactivity_period.txt");
        std::fs::write(&path, "2\n").unwrap();

        let resolved = resolve_threshold(Some(30), Some(&path)).unwrap();
        assert_eq!(resolved.threshold.secs(), 30);
        assert_eq!(resolved.source, ThresholdSource::Override);
    }

    #[test]
    fn test_override_skips_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let resolved = resolve_threshold(Some(5), Some(&missing)).unwrap();
        assert_eq!(resolved.threshold.secs(), 5);
    }

    #[test]
    fn test_override_is_validated() {
        assert!(matches!(
            resolve_threshold(Some(0), None),
            Err(ConfigError::NonPositive(0))
        ));
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inactivity_period.txt");
        std::fs::write(&path, "2\n").unwrap();

        let resolved = resolve_threshold(None, Some(&path)).unwrap();
        assert_eq!(resolved.threshold.secs(), 2);
        assert_eq!(resolved.source, ThresholdSource::File(path.clone()));
        assert_eq!(resolved.source.to_string(), path.display().to_string());
    }

    #[test]
    fn test_missing() {
        assert!(matches!(
            resolve_threshold(None, None),
            Err(ConfigError::Missing)
        ));
    }
}
