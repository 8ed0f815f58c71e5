//! Configuration for the session windower.

use serde::Serialize;

use crate::error::{Error, Result};

/// How the windower reacts to a record older than its predecessor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPolicy {
    /// Fail the run with [`Error::OutOfOrderInput`].
    #[default]
    Strict,

    /// Treat the late record as happening at the latest timestamp seen so far.
    Clamp,
}

/// Configuration for the session windower.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Maximum silent gap, in seconds, before a session is closed.
    inactivity_secs: i64,

    /// Policy for records that break timestamp ordering.
    pub order_policy: OrderPolicy,
}

impl WindowConfig {
    /// Create a configuration with the given inactivity threshold.
    ///
    /// Fails with [`Error::InvalidThreshold`] unless `inactivity_secs > 0`.
    pub fn new(inactivity_secs: i64) -> Result<Self> {
        if inactivity_secs <= 0 {
            return Err(Error::InvalidThreshold(inactivity_secs));
        }
        Ok(Self {
            inactivity_secs,
            order_policy: OrderPolicy::default(),
        })
    }

    /// Set the out-of-order policy.
    pub fn with_order_policy(mut self, policy: OrderPolicy) -> Self {
        self.order_policy = policy;
        self
    }

    /// The inactivity threshold in seconds.
    pub fn inactivity_secs(&self) -> i64 {
        self.inactivity_secs
    }
}
