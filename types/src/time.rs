//! Block timestamps.
//!
//! Timestamps are Unix epoch seconds (UTC) as reported in block headers.
//! They are signed so that differences between two timestamps can be
//! represented directly, including negative ones.

use serde::{Deserialize, Serialize};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(secs: i64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }

    /// Whole seconds from `earlier` to `self`, negative when `self` precedes
    /// `earlier`. `None` if the difference does not fit in an `i64`, which
    /// only corrupt block times can cause.
    pub fn checked_secs_since(&self, earlier: Timestamp) -> Option<i64> {
        self.0.checked_sub(earlier.0)
    }
}
