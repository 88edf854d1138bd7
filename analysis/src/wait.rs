//! Wait-time computation.

use votetime_types::Timestamp;
use votetime_utils::time::secs_to_days;

/// How long after maturity a vote was cast.
///
/// Both values are negative when the vote precedes the computed maturity
/// point, which only happens with corrupt input; they are never clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitTime {
    pub blocks: i64,
    pub secs: i64,
}

impl WaitTime {
    pub fn days(&self) -> f64 {
        secs_to_days(self.secs as f64)
    }

    pub fn is_negative(&self) -> bool {
        self.blocks < 0 || self.secs < 0
    }
}

/// Vote point minus maturity point. `None` when either difference overflows.
pub fn wait_time(
    vote_height: i64,
    vote_time: Timestamp,
    maturity_height: i64,
    maturity_time: Timestamp,
) -> Option<WaitTime> {
    Some(WaitTime {
        blocks: vote_height.checked_sub(maturity_height)?,
        secs: vote_time.checked_secs_since(maturity_time)?,
    })
}
