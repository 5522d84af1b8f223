//! Wall-clock conventions used across the core.
//!
//! The core never reads a clock. Every entry point receives `now` as [`EpochMillis`] so hosts
//! can feed their own authoritative time (a reducer timestamp, `SystemTime`, a test clock).

use std::fmt;

/// Absolute instant in milliseconds since the Unix epoch.
pub type EpochMillis = i64;

/// Time left on a participant's restriction.
///
/// Displays as `"Hh Mm Ss"` with truncating division, e.g. `3_599_999` ms is `"0h 59m 59s"`.
/// A negative remainder (deadline already passed, release still pending) displays as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingTime {
    millis: i64,
}

impl RemainingTime {
    pub fn until(deadline: EpochMillis, now: EpochMillis) -> Self {
        Self {
            millis: deadline.saturating_sub(now).max(0),
        }
    }

    pub fn from_millis(millis: i64) -> Self {
        Self {
            millis: millis.max(0),
        }
    }

    pub fn as_millis(&self) -> i64 {
        self.millis
    }

    pub fn is_elapsed(&self) -> bool {
        self.millis == 0
    }
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.millis / 1_000;
        let minutes = seconds / 60;
        let hours = minutes / 60;
        write!(f, "{}h {}m {}s", hours, minutes % 60, seconds % 60)
    }
}
