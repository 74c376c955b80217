use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Whole UTC days elapsed since 1970-01-01.
///
/// Every instant of one UTC calendar day maps to the same index and
/// consecutive days map to consecutive indices, so the value works both as a
/// cache key suffix and as a seed for day-based selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayIndex(i64);

impl DayIndex {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// Position inside a sequence of `len` items, or `None` when the sequence is empty.
    pub fn slot(self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.0.rem_euclid(len as i64) as usize)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for DayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn compute_day_index(now: DateTime<Utc>) -> DayIndex {
    DayIndex(now.timestamp().div_euclid(SECONDS_PER_DAY))
}
