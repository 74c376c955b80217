use crate::day_index::DayIndex;
use std::time::Duration;

/// Holds the name of the per-day key that is currently authoritative.
pub const LATEST_KEY: &str = "latest-key";

pub const DEFAULT_TRACK_TTL_DAYS: u64 = 7;
pub const MIN_TRACK_TTL_DAYS: u64 = 2;
pub const MAX_TRACK_TTL_DAYS: u64 = 31;

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

pub fn track_key(day: DayIndex) -> String {
    format!("track-{}", day)
}

pub fn days(count: u64) -> Duration {
    Duration::from_secs(count * 24 * 60 * 60)
}

#[derive(Debug, Clone, Copy)]
pub struct CacheSettings {
    /// Expiry of each per-day record
    pub track_ttl: Duration,
    /// Upper bound for a single store read or write
    pub store_timeout: Duration,
}
