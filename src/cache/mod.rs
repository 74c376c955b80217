pub mod fetcher;
pub mod storage;
pub mod types;

use crate::cache::fetcher::TrackFetcher;
use crate::cache::storage::KvStore;
use crate::cache::types::{CacheSettings, LATEST_KEY, track_key};
use crate::day_index::{DayIndex, compute_day_index};
use crate::error::{StoreError, TrackError};
use crate::models::TrackRecord;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Cache-aside front for the daily selection.
///
/// The store holds one record per day under `track-{day}` and a pointer,
/// `latest-key`, naming the record that is currently authoritative. A record
/// is only served while its `day` matches today; anything else sends the
/// request down the cold path, which selects a new track and repoints
/// `latest-key` at it.
///
/// There is no lock around read-check-write. Two cold requests on the same day
/// may both go upstream and both write; whichever lands last owns the pointer,
/// and either record is equally valid for that day.
#[derive(Clone)]
pub struct TrackCache {
    store: Arc<dyn KvStore>,
    fetcher: TrackFetcher,
    settings: CacheSettings,
}

impl TrackCache {
    pub fn new(store: Arc<dyn KvStore>, fetcher: TrackFetcher, settings: CacheSettings) -> Self {
        Self {
            store,
            fetcher,
            settings,
        }
    }

    pub async fn current_track(&self) -> Result<TrackRecord, TrackError> {
        self.current_track_at(Utc::now()).await
    }

    pub async fn current_track_at(&self, now: DateTime<Utc>) -> Result<TrackRecord, TrackError> {
        let day = compute_day_index(now);

        if let Some(record) = self.lookup_fresh(day).await {
            debug!(day = %day, track_id = %record.id, "serving cached track");
            return Ok(record);
        }

        info!(day = %day, "no fresh track cached, selecting a new one");
        let record = self.fetcher.fetch_track(day).await?;
        self.store_record(&record).await;

        Ok(record)
    }

    async fn lookup_fresh(&self, day: DayIndex) -> Option<TrackRecord> {
        let pointer = self.read(LATEST_KEY).await?;
        let raw = self.read(&pointer).await?;

        let record: TrackRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(key = %pointer, error = %e, "discarding unreadable cached track");
                return None;
            }
        };

        if record.day != day {
            debug!(cached_day = %record.day, day = %day, "cached track is stale");
            return None;
        }

        Some(record)
    }

    /// Any failure here counts as a miss.
    async fn read(&self, key: &str) -> Option<String> {
        let result = match timeout(self.settings.store_timeout, self.store.get(key)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.settings.store_timeout)),
        };

        match result {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    async fn store_record(&self, record: &TrackRecord) {
        let key = track_key(record.day);

        let body = match serde_json::to_string(record) {
            Ok(body) => body,
            Err(e) => {
                warn!(key = %key, error = %e, "could not serialize track for caching");
                return;
            }
        };

        // The pointer must only move once the record it names is in place.
        if let Err(e) = self.write(&key, body, Some(self.settings.track_ttl)).await {
            warn!(key = %key, error = %e, "failed to cache track");
            return;
        }

        if let Err(e) = self.write(LATEST_KEY, key.clone(), None).await {
            warn!(key = %key, error = %e, "failed to update latest-key pointer");
        }
    }

    async fn write(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> Result<(), StoreError> {
        match timeout(self.settings.store_timeout, self.store.put(key, value, ttl)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.settings.store_timeout)),
        }
    }
}
