use crate::day_index::DayIndex;
use crate::error::TrackError;
use crate::models::TrackRecord;
use crate::selector::{QueryPolicy, build_record, select_candidate, select_query, without_explicit};
use crate::spotify::{CatalogApi, SEARCH_TYPE_TRACK};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct SelectionSettings {
    pub queries: Vec<String>,
    pub policy: QueryPolicy,
    pub search_limit: u32,
    pub skip_explicit: bool,
}

/// Performs the upstream half of a cache miss: authenticate, search and
/// select. Nothing is written here.
#[derive(Clone)]
pub struct TrackFetcher {
    api: Arc<dyn CatalogApi>,
    client_id: String,
    client_secret: String,
    selection: SelectionSettings,
}

impl TrackFetcher {
    pub fn new(
        api: Arc<dyn CatalogApi>,
        client_id: String,
        client_secret: String,
        selection: SelectionSettings,
    ) -> Self {
        Self {
            api,
            client_id,
            client_secret,
            selection,
        }
    }

    pub async fn fetch_track(&self, day: DayIndex) -> Result<TrackRecord, TrackError> {
        let query = select_query(day, &self.selection.queries, self.selection.policy)?;

        let token = self
            .api
            .authenticate(&self.client_id, &self.client_secret)
            .await?;

        let mut results = self
            .api
            .search(&token, query, SEARCH_TYPE_TRACK, self.selection.search_limit)
            .await?;

        if self.selection.skip_explicit {
            results = without_explicit(results);
        }

        let track = select_candidate(day, &results)?;
        let record = build_record(track, day)?;

        info!(
            day = %day,
            query,
            candidates = results.len(),
            track_id = %record.id,
            "selected track of the day"
        );

        Ok(record)
    }
}
