use crate::day_index::DayIndex;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// The track of the day as served to the site and as stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    #[serde(rename = "coverURL")]
    pub cover_url: String,
    pub title: String,
    pub album: String,
    /// Contributing artists joined with ", "
    pub artist: String,
    pub id: String,
    pub day: DayIndex,
}

/// One search hit, already validated out of the upstream JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    pub id: String,
    pub name: String,
    pub album_name: String,
    pub cover_urls: Vec<String>,
    pub artists: Vec<String>,
    pub explicit: bool,
}
