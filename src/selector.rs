use crate::day_index::DayIndex;
use crate::error::TrackError;
use crate::models::{TrackDescriptor, TrackRecord};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::str::FromStr;

/// How the day picks a search query out of the configured list.
///
/// Both policies return the same query for every request of one day; they
/// differ in how the queries are spread over a longer period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryPolicy {
    /// `queries[day mod len]` over the list as configured
    #[default]
    Rotate,
    /// Shuffle with an RNG seeded by the day, then `[day mod len]`
    DailyShuffle,
}

impl FromStr for QueryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rotate" => Ok(Self::Rotate),
            "daily-shuffle" | "daily_shuffle" | "shuffle" => Ok(Self::DailyShuffle),
            other => Err(format!("expected 'rotate' or 'daily-shuffle', got '{}'", other)),
        }
    }
}

pub fn select_query<'a>(
    day: DayIndex,
    queries: &'a [String],
    policy: QueryPolicy,
) -> Result<&'a str, TrackError> {
    let slot = day.slot(queries.len()).ok_or(TrackError::Selection)?;

    let index = match policy {
        QueryPolicy::Rotate => slot,
        QueryPolicy::DailyShuffle => {
            let mut order: Vec<usize> = (0..queries.len()).collect();
            let mut rng = StdRng::seed_from_u64(day.value() as u64);
            order.shuffle(&mut rng);
            order[slot]
        }
    };

    Ok(&queries[index])
}

pub fn select_candidate(
    day: DayIndex,
    results: &[TrackDescriptor],
) -> Result<&TrackDescriptor, TrackError> {
    let slot = day.slot(results.len()).ok_or(TrackError::Selection)?;
    Ok(&results[slot])
}

/// Drops explicit tracks, keeping the upstream order of the rest.
pub fn without_explicit(results: Vec<TrackDescriptor>) -> Vec<TrackDescriptor> {
    results.into_iter().filter(|track| !track.explicit).collect()
}

pub fn build_record(track: &TrackDescriptor, day: DayIndex) -> Result<TrackRecord, TrackError> {
    let cover_url = track
        .cover_urls
        .first()
        .cloned()
        .ok_or_else(|| TrackError::MissingAsset {
            id: track.id.clone(),
        })?;

    Ok(TrackRecord {
        cover_url,
        title: track.name.clone(),
        album: track.album_name.clone(),
        artist: track.artists.join(", "),
        id: track.id.clone(),
        day,
    })
}
