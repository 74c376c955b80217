use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use thiserror::Error;

/// Everything that can abort a track-of-the-day request.
///
/// None of these are retried. At the HTTP boundary they all become a 500 with
/// the message as a plain-text body.
#[derive(Error, Debug)]
pub enum TrackError {
    /// Credential exchange rejected or answered with an unusable body
    #[error("Spotify authentication failed: {0}")]
    Auth(String),

    /// Search call answered with a non-success status or an unreadable body
    #[error("Spotify API Error: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("search for {query:?} returned no tracks")]
    EmptyResult { query: String },

    /// Nothing left to index into
    #[error("no candidate available for selection")]
    Selection,

    #[error("track {id} has no album artwork")]
    MissingAsset { id: String },

    #[error("request to Spotify failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl IntoResponse for TrackError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: {}", self),
        )
            .into_response()
    }
}

/// Key-value store failures. These never reach the caller: a failed read is
/// treated as a cache miss and a failed write only loses the cached copy.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store did not answer within {0:?}")]
    Timeout(Duration),

    #[error("store backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}
