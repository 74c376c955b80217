use crate::error::TrackError;
use crate::models::HealthResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;

pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Track of the day API is running".to_string(),
    })
}

pub async fn track_of_the_day(State(state): State<Arc<AppState>>) -> Result<Response, TrackError> {
    let record = state.track_cache.current_track().await.map_err(|e| {
        error!(error = %e, "failed to resolve track of the day");
        e
    })?;

    // Freshness is decided by the day-keyed cache, so intermediaries must not keep copies.
    Ok(([(header::CACHE_CONTROL, NO_CACHE)], Json(record)).into_response())
}

pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
