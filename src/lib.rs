pub mod cache;
pub mod config;
pub mod day_index;
pub mod error;
pub mod handlers;
pub mod models;
pub mod selector;
pub mod spotify;
pub mod state;

use axum::http::{HeaderValue, header};
use axum::{Router, routing::get};
use state::AppState;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub fn app(state: Arc<AppState>) -> Router {
    // GET only: HEAD would otherwise fall through to the GET handler and run the cold path.
    let track_route = get(handlers::track_of_the_day)
        .head(handlers::method_not_allowed)
        .fallback(handlers::method_not_allowed);

    Router::new()
        .route("/", track_route.clone())
        .route("/api/track", track_route)
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .with_state(state)
}
