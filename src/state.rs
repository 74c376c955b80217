use crate::cache::TrackCache;
use crate::cache::fetcher::TrackFetcher;
use crate::cache::storage::{KvStore, MokaStore};
use crate::config::Config;
use crate::spotify::{CatalogApi, SpotifyClient};
use std::sync::Arc;

pub struct AppState {
    pub track_cache: TrackCache,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let api: Arc<dyn CatalogApi> = Arc::new(SpotifyClient::new(
            config.auth_url.clone(),
            config.api_url.clone(),
            config.credential_transport,
            config.http_timeout,
        ));
        let store: Arc<dyn KvStore> = Arc::new(MokaStore::new(config.cache_capacity));

        Self::with_parts(config, api, store)
    }

    /// Same wiring as [`AppState::new`] with caller-supplied upstream and store.
    pub fn with_parts(config: &Config, api: Arc<dyn CatalogApi>, store: Arc<dyn KvStore>) -> Self {
        let fetcher = TrackFetcher::new(
            api,
            config.client_id.clone(),
            config.client_secret.clone(),
            config.selection_settings(),
        );

        Self {
            track_cache: TrackCache::new(store, fetcher, config.cache_settings()),
        }
    }
}
