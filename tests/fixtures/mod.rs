#![allow(dead_code)]

use async_trait::async_trait;
use daytrack_web::cache::TrackCache;
use daytrack_web::cache::fetcher::TrackFetcher;
use daytrack_web::cache::storage::KvStore;
use daytrack_web::config::Config;
use daytrack_web::error::{StoreError, TrackError};
use daytrack_web::models::TrackDescriptor;
use daytrack_web::spotify::{BearerToken, CatalogApi};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn track(n: usize) -> TrackDescriptor {
    TrackDescriptor {
        id: format!("track{}", n),
        name: format!("Song {}", n),
        album_name: format!("Album {}", n),
        cover_urls: vec![
            format!("https://i.scdn.co/image/{}-640", n),
            format!("https://i.scdn.co/image/{}-300", n),
        ],
        artists: vec![format!("Artist {}", n), "Featured".to_string()],
        explicit: false,
    }
}

pub fn tracks(count: usize) -> Vec<TrackDescriptor> {
    (0..count).map(track).collect()
}

pub enum SearchOutcome {
    Tracks(Vec<TrackDescriptor>),
    Status(u16, String),
    Empty,
}

/// Catalog double that counts calls and remembers the queries it saw.
pub struct FakeCatalog {
    pub auth_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
    pub auth_fails: bool,
    pub outcome: SearchOutcome,
}

impl FakeCatalog {
    pub fn returning(results: Vec<TrackDescriptor>) -> Self {
        Self::with_outcome(SearchOutcome::Tracks(results))
    }

    pub fn with_outcome(outcome: SearchOutcome) -> Self {
        Self {
            auth_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
            auth_fails: false,
            outcome,
        }
    }

    pub fn failing_auth() -> Self {
        Self {
            auth_fails: true,
            ..Self::returning(tracks(3))
        }
    }

    pub fn auth_count(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }

    pub fn search_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn seen_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn authenticate(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<BearerToken, TrackError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        if self.auth_fails {
            return Err(TrackError::Auth("400 - invalid_client".to_string()));
        }
        Ok(BearerToken::new(format!("{}:{}", client_id, client_secret)))
    }

    async fn search(
        &self,
        _token: &BearerToken,
        query: &str,
        _search_type: &str,
        limit: u32,
    ) -> Result<Vec<TrackDescriptor>, TrackError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());

        match &self.outcome {
            SearchOutcome::Tracks(results) => {
                Ok(results.iter().take(limit as usize).cloned().collect())
            }
            SearchOutcome::Status(status, body) => Err(TrackError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            SearchOutcome::Empty => Err(TrackError::EmptyResult {
                query: query.to_string(),
            }),
        }
    }
}

/// HashMap-backed store that records writes and can be made slow or broken.
#[derive(Default)]
pub struct MemoryStore {
    pub entries: Mutex<HashMap<String, (String, Option<Duration>)>>,
    pub writes: Mutex<Vec<String>>,
    pub read_delay: Option<Duration>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slow(read_delay: Duration) -> Self {
        Self {
            read_delay: Some(read_delay),
            ..Self::default()
        }
    }

    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), None));
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone())
    }

    pub fn ttl(&self, key: &str) -> Option<Duration> {
        self.entries.lock().unwrap().get(key).and_then(|(_, ttl)| *ttl)
    }

    pub fn written_keys(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_reads {
            return Err(StoreError::Backend("connection reset".to_string()));
        }
        Ok(self.value(key))
    }

    async fn put(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Backend("read-only replica".to_string()));
        }
        self.writes.lock().unwrap().push(key.to_string());
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value, ttl));
        Ok(())
    }
}

pub fn test_config(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("SPOTIFY_CLIENT_ID".to_string(), "client-id".to_string()),
        ("SPOTIFY_CLIENT_SECRET".to_string(), "client-secret".to_string()),
    ]);
    for (name, value) in extra {
        vars.insert(name.to_string(), value.to_string());
    }

    Config::from_lookup(|name| vars.get(name).cloned()).unwrap()
}

pub fn track_cache(
    config: &Config,
    catalog: Arc<FakeCatalog>,
    store: Arc<MemoryStore>,
) -> TrackCache {
    let fetcher = TrackFetcher::new(
        catalog,
        config.client_id.clone(),
        config.client_secret.clone(),
        config.selection_settings(),
    );
    TrackCache::new(store, fetcher, config.cache_settings())
}
