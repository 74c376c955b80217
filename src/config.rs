use crate::cache::fetcher::SelectionSettings;
use crate::cache::types::{
    CacheSettings, DEFAULT_READ_TIMEOUT, DEFAULT_TRACK_TTL_DAYS, MAX_TRACK_TTL_DAYS,
    MIN_TRACK_TTL_DAYS, days,
};
use crate::error::ConfigError;
use crate::selector::QueryPolicy;
use crate::spotify::{CredentialTransport, DEFAULT_API_URL, DEFAULT_AUTH_URL};
use std::str::FromStr;
use std::time::Duration;

/// Queries are separated by `|` because several contain commas.
pub const QUERY_SEPARATOR: char = '|';

pub const DEFAULT_QUERIES: &[&str] = &[
    "spellcasting artist",
    "kasane teto vocaloid",
    "kendrick lamar",
    "B1A4 kpop band",
    "le sserafim kpop band",
    "tyler, the creator song rap artist",
    "newjeans kpop band",
    "hatsune miku vocaloid",
    "glass beach rock band",
    "loossemble kpop band",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,

    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub api_url: String,
    pub credential_transport: CredentialTransport,
    pub http_timeout: Duration,

    pub queries: Vec<String>,
    pub query_policy: QueryPolicy,
    pub search_limit: u32,
    pub skip_explicit: bool,

    pub track_ttl_days: u64,
    pub cache_read_timeout: Duration,
    pub cache_capacity: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source, so tests do not have
    /// to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| lookup(name).filter(|value| !value.trim().is_empty());

        let queries = match var("SEARCH_QUERIES") {
            Some(raw) => parse_queries(&raw),
            None => DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
        };
        if queries.is_empty() {
            return Err(ConfigError::Invalid {
                name: "SEARCH_QUERIES",
                value: var("SEARCH_QUERIES").unwrap_or_default(),
                reason: "at least one query is required".to_string(),
            });
        }

        let search_limit: u32 = parse_or("SEARCH_LIMIT", var("SEARCH_LIMIT"), 10)?;
        check_range("SEARCH_LIMIT", search_limit as u64, 1, 50)?;

        let track_ttl_days: u64 =
            parse_or("TRACK_TTL_DAYS", var("TRACK_TTL_DAYS"), DEFAULT_TRACK_TTL_DAYS)?;
        check_range(
            "TRACK_TTL_DAYS",
            track_ttl_days,
            MIN_TRACK_TTL_DAYS,
            MAX_TRACK_TTL_DAYS,
        )?;

        let http_timeout_secs: u64 = parse_or(
            "SPOTIFY_HTTP_TIMEOUT_SECS",
            var("SPOTIFY_HTTP_TIMEOUT_SECS"),
            10,
        )?;
        check_range("SPOTIFY_HTTP_TIMEOUT_SECS", http_timeout_secs, 1, u64::MAX)?;

        let cache_read_timeout_ms: u64 = parse_or(
            "CACHE_READ_TIMEOUT_MS",
            var("CACHE_READ_TIMEOUT_MS"),
            DEFAULT_READ_TIMEOUT.as_millis() as u64,
        )?;
        check_range("CACHE_READ_TIMEOUT_MS", cache_read_timeout_ms, 1, u64::MAX)?;

        let cache_capacity: u64 = parse_or("CACHE_CAPACITY", var("CACHE_CAPACITY"), 1024)?;
        check_range("CACHE_CAPACITY", cache_capacity, 1, u64::MAX)?;

        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),

            client_id: var("SPOTIFY_CLIENT_ID").ok_or(ConfigError::Missing("SPOTIFY_CLIENT_ID"))?,
            client_secret: var("SPOTIFY_CLIENT_SECRET")
                .ok_or(ConfigError::Missing("SPOTIFY_CLIENT_SECRET"))?,
            auth_url: var("SPOTIFY_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            api_url: var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            credential_transport: parse_or(
                "SPOTIFY_CREDENTIALS_IN",
                var("SPOTIFY_CREDENTIALS_IN"),
                CredentialTransport::default(),
            )?,
            http_timeout: Duration::from_secs(http_timeout_secs),

            queries,
            query_policy: parse_or("QUERY_POLICY", var("QUERY_POLICY"), QueryPolicy::default())?,
            search_limit,
            skip_explicit: parse_or("SKIP_EXPLICIT", var("SKIP_EXPLICIT"), false)?,

            track_ttl_days,
            cache_read_timeout: Duration::from_millis(cache_read_timeout_ms),
            cache_capacity,
        })
    }

    pub fn selection_settings(&self) -> SelectionSettings {
        SelectionSettings {
            queries: self.queries.clone(),
            policy: self.query_policy,
            search_limit: self.search_limit,
            skip_explicit: self.skip_explicit,
        }
    }

    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            track_ttl: days(self.track_ttl_days),
            store_timeout: self.cache_read_timeout,
        }
    }
}

pub fn parse_queries(raw: &str) -> Vec<String> {
    raw.split(QUERY_SEPARATOR)
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value,
        }),
    }
}

fn check_range(name: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: format!("must be between {} and {}", min, max),
        })
    }
}
