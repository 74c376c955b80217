use crate::error::TrackError;
use crate::models::TrackDescriptor;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const SEARCH_TYPE_TRACK: &str = "track";

/// Access token from the client-credentials exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Where the client id and secret travel in the token request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialTransport {
    /// `Authorization: Basic base64(id:secret)`
    #[default]
    BasicHeader,
    /// `client_id` and `client_secret` as extra form fields
    FormBody,
}

impl FromStr for CredentialTransport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "header" | "basic" => Ok(Self::BasicHeader),
            "form" | "body" => Ok(Self::FormBody),
            other => Err(format!("expected 'header' or 'form', got '{}'", other)),
        }
    }
}

/// The two upstream calls the cold path needs. Each call is exactly one
/// outbound request; callers decide what to do with failures.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn authenticate(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<BearerToken, TrackError>;

    async fn search(
        &self,
        token: &BearerToken,
        query: &str,
        search_type: &str,
        limit: u32,
    ) -> Result<Vec<TrackDescriptor>, TrackError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct SpotifySearchResponse {
    pub tracks: SpotifyTrackPage,
}

#[derive(Debug, Deserialize)]
pub struct SpotifyTrackPage {
    pub items: Vec<SpotifyTrack>,
}

#[derive(Debug, Deserialize)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub explicit: bool,
    pub album: SpotifyAlbum,
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Deserialize)]
pub struct SpotifyAlbum {
    pub name: String,
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

impl From<SpotifyTrack> for TrackDescriptor {
    fn from(track: SpotifyTrack) -> Self {
        TrackDescriptor {
            id: track.id,
            name: track.name,
            album_name: track.album.name,
            cover_urls: track.album.images.into_iter().map(|image| image.url).collect(),
            artists: track.artists.into_iter().map(|artist| artist.name).collect(),
            explicit: track.explicit,
        }
    }
}

pub struct SpotifyClient {
    client: Client,
    auth_url: String,
    api_url: String,
    transport: CredentialTransport,
    request_timeout: Duration,
}

impl SpotifyClient {
    pub fn new(
        auth_url: impl Into<String>,
        api_url: impl Into<String>,
        transport: CredentialTransport,
        request_timeout: Duration,
    ) -> Self {
        let api_url: String = api_url.into();

        Self {
            client: Client::new(),
            auth_url: auth_url.into(),
            api_url: api_url.trim_end_matches('/').to_string(),
            transport,
            request_timeout,
        }
    }
}

#[async_trait]
impl CatalogApi for SpotifyClient {
    async fn authenticate(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<BearerToken, TrackError> {
        let request = self
            .client
            .post(&self.auth_url)
            .timeout(self.request_timeout);

        let request = match self.transport {
            CredentialTransport::BasicHeader => {
                let credentials =
                    general_purpose::STANDARD.encode(format!("{}:{}", client_id, client_secret));
                request
                    .header(reqwest::header::AUTHORIZATION, format!("Basic {}", credentials))
                    .form(&[("grant_type", "client_credentials")])
            }
            CredentialTransport::FormBody => request.form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ]),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TrackError::Auth(format!("{} - {}", status.as_u16(), body)));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| TrackError::Auth(format!("malformed token response: {}", e)))?;

        Ok(BearerToken::new(token.access_token))
    }

    async fn search(
        &self,
        token: &BearerToken,
        query: &str,
        search_type: &str,
        limit: u32,
    ) -> Result<Vec<TrackDescriptor>, TrackError> {
        let url = format!(
            "{}/search?q={}&type={}&limit={}",
            self.api_url,
            urlencoding::encode(query),
            urlencoding::encode(search_type),
            limit
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.as_str())
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TrackError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SpotifySearchResponse =
            serde_json::from_str(&body).map_err(|e| TrackError::Upstream {
                status: status.as_u16(),
                body: format!("malformed search response: {}", e),
            })?;

        if parsed.tracks.items.is_empty() {
            return Err(TrackError::EmptyResult {
                query: query.to_string(),
            });
        }

        Ok(parsed
            .tracks
            .items
            .into_iter()
            .map(TrackDescriptor::from)
            .collect())
    }
}
