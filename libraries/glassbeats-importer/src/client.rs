//! Client for the hosted proxy functions.
//!
//! Search, metadata, and import requests never hit the external platforms
//! directly; they go through serverless proxy functions deployed next to
//! the store, which hold the API credentials. Every call is a POST with a
//! small JSON body, authenticated the same way as the store itself.

use crate::error::{ImportError, Result};
use crate::parse;
use crate::types::{CatalogImport, CatalogTrack, PlaylistImport, SearchResult};
use async_trait::async_trait;
use glassbeats_core::error::Result as CoreResult;
use glassbeats_core::traits::MetadataProvider;
use glassbeats_core::types::{Song, VideoId, VideoMetadata};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Connection settings for the proxy functions.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Base URL of the hosting project (no trailing slash required)
    pub base_url: String,

    /// Project api key sent with every request
    pub api_key: String,

    /// Bearer token of the authenticated user
    pub access_token: String,
}

impl ProxyConfig {
    /// Create a config from URL, api key, and user token.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: access_token.into(),
        }
    }
}

// ===== Wire shapes =====

#[derive(Debug, Deserialize)]
struct MetadataResponse {
    title: String,
    artist: String,
    thumbnail: String,
    duration: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemRow {
    video_id: Option<String>,
    title: String,
    thumbnail: Option<String>,
    channel_title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchItemRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistResponse {
    videos: Vec<SearchItemRow>,
    playlist_title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogTrackRow {
    title: String,
    artist: String,
    thumbnail: Option<String>,
    duration: Option<u32>,
    youtube_id: Option<String>,
    youtube_thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    tracks: Vec<CatalogTrackRow>,
    total: usize,
    matched: usize,
}

impl SearchItemRow {
    /// Rows for private/deleted videos come back without an identifier and
    /// are skipped.
    fn into_result(self) -> Option<SearchResult> {
        let raw = self.video_id?;
        let video_id = match VideoId::parse(&raw) {
            Ok(id) => id,
            Err(err) => {
                warn!(video_id = %raw, error = %err, "skipping result with bad video id");
                return None;
            }
        };
        let thumbnail = self
            .thumbnail
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| video_id.default_thumbnail());
        Some(SearchResult {
            video_id,
            title: self.title,
            thumbnail,
            channel_title: self.channel_title.unwrap_or_else(|| "Unknown".to_string()),
        })
    }
}

// ===== Client =====

/// HTTP client for the metadata/search/import proxy functions.
pub struct ImporterClient {
    http: Client,
    base_url: String,
    api_key: String,
    access_token: String,
}

impl ImporterClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ImportError::invalid_input("URL cannot be empty"));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ImportError::invalid_input(
                "URL must start with http:// or https://",
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("GlassBeats/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ImportError::Request)?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
            access_token: config.access_token,
        })
    }

    /// Invoke one proxy function with a JSON body.
    async fn invoke<T: DeserializeOwned>(
        &self,
        function: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}/functions/v1/{}", self.base_url, function);
        debug!(function, "invoking proxy function");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .header("apikey", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ImportError::Unreachable(e.to_string())
                } else {
                    ImportError::Request(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ImportError::Service {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ImportError::ParseError(format!("{function}: {e}")))
    }

    // ===== Metadata =====

    /// Fetch canonical title/artist/thumbnail for a video.
    ///
    /// Errors propagate; use [`song_for`](Self::song_for) for the
    /// placeholder-fallback behavior.
    pub async fn fetch_metadata(&self, video_id: &VideoId) -> Result<VideoMetadata> {
        let response: MetadataResponse = self
            .invoke(
                "fetch-youtube-metadata",
                &json!({ "videoId": video_id.as_str() }),
            )
            .await?;

        let thumbnail = if response.thumbnail.is_empty() {
            video_id.default_thumbnail()
        } else {
            response.thumbnail
        };
        Ok(VideoMetadata {
            title: response.title,
            artist: response.artist,
            thumbnail,
            duration_seconds: response.duration,
        })
    }

    /// Build a song for a video, falling back to placeholder metadata when
    /// the metadata service is unreachable. The operation always succeeds
    /// from the caller's perspective.
    pub async fn song_for(&self, video_id: &VideoId) -> Song {
        match self.fetch_metadata(video_id).await {
            Ok(metadata) => {
                let mut song =
                    Song::from_video(video_id.clone(), metadata.title, metadata.artist);
                song.thumbnail = metadata.thumbnail;
                song.duration_seconds = metadata.duration_seconds;
                song
            }
            Err(err) => {
                warn!(video_id = %video_id, error = %err, "metadata fetch failed, using placeholder");
                Song::placeholder(video_id.clone())
            }
        }
    }

    /// Resolve a pasted video URL to a song.
    ///
    /// A URL that matches no known shape is rejected synchronously as a
    /// user input error; nothing goes over the wire.
    pub async fn song_from_url(&self, input: &str) -> Result<Song> {
        let video_id = parse::extract_video_id(input)
            .ok_or_else(|| ImportError::invalid_input("not a recognizable video URL"))?;
        Ok(self.song_for(&video_id).await)
    }

    // ===== Search =====

    /// Free-text search on the video platform, ordered by relevance.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ImportError::invalid_input("search query cannot be empty"));
        }

        let response: SearchResponse = self
            .invoke("youtube-search", &json!({ "query": query }))
            .await?;

        Ok(response
            .results
            .into_iter()
            .filter_map(SearchItemRow::into_result)
            .collect())
    }

    // ===== Playlist import =====

    /// Import an external playlist by URL or bare identifier.
    ///
    /// Pagination is drained by the proxy; the returned items are the full
    /// playlist in order, minus private/deleted entries.
    pub async fn import_playlist(&self, input: &str) -> Result<PlaylistImport> {
        let playlist_id = parse::extract_playlist_id(input)
            .ok_or_else(|| ImportError::invalid_input("not a recognizable playlist URL"))?;

        let response: PlaylistResponse = self
            .invoke("youtube-playlist", &json!({ "playlistId": playlist_id }))
            .await?;

        let items: Vec<SearchResult> = response
            .videos
            .into_iter()
            .filter_map(SearchItemRow::into_result)
            .collect();
        info!(playlist_id, items = items.len(), "playlist import fetched");

        Ok(PlaylistImport {
            title: response
                .playlist_title
                .unwrap_or_else(|| "YouTube Playlist".to_string()),
            items,
        })
    }

    // ===== Catalog import =====

    /// Import a catalog track/album/playlist by URL.
    ///
    /// The link shape is validated before the call; the proxy resolves each
    /// catalog track to a playable video and drops unmatched ones, and the
    /// counts carry how lossy that was.
    pub async fn import_catalog(&self, input: &str) -> Result<CatalogImport> {
        let reference = parse::parse_catalog_ref(input)
            .ok_or_else(|| ImportError::invalid_input("not a recognizable catalog URL"))?;
        debug!(?reference, "catalog import");

        let response: CatalogResponse = self
            .invoke("spotify-import", &json!({ "url": input.trim() }))
            .await?;

        let mut tracks = Vec::with_capacity(response.tracks.len());
        for row in response.tracks {
            let Some(raw) = row.youtube_id else {
                continue;
            };
            let video_id = match VideoId::parse(&raw) {
                Ok(id) => id,
                Err(err) => {
                    warn!(video_id = %raw, error = %err, "skipping track with bad video id");
                    continue;
                }
            };
            let thumbnail = row
                .thumbnail
                .filter(|t| !t.is_empty())
                .or_else(|| row.youtube_thumbnail.filter(|t| !t.is_empty()))
                .unwrap_or_else(|| video_id.default_thumbnail());
            tracks.push(CatalogTrack {
                title: row.title,
                artist: row.artist,
                thumbnail,
                duration_seconds: row.duration,
                video_id,
            });
        }
        info!(
            total = response.total,
            matched = response.matched,
            "catalog import resolved"
        );

        Ok(CatalogImport {
            tracks,
            total: response.total,
            matched: response.matched,
        })
    }
}

#[async_trait]
impl MetadataProvider for ImporterClient {
    async fn fetch_metadata(&self, video_id: &VideoId) -> CoreResult<VideoMetadata> {
        ImporterClient::fetch_metadata(self, video_id)
            .await
            .map_err(Into::into)
    }
}
