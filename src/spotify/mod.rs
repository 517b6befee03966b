//! # Spotify Integration Module
//!
//! This module is the only place that talks HTTP. It exposes the destination
//! service as the [`Catalog`] capability consumed by the resolver and the
//! reconciler, and implements it with [`SpotifyClient`] on top of `reqwest`.
//!
//! ## API Coverage
//!
//! - `GET /search` - track search, top result used ([`search`])
//! - `GET /playlists/{id}/tracks` - one page of playlist entries ([`playlist`])
//! - `DELETE /playlists/{id}/tracks` - remove up to 50 URIs ([`playlist`])
//! - `POST /playlists/{id}/tracks` - append up to 50 URIs ([`playlist`])
//!
//! Every request carries the configured bearer token. There is no retry and
//! no token refresh: a non-success status becomes [`PortError::Api`] carrying
//! the response body, and the caller decides whether it is fatal.

pub mod playlist;
pub mod search;

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::{
    PortError,
    config::SpotifyConfig,
    error::Result,
    types::{CatalogTrack, PlaylistItem},
};

/// The destination catalog and playlist operations the pipeline consumes.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Ranked track results for `query`, best match first.
    async fn search_tracks(&self, query: &str) -> Result<Vec<CatalogTrack>>;

    /// One page of playlist entries starting at `offset`. An empty page
    /// means the end of the playlist.
    async fn playlist_items(&self, playlist_id: &str, offset: usize) -> Result<Vec<PlaylistItem>>;

    async fn remove_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()>;

    /// Appends `uris` to the end of the playlist, in order.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()>;
}

pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: String,
    market: Option<String>,
}

impl SpotifyClient {
    pub fn new(config: &SpotifyConfig) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.clone(),
            token: config.token.clone(),
            market: config.market.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

#[async_trait]
impl Catalog for SpotifyClient {
    async fn search_tracks(&self, query: &str) -> Result<Vec<CatalogTrack>> {
        self.search(query).await
    }

    async fn playlist_items(&self, playlist_id: &str, offset: usize) -> Result<Vec<PlaylistItem>> {
        self.get_playlist_items(playlist_id, offset).await
    }

    async fn remove_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        self.delete_playlist_tracks(playlist_id, uris).await
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        self.add_playlist_tracks(playlist_id, uris).await
    }
}

/// Turns a non-success response into [`PortError::Api`].
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| status.to_string());
    Err(PortError::Api {
        status: status.as_u16(),
        message,
    })
}
