//! Catalog playlist endpoints.

use crate::client::{read_json, send_error};
use crate::error::Result;
use reqwest::Client;
use sonora_core::types::CommitPlaylistResponse;
use sonora_core::{CatalogPlaylist, CommitPlaylistRequest, PlaylistId};
use tracing::{debug, info};

/// Playlist client for the Sonora backend.
pub struct PlaylistClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> PlaylistClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// List playlists saved on the media server.
    pub async fn list(&self) -> Result<Vec<CatalogPlaylist>> {
        let url = format!("{}/playlists", self.base_url);
        debug!(url = %url, "Fetching catalog playlists");

        let response = self.http.get(&url).send().await.map_err(send_error)?;
        let playlists: Vec<CatalogPlaylist> = read_json(response, "playlists").await?;

        debug!(count = playlists.len(), "Fetched catalog playlists");
        Ok(playlists)
    }

    /// Create a playlist or replace an existing playlist's contents.
    pub async fn commit(&self, request: &CommitPlaylistRequest) -> Result<PlaylistId> {
        let url = format!("{}/createPlaylist", self.base_url);
        debug!(url = %url, tracks = request.ids().len(), "Committing playlist");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(send_error)?;

        let committed: CommitPlaylistResponse = read_json(response, "playlist response").await?;
        info!(playlist_id = %committed.id, "Playlist saved");
        Ok(committed.id)
    }
}
