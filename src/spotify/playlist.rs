use crate::{
    error::Result,
    spotify::{SpotifyClient, ensure_success},
    types::{
        AddTrackToPlaylistRequest, PlaylistItem, PlaylistSnapshotResponse,
        PlaylistTracksResponse, RemoveTracksFromPlaylistRequest, TrackUri,
    },
};

impl SpotifyClient {
    /// Retrieves one page of a playlist's entries, starting at `offset`.
    ///
    /// The page size is left at the API default. When a market is
    /// configured it is passed along so relinked tracks resolve the same way
    /// the Spotify clients show them.
    ///
    /// # API Endpoint
    ///
    /// `GET /playlists/{id}/tracks?offset={offset}[&market={market}]`
    pub async fn get_playlist_items(
        &self,
        playlist_id: &str,
        offset: usize,
    ) -> Result<Vec<PlaylistItem>> {
        let mut request = self
            .http
            .get(self.url(&format!("/playlists/{}/tracks", playlist_id)))
            .bearer_auth(&self.token)
            .query(&[("offset", offset.to_string())]);
        if let Some(market) = &self.market {
            request = request.query(&[("market", market)]);
        }

        let response = ensure_success(request.send().await?).await?;
        let json = response.json::<PlaylistTracksResponse>().await?;

        Ok(json.items)
    }

    /// Removes every occurrence of `uris` from the playlist.
    ///
    /// # API Endpoint
    ///
    /// `DELETE /playlists/{id}/tracks` with `{"tracks": [{"uri": ...}]}`
    pub async fn delete_playlist_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let body = RemoveTracksFromPlaylistRequest {
            tracks: uris
                .iter()
                .map(|uri| TrackUri { uri: uri.clone() })
                .collect(),
        };

        let response = self
            .http
            .delete(self.url(&format!("/playlists/{}/tracks", playlist_id)))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        ensure_success(response)
            .await?
            .json::<PlaylistSnapshotResponse>()
            .await?;
        Ok(())
    }

    /// Appends `uris` to the end of the playlist.
    ///
    /// # API Endpoint
    ///
    /// `POST /playlists/{id}/tracks` with `{"uris": [...]}`
    pub async fn add_playlist_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };

        let response = self
            .http
            .post(self.url(&format!("/playlists/{}/tracks", playlist_id)))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        ensure_success(response)
            .await?
            .json::<PlaylistSnapshotResponse>()
            .await?;
        Ok(())
    }
}
