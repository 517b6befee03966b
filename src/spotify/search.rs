use crate::{
    error::Result,
    spotify::{SpotifyClient, ensure_success},
    types::{CatalogTrack, SearchResponse},
};

impl SpotifyClient {
    /// Searches the catalog for tracks matching `query`.
    ///
    /// Returns the ranked result list, which is empty when nothing matched.
    /// A response without a `tracks` object is also treated as no results.
    ///
    /// # API Endpoint
    ///
    /// `GET /search?q={query}&type=track`
    pub async fn search(&self, query: &str) -> Result<Vec<CatalogTrack>> {
        let response = self
            .http
            .get(self.url("/search"))
            .bearer_auth(&self.token)
            .query(&[("q", query), ("type", "track")])
            .send()
            .await?;

        let json = ensure_success(response)
            .await?
            .json::<SearchResponse>()
            .await?;

        Ok(json.tracks.map(|t| t.items).unwrap_or_default())
    }
}
