//! Catalog Resolver: matches scraped tracks to catalog URIs.
//!
//! Each track is searched as `"<title> <artist>"`. If that returns nothing
//! and the title carries parenthesized annotations (remix, live, feat. tags),
//! a second search runs with those removed. The top result of whichever pass
//! produced one is used.
//!
//! Tracks are resolved one at a time with a fixed pause after every track,
//! which keeps the request rate under the API's limit. A failed search only
//! marks that track unresolved.

use std::time::Duration;

use indicatif::ProgressBar;
use tokio::time::sleep;

use crate::{
    error::Result,
    spotify::Catalog,
    types::{CatalogTrack, MatchPass, Resolution, ResolveSummary, ResolvedTrack, SourceTrack},
    utils, warning,
};

/// Result of resolving a whole track list.
#[derive(Debug, Clone)]
pub struct ResolveOutcome {
    /// Same length and order as the input.
    pub tracks: Vec<ResolvedTrack>,
    /// Per-track outcome, positionally aligned with `tracks`.
    pub resolutions: Vec<Resolution>,
    pub summary: ResolveSummary,
}

pub struct Resolver<'a, C: Catalog> {
    catalog: &'a C,
    delay: Duration,
}

impl<'a, C: Catalog> Resolver<'a, C> {
    pub fn new(catalog: &'a C, delay: Duration) -> Self {
        Self { catalog, delay }
    }

    /// Runs the two-pass search for one track.
    ///
    /// Returns `Ok(None)` when neither pass found anything.
    pub async fn find(&self, track: &SourceTrack) -> Result<Option<(CatalogTrack, MatchPass)>> {
        let results = self
            .catalog
            .search_tracks(&utils::literal_query(track))
            .await?;
        if let Some(top) = results.into_iter().next() {
            return Ok(Some((top, MatchPass::Literal)));
        }

        let Some(query) = utils::fallback_query(track) else {
            return Ok(None);
        };
        let results = self.catalog.search_tracks(&query).await?;
        Ok(results
            .into_iter()
            .next()
            .map(|top| (top, MatchPass::Fallback)))
    }

    /// Resolves one track, turning search errors into
    /// [`Resolution::Failed`].
    pub async fn resolve(&self, track: SourceTrack) -> (ResolvedTrack, Resolution) {
        match self.find(&track).await {
            Ok(Some((found, pass))) => (
                ResolvedTrack::matched(track, found),
                Resolution::Matched(pass),
            ),
            Ok(None) => (ResolvedTrack::unresolved(track), Resolution::NoMatch),
            Err(e) => (
                ResolvedTrack::unresolved(track),
                Resolution::Failed(e.to_string()),
            ),
        }
    }

    /// Resolves every track in order, one request chain at a time.
    ///
    /// `progress` is advanced once per track; pass [`ProgressBar::hidden`]
    /// for silent runs.
    pub async fn resolve_all(
        &self,
        tracks: Vec<SourceTrack>,
        progress: &ProgressBar,
    ) -> ResolveOutcome {
        let mut outcome = ResolveOutcome {
            tracks: Vec::with_capacity(tracks.len()),
            resolutions: Vec::with_capacity(tracks.len()),
            summary: ResolveSummary::default(),
        };

        for track in tracks {
            let (resolved, resolution) = self.resolve(track).await;

            if let Resolution::Failed(reason) = &resolution {
                progress.suspend(|| {
                    warning!(
                        "Search failed for {} - {}: {}",
                        resolved.title,
                        resolved.artist,
                        reason
                    )
                });
            }

            outcome.summary.record(&resolution);
            outcome.tracks.push(resolved);
            outcome.resolutions.push(resolution);

            sleep(self.delay).await;
            progress.inc(1);
        }

        outcome
    }
}
