use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One row scraped from the source playlist page, in on-page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTrack {
    pub title: String,
    pub artist: String,
}

impl SourceTrack {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

/// A source track augmented with its catalog match, if any.
///
/// `catalog_uri` is what the playlist endpoints accept; a track without one is
/// kept in the list but never inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTrack {
    pub title: String,
    pub artist: String,
    pub external_url: Option<String>,
    pub catalog_uri: Option<String>,
}

impl ResolvedTrack {
    pub fn unresolved(source: SourceTrack) -> Self {
        Self {
            title: source.title,
            artist: source.artist,
            external_url: None,
            catalog_uri: None,
        }
    }

    pub fn matched(source: SourceTrack, track: CatalogTrack) -> Self {
        Self {
            title: source.title,
            artist: source.artist,
            external_url: track.external_urls.spotify,
            catalog_uri: Some(track.uri),
        }
    }

    /// The catalog URI, if present and non-empty.
    pub fn uri(&self) -> Option<&str> {
        self.catalog_uri.as_deref().filter(|uri| !uri.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// A track item as returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogTrack {
    pub uri: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<CatalogTrackPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogTrackPage {
    pub items: Vec<CatalogTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
}

/// An entry currently stored on the destination playlist.
///
/// `track` is null for entries Spotify can no longer describe; such entries
/// still occupy an offset slot while paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

impl PlaylistItem {
    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            track: Some(PlaylistTrack { uri: uri.into() }),
        }
    }

    pub fn uri(&self) -> Option<&str> {
        self.track
            .as_ref()
            .map(|t| t.uri.as_str())
            .filter(|uri| !uri.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksFromPlaylistRequest {
    pub tracks: Vec<TrackUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSnapshotResponse {
    pub snapshot_id: String,
}

/// Which search pass produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPass {
    Literal,
    Fallback,
}

/// Outcome of resolving a single source track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(MatchPass),
    NoMatch,
    Failed(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    pub literal: usize,
    pub fallback: usize,
    pub unmatched: usize,
    pub failed: usize,
}

impl ResolveSummary {
    pub fn record(&mut self, resolution: &Resolution) {
        match resolution {
            Resolution::Matched(MatchPass::Literal) => self.literal += 1,
            Resolution::Matched(MatchPass::Fallback) => self.fallback += 1,
            Resolution::NoMatch => self.unmatched += 1,
            Resolution::Failed(_) => self.failed += 1,
        }
    }

    pub fn resolved(&self) -> usize {
        self.literal + self.fallback
    }

    pub fn total(&self) -> usize {
        self.resolved() + self.unmatched + self.failed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePhase {
    Fetching,
    Deleting,
    Inserting,
    Done,
}

impl fmt::Display for ReconcilePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReconcilePhase::Fetching => "Fetching",
            ReconcilePhase::Deleting => "Deleting",
            ReconcilePhase::Inserting => "Inserting",
            ReconcilePhase::Done => "Done",
        };
        f.write_str(name)
    }
}

/// A playlist batch request that was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub index: usize,
    pub size: usize,
    pub reason: String,
}

/// Outcome of a delete-all or insert-all phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub batches: usize,
    pub succeeded: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub fetched: usize,
    pub removed: BatchReport,
    /// `None` when insertion was skipped because deletion was incomplete.
    pub added: Option<BatchReport>,
}

impl ReconcileReport {
    /// The first phase that had rejected batches, with its counts.
    pub fn failure(&self) -> Option<(ReconcilePhase, usize, usize)> {
        if !self.removed.is_clean() {
            return Some((
                ReconcilePhase::Deleting,
                self.removed.failures.len(),
                self.removed.batches,
            ));
        }
        match &self.added {
            Some(added) if !added.is_clean() => Some((
                ReconcilePhase::Inserting,
                added.failures.len(),
                added.batches,
            )),
            _ => None,
        }
    }
}

/// The resolved track list as written to disk between resolution and
/// reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub source_url: String,
    pub created_at: String,
    pub tracks: Vec<ResolvedTrack>,
}

#[derive(Tabled)]
pub struct UnresolvedTableRow {
    pub position: usize,
    pub title: String,
    pub artist: String,
    pub reason: String,
}
