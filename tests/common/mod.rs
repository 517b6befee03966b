#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use playport::{
    PortError,
    error::Result,
    source::PageDriver,
    spotify::Catalog,
    types::{CatalogTrack, ExternalUrls, PlaylistItem, ResolvedTrack},
};

pub fn catalog_track(uri: &str) -> CatalogTrack {
    CatalogTrack {
        uri: uri.to_string(),
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/track/{}", uri)),
        },
    }
}

pub fn resolved(title: &str, uri: Option<&str>) -> ResolvedTrack {
    ResolvedTrack {
        title: title.to_string(),
        artist: "Artist".to_string(),
        external_url: None,
        catalog_uri: uri.map(str::to_string),
    }
}

pub fn uris(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{}:{}", prefix, i)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String),
    List(usize),
    Remove(Vec<String>),
    Add(Vec<String>),
}

/// In-memory catalog and playlist.
pub struct FakeCatalog {
    results: HashMap<String, Vec<CatalogTrack>>,
    failing_queries: HashSet<String>,
    failing_removes: HashSet<usize>,
    failing_adds: HashSet<usize>,
    page_size: usize,
    playlist: Mutex<Vec<PlaylistItem>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            results: HashMap::new(),
            failing_queries: HashSet::new(),
            failing_removes: HashSet::new(),
            failing_adds: HashSet::new(),
            page_size: 100,
            playlist: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_results(mut self, query: &str, uris: &[&str]) -> Self {
        self.results.insert(
            query.to_string(),
            uris.iter().map(|uri| catalog_track(uri)).collect(),
        );
        self
    }

    pub fn with_failing_query(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_string());
        self
    }

    pub fn with_playlist(self, uris: &[String]) -> Self {
        *self.playlist.lock().unwrap() = uris.iter().map(PlaylistItem::with_uri).collect();
        self
    }

    pub fn with_items(self, items: Vec<PlaylistItem>) -> Self {
        *self.playlist.lock().unwrap() = items;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Makes the `nth` remove request (zero based) fail.
    pub fn failing_remove(mut self, nth: usize) -> Self {
        self.failing_removes.insert(nth);
        self
    }

    /// Makes the `nth` add request (zero based) fail.
    pub fn failing_add(mut self, nth: usize) -> Self {
        self.failing_adds.insert(nth);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    pub fn list_offsets(&self) -> Vec<usize> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::List(offset) => Some(offset),
                _ => None,
            })
            .collect()
    }

    pub fn removes(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Remove(batch) => Some(batch),
                _ => None,
            })
            .collect()
    }

    pub fn adds(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Add(batch) => Some(batch),
                _ => None,
            })
            .collect()
    }

    pub fn playlist_uris(&self) -> Vec<String> {
        self.playlist
            .lock()
            .unwrap()
            .iter()
            .filter_map(|item| item.uri().map(str::to_string))
            .collect()
    }

    fn rejected(reason: &str) -> PortError {
        PortError::Api {
            status: 500,
            message: reason.to_string(),
        }
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search_tracks(&self, query: &str) -> Result<Vec<CatalogTrack>> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Search(query.to_string()));
        if self.failing_queries.contains(query) {
            return Err(Self::rejected("search failed"));
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }

    async fn playlist_items(&self, _playlist_id: &str, offset: usize) -> Result<Vec<PlaylistItem>> {
        self.calls.lock().unwrap().push(Call::List(offset));
        let playlist = self.playlist.lock().unwrap();
        if offset >= playlist.len() {
            return Ok(Vec::new());
        }
        let end = (offset + self.page_size).min(playlist.len());
        Ok(playlist[offset..end].to_vec())
    }

    async fn remove_tracks(&self, _playlist_id: &str, uris: &[String]) -> Result<()> {
        let nth = self.removes().len();
        self.calls.lock().unwrap().push(Call::Remove(uris.to_vec()));
        if self.failing_removes.contains(&nth) {
            return Err(Self::rejected("remove failed"));
        }
        self.playlist
            .lock()
            .unwrap()
            .retain(|item| item.uri().is_none_or(|uri| !uris.iter().any(|u| u == uri)));
        Ok(())
    }

    async fn add_tracks(&self, _playlist_id: &str, uris: &[String]) -> Result<()> {
        let nth = self.adds().len();
        self.calls.lock().unwrap().push(Call::Add(uris.to_vec()));
        if self.failing_adds.contains(&nth) {
            return Err(Self::rejected("add failed"));
        }
        self.playlist
            .lock()
            .unwrap()
            .extend(uris.iter().map(PlaylistItem::with_uri));
        Ok(())
    }
}

/// A page whose container grows as it is scrolled.
pub struct FakePage {
    state: Mutex<PageState>,
}

#[derive(Default)]
struct PageState {
    visited: Vec<String>,
    /// `None` never becomes ready.
    ready_after_polls: Option<usize>,
    /// Checks that error out before any succeeds.
    failing_polls: usize,
    polls: usize,
    heights: Vec<f64>,
    height_reads: usize,
    scrolled: f64,
    html: String,
}

impl FakePage {
    pub fn new(html: &str, heights: &[f64]) -> Self {
        Self {
            state: Mutex::new(PageState {
                ready_after_polls: Some(0),
                heights: heights.to_vec(),
                html: html.to_string(),
                ..Default::default()
            }),
        }
    }

    pub fn ready_after(self, polls: Option<usize>) -> Self {
        self.state.lock().unwrap().ready_after_polls = polls;
        self
    }

    pub fn failing_polls(self, polls: usize) -> Self {
        self.state.lock().unwrap().failing_polls = polls;
        self
    }

    pub fn polls(&self) -> usize {
        self.state.lock().unwrap().polls
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.clone()
    }

    pub fn height_reads(&self) -> usize {
        self.state.lock().unwrap().height_reads
    }

    pub fn scrolled(&self) -> f64 {
        self.state.lock().unwrap().scrolled
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.state.lock().unwrap().visited.push(url.to_string());
        Ok(())
    }

    async fn has_selector(&self, _selector: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let failing = state.polls < state.failing_polls;
        let ready = matches!(state.ready_after_polls, Some(n) if state.polls >= n);
        state.polls += 1;
        if failing {
            return Err(PortError::Browser("node lookup failed".to_string()));
        }
        Ok(ready)
    }

    async fn scroll_height(&self, _container: &str) -> Result<f64> {
        let mut state = self.state.lock().unwrap();
        let index = state.height_reads.min(state.heights.len().saturating_sub(1));
        let height = state.heights.get(index).copied().unwrap_or(0.0);
        state.height_reads += 1;
        Ok(height)
    }

    async fn scroll_by(&self, _container: &str, delta: f64) -> Result<()> {
        self.state.lock().unwrap().scrolled += delta;
        Ok(())
    }

    async fn content(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().html.clone())
    }
}
