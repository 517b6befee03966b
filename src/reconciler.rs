//! Playlist Reconciler: replaces the destination playlist's contents.
//!
//! A run moves through [`ReconcilePhase::Fetching`], `Deleting`, `Inserting`
//! and `Done`, strictly in that order. Every request is issued sequentially so
//! the service sees all deletions before the first insertion, and a failure
//! can be attributed to exactly one batch.
//!
//! Delete and insert share one batch policy: every batch is attempted and
//! rejected ones are collected into a [`BatchReport`]. If any delete batch
//! failed, insertion is skipped so new tracks are never appended on top of
//! leftovers.

use indicatif::ProgressBar;

use crate::{
    error::Result,
    spotify::Catalog,
    types::{
        BatchFailure, BatchReport, PlaylistItem, ReconcilePhase, ReconcileReport, ResolvedTrack,
    },
    utils::{self, MAX_BATCH_SIZE},
    warning,
};

pub struct Reconciler<'a, C: Catalog> {
    catalog: &'a C,
    playlist_id: &'a str,
}

impl<'a, C: Catalog> Reconciler<'a, C> {
    pub fn new(catalog: &'a C, playlist_id: &'a str) -> Self {
        Self {
            catalog,
            playlist_id,
        }
    }

    /// Reads the whole playlist, one page at a time, until a page comes
    /// back empty.
    ///
    /// Each page is requested at the offset equal to the number of entries
    /// fetched so far.
    pub async fn fetch_all(&self) -> Result<Vec<PlaylistItem>> {
        let mut items: Vec<PlaylistItem> = Vec::new();
        let mut has_more = true;

        while has_more {
            let page = self
                .catalog
                .playlist_items(self.playlist_id, items.len())
                .await?;
            has_more = !page.is_empty();
            items.extend(page);
        }

        Ok(items)
    }

    /// Removes `items` from the playlist in batches of at most 50 URIs.
    ///
    /// Entries without a URI cannot be addressed and are left alone.
    pub async fn delete_all(&self, items: &[PlaylistItem], progress: &ProgressBar) -> BatchReport {
        let uris: Vec<String> = items
            .iter()
            .filter_map(|item| item.uri().map(str::to_string))
            .collect();

        let skipped = items.len() - uris.len();
        if skipped > 0 {
            progress.suspend(|| {
                warning!("{} playlist entries have no URI and stay in place", skipped)
            });
        }

        let mut report = BatchReport::default();
        for (index, batch) in utils::chunk(&uris, MAX_BATCH_SIZE).into_iter().enumerate() {
            report.batches += 1;
            match self.catalog.remove_tracks(self.playlist_id, &batch).await {
                Ok(()) => report.succeeded += batch.len(),
                Err(e) => {
                    progress.suspend(|| warning!("Delete batch {} failed: {}", index + 1, e));
                    report.failures.push(BatchFailure {
                        index,
                        size: batch.len(),
                        reason: e.to_string(),
                    });
                }
            }
            progress.inc(1);
        }

        report
    }

    /// Appends every resolved URI in source order, in batches of at most 50.
    ///
    /// Tracks without a catalog URI are skipped.
    pub async fn insert_all(
        &self,
        tracks: &[ResolvedTrack],
        progress: &ProgressBar,
    ) -> BatchReport {
        let uris = utils::insertable_uris(tracks);

        let mut report = BatchReport::default();
        for (index, batch) in utils::chunk(&uris, MAX_BATCH_SIZE).into_iter().enumerate() {
            report.batches += 1;
            match self.catalog.add_tracks(self.playlist_id, &batch).await {
                Ok(()) => report.succeeded += batch.len(),
                Err(e) => {
                    progress.suspend(|| warning!("Insert batch {} failed: {}", index + 1, e));
                    report.failures.push(BatchFailure {
                        index,
                        size: batch.len(),
                        reason: e.to_string(),
                    });
                }
            }
            progress.inc(1);
        }

        report
    }

    /// Runs fetch, delete and insert in order.
    ///
    /// `on_phase` is called on every phase transition, ending with
    /// [`ReconcilePhase::Done`].
    ///
    /// # Errors
    ///
    /// Only a failure while fetching is returned as an error. Batch failures
    /// are reported through [`ReconcileReport`].
    pub async fn reconcile<F>(
        &self,
        tracks: &[ResolvedTrack],
        progress: &ProgressBar,
        mut on_phase: F,
    ) -> Result<ReconcileReport>
    where
        F: FnMut(ReconcilePhase),
    {
        on_phase(ReconcilePhase::Fetching);
        let items = self.fetch_all().await?;

        on_phase(ReconcilePhase::Deleting);
        let removed = self.delete_all(&items, progress).await;

        let added = if removed.is_clean() {
            on_phase(ReconcilePhase::Inserting);
            Some(self.insert_all(tracks, progress).await)
        } else {
            None
        };

        on_phase(ReconcilePhase::Done);
        Ok(ReconcileReport {
            fetched: items.len(),
            removed,
            added,
        })
    }
}
