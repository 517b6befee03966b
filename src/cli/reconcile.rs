use crate::{
    PortError,
    cli::report,
    config::SpotifyConfig,
    error::Result,
    info,
    management::SnapshotManager,
    reconciler::Reconciler,
    spotify::{Catalog, SpotifyClient},
    types::{ReconcilePhase, ResolvedTrack},
    utils,
};

/// Replays a saved snapshot against the destination playlist.
///
/// This is the manual re-entry point after a failed run: scraping and
/// searching are skipped, only the reconciler runs.
pub async fn reconcile(spotify: &SpotifyConfig, snapshot: &SnapshotManager) -> Result<()> {
    let saved = snapshot.load().await?;
    info!(
        "Loaded {} resolved songs from {} (scraped from {} at {})",
        saved.tracks.len(),
        snapshot.path().display(),
        saved.source_url,
        saved.created_at
    );

    let client = SpotifyClient::new(spotify);
    replace_playlist(&client, &spotify.playlist_id, &saved.tracks).await
}

/// Replaces the playlist contents with `tracks` and prints the outcome.
///
/// # Errors
///
/// Fails when the playlist cannot be read, or with
/// [`PortError::PartialFailure`] when any batch was rejected.
pub async fn replace_playlist<C: Catalog>(
    catalog: &C,
    playlist_id: &str,
    tracks: &[ResolvedTrack],
) -> Result<()> {
    let insertable = utils::insertable_uris(tracks).len();
    info!(
        "Replacing playlist {} with {} resolved songs",
        playlist_id, insertable
    );

    let pb = report::spinner("Fetching songs from Playlist...");
    let reconciler = Reconciler::new(catalog, playlist_id);
    let result = reconciler
        .reconcile(tracks, &pb, |phase| match phase {
            ReconcilePhase::Fetching => pb.set_message("Fetching songs from Playlist..."),
            ReconcilePhase::Deleting => pb.set_message("Deleting songs from Playlist..."),
            ReconcilePhase::Inserting => pb.set_message("Adding songs to Playlist..."),
            ReconcilePhase::Done => pb.finish_and_clear(),
        })
        .await;

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    report::print_reconcile_report(&outcome);

    match outcome.failure() {
        Some((phase, failed, total)) => Err(PortError::PartialFailure {
            phase,
            failed,
            total,
        }),
        None => Ok(()),
    }
}
