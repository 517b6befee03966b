use crate::{
    cli::{reconcile::replace_playlist, report},
    config::{SourceConfig, SpotifyConfig},
    error::Result,
    info,
    management::SnapshotManager,
    resolver::Resolver,
    source::{Extractor, chromium::ChromiumDriver},
    spotify::SpotifyClient,
    success,
    types::SourceTrack,
    warning,
};

/// Runs the whole pipeline: scrape, resolve, snapshot, reconcile.
///
/// Nothing is rolled back when a later stage fails; the snapshot written
/// after resolution is what `playport reconcile` picks up.
pub async fn migrate(
    source: &SourceConfig,
    spotify: &SpotifyConfig,
    snapshot: &SnapshotManager,
) -> Result<()> {
    let songs = scrape(source).await?;
    success!("{} Songs found on source playlist", songs.len());
    if songs.is_empty() {
        warning!("The source playlist is empty, the destination playlist will be emptied");
    }

    let client = SpotifyClient::new(spotify);
    let resolver = Resolver::new(&client, spotify.search_delay);

    let pb = report::progress_bar(songs.len(), "Searching Spotify");
    let outcome = resolver.resolve_all(songs, &pb).await;
    pb.finish_and_clear();

    snapshot.persist(&source.url, &outcome.tracks).await?;
    info!("Resolved songs saved to {}", snapshot.path().display());

    report::print_resolve_outcome(&outcome);

    replace_playlist(&client, &spotify.playlist_id, &outcome.tracks).await
}

async fn scrape(source: &SourceConfig) -> Result<Vec<SourceTrack>> {
    let pb = report::spinner("Fetching Songs from Apple Playlist...");

    let driver = match ChromiumDriver::launch(source.headless).await {
        Ok(driver) => driver,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    let songs = Extractor::new(&driver, &source.layout)
        .extract(&source.url)
        .await;

    if let Err(e) = driver.shutdown().await {
        pb.suspend(|| warning!("Failed to close the browser: {}", e));
    }
    pb.finish_and_clear();

    songs
}
