mod common;

use common::{FakeCatalog, resolved, uris};
use indicatif::ProgressBar;
use playport::{
    PortError, cli,
    reconciler::Reconciler,
    types::{PlaylistItem, ReconcilePhase, ResolvedTrack},
    utils::MAX_BATCH_SIZE,
};

fn resolved_tracks(uris: &[String]) -> Vec<ResolvedTrack> {
    uris.iter()
        .map(|uri| resolved(uri, Some(uri.as_str())))
        .collect()
}

#[tokio::test]
async fn test_fetch_all_pages_until_empty() {
    let existing = uris("old", 7);
    let catalog = FakeCatalog::new()
        .with_playlist(&existing)
        .with_page_size(3);

    let items = Reconciler::new(&catalog, "pl").fetch_all().await.unwrap();

    let fetched: Vec<String> = items
        .iter()
        .filter_map(|i| i.uri().map(str::to_string))
        .collect();
    assert_eq!(fetched, existing);
    assert_eq!(catalog.list_offsets(), vec![0, 3, 6, 7]);
}

#[tokio::test]
async fn test_fetch_all_on_empty_playlist() {
    let catalog = FakeCatalog::new();

    let items = Reconciler::new(&catalog, "pl").fetch_all().await.unwrap();

    assert!(items.is_empty());
    assert_eq!(catalog.list_offsets(), vec![0]);
}

#[tokio::test]
async fn test_fetch_all_counts_entries_without_track() {
    let catalog = FakeCatalog::new()
        .with_items(vec![
            PlaylistItem::with_uri("a"),
            PlaylistItem { track: None },
            PlaylistItem::with_uri("b"),
        ])
        .with_page_size(2);

    let items = Reconciler::new(&catalog, "pl").fetch_all().await.unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(catalog.list_offsets(), vec![0, 2, 3]);
}

#[tokio::test]
async fn test_delete_all_in_capped_batches() {
    let existing = uris("old", 120);
    let catalog = FakeCatalog::new().with_playlist(&existing);
    let reconciler = Reconciler::new(&catalog, "pl");

    let items = reconciler.fetch_all().await.unwrap();
    let report = reconciler.delete_all(&items, &ProgressBar::hidden()).await;

    let removes = catalog.removes();
    assert!(removes.iter().all(|b| b.len() <= MAX_BATCH_SIZE));
    assert_eq!(removes.iter().map(Vec::len).collect::<Vec<_>>(), vec![50, 50, 20]);
    assert_eq!(removes.concat(), existing);
    assert_eq!(report.batches, 3);
    assert_eq!(report.succeeded, 120);
    assert!(report.is_clean());
    assert!(catalog.playlist_uris().is_empty());
}

#[tokio::test]
async fn test_insert_all_preserves_order_and_skips_unresolved() {
    let wanted = uris("new", 75);
    let mut tracks = resolved_tracks(&wanted);
    tracks.insert(10, resolved("unmatched", None));
    tracks.insert(60, resolved("also unmatched", None));

    let catalog = FakeCatalog::new();
    let report = Reconciler::new(&catalog, "pl")
        .insert_all(&tracks, &ProgressBar::hidden())
        .await;

    let adds = catalog.adds();
    assert_eq!(adds.iter().map(Vec::len).collect::<Vec<_>>(), vec![50, 25]);
    assert_eq!(adds.concat(), wanted);
    assert_eq!(report.succeeded, 75);
    assert_eq!(catalog.playlist_uris(), wanted);
}

#[tokio::test]
async fn test_reconcile_replaces_playlist_in_phase_order() {
    let existing = uris("old", 130);
    let wanted = uris("new", 55);
    let catalog = FakeCatalog::new()
        .with_playlist(&existing)
        .with_page_size(100);
    let mut phases = Vec::new();

    let report = Reconciler::new(&catalog, "pl")
        .reconcile(&resolved_tracks(&wanted), &ProgressBar::hidden(), |p| {
            phases.push(p)
        })
        .await
        .unwrap();

    assert_eq!(
        phases,
        vec![
            ReconcilePhase::Fetching,
            ReconcilePhase::Deleting,
            ReconcilePhase::Inserting,
            ReconcilePhase::Done,
        ]
    );
    assert_eq!(report.fetched, 130);
    assert_eq!(report.removed.succeeded, 130);
    assert_eq!(report.added.as_ref().map(|a| a.succeeded), Some(55));
    assert_eq!(report.failure(), None);
    assert_eq!(catalog.playlist_uris(), wanted);

    // Every delete is issued before the first insert
    let calls = catalog.calls();
    let last_remove = calls
        .iter()
        .rposition(|c| matches!(c, common::Call::Remove(_)))
        .unwrap();
    let first_add = calls
        .iter()
        .position(|c| matches!(c, common::Call::Add(_)))
        .unwrap();
    assert!(last_remove < first_add);
}

#[tokio::test]
async fn test_delete_failure_skips_insertion() {
    let existing = uris("old", 120);
    let catalog = FakeCatalog::new()
        .with_playlist(&existing)
        .failing_remove(1);
    let mut phases = Vec::new();

    let report = Reconciler::new(&catalog, "pl")
        .reconcile(&resolved_tracks(&uris("new", 3)), &ProgressBar::hidden(), |p| {
            phases.push(p)
        })
        .await
        .unwrap();

    // Remaining delete batches are still attempted
    assert_eq!(catalog.removes().len(), 3);
    assert_eq!(report.removed.failures.len(), 1);
    assert_eq!(report.removed.failures[0].index, 1);
    assert_eq!(report.removed.failures[0].size, 50);
    assert_eq!(report.removed.succeeded, 70);

    assert_eq!(report.added, None);
    assert!(catalog.adds().is_empty());
    assert!(!phases.contains(&ReconcilePhase::Inserting));
    assert_eq!(report.failure(), Some((ReconcilePhase::Deleting, 1, 3)));
}

#[tokio::test]
async fn test_insert_failure_keeps_going() {
    let wanted = uris("new", 120);
    let catalog = FakeCatalog::new().failing_add(0);

    let report = Reconciler::new(&catalog, "pl")
        .reconcile(&resolved_tracks(&wanted), &ProgressBar::hidden(), |_| {})
        .await
        .unwrap();

    let added = report.added.clone().unwrap();
    assert_eq!(catalog.adds().len(), 3);
    assert_eq!(added.failures.len(), 1);
    assert_eq!(added.succeeded, 70);
    assert_eq!(catalog.playlist_uris(), wanted[50..].to_vec());
    assert_eq!(report.failure(), Some((ReconcilePhase::Inserting, 1, 3)));
}

#[tokio::test]
async fn test_replace_playlist_reports_partial_failure() {
    let catalog = FakeCatalog::new()
        .with_playlist(&uris("old", 10))
        .failing_remove(0);

    let result = cli::replace_playlist(&catalog, "pl", &resolved_tracks(&uris("new", 2))).await;

    match result {
        Err(PortError::PartialFailure {
            phase,
            failed,
            total,
        }) => {
            assert_eq!(phase, ReconcilePhase::Deleting);
            assert_eq!(failed, 1);
            assert_eq!(total, 1);
        }
        other => panic!("Expected PartialFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_replace_playlist_succeeds() {
    let wanted = uris("new", 3);
    let catalog = FakeCatalog::new().with_playlist(&uris("old", 4));

    cli::replace_playlist(&catalog, "pl", &resolved_tracks(&wanted))
        .await
        .unwrap();

    assert_eq!(catalog.playlist_uris(), wanted);
}
