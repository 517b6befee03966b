mod snapshot;

pub use snapshot::SnapshotManager;
