use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{
    PortError, config,
    error::Result,
    types::{ResolvedTrack, Snapshot},
};

/// Persists the resolved track list between resolution and reconciliation.
///
/// The snapshot is the only recovery point of a run: when reconciliation
/// fails, `playport reconcile` can replay it without scraping or searching
/// again.
pub struct SnapshotManager {
    path: PathBuf,
}

impl SnapshotManager {
    /// Uses `path` when given, the default cache location otherwise.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.unwrap_or_else(Self::default_path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn persist(&self, source_url: &str, tracks: &[ResolvedTrack]) -> Result<Snapshot> {
        let snapshot = Snapshot {
            source_url: source_url.to_string(),
            created_at: Utc::now().to_rfc3339(),
            tracks: tracks.to_vec(),
        };

        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| self.error("create directory for", e))?;
        }

        let json = serde_json::to_string_pretty(&snapshot)?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| self.error("write", e))?;

        Ok(snapshot)
    }

    pub async fn load(&self) -> Result<Snapshot> {
        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.error("read", e))?;
        serde_json::from_str(&content).map_err(|e| self.error("parse", e))
    }

    fn error(&self, action: &str, err: impl std::fmt::Display) -> PortError {
        PortError::Snapshot(format!(
            "cannot {} {}: {}",
            action,
            self.path.display(),
            err
        ))
    }

    fn default_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/resolved-tracks.json");
        path
    }
}
