use crate::core::error::ConfigError;
use crate::core::models::ItemStats;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_SNAPSHOT_PATH: &str = "previous_workshop_data.json";

// Persisted value for one item. Key casing matches snapshot files written by earlier versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct SnapshotEntry {
    title: Option<String>,
    views: u64,
    subscriptions: u64,
    favorited: u64,
}

impl SnapshotEntry {
    fn into_stats(self, id: String) -> ItemStats {
        ItemStats {
            id,
            title: self.title,
            views: self.views,
            subscriptions: self.subscriptions,
            favorited: self.favorited,
        }
    }
}

impl From<&ItemStats> for SnapshotEntry {
    fn from(stats: &ItemStats) -> Self {
        Self {
            title: stats.title.clone(),
            views: stats.views,
            subscriptions: stats.subscriptions,
            favorited: stats.favorited,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotStore {
    entries: BTreeMap<String, ItemStats>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(?path, "No snapshot file, starting without previous session data");
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;

        let store = Self::from_json(&content).map_err(|source| ConfigError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(?path, items = store.len(), "Loaded snapshot");
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = self.to_json()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write snapshot file: {}", path.display()))?;

        tracing::debug!(?path, items = self.len(), "Saved snapshot");
        Ok(())
    }

    fn from_json(content: &str) -> serde_json::Result<Self> {
        let raw: BTreeMap<String, SnapshotEntry> = serde_json::from_str(content)?;
        let entries = raw
            .into_iter()
            .map(|(id, entry)| (id.clone(), entry.into_stats(id)))
            .collect();
        Ok(Self { entries })
    }

    fn to_json(&self) -> serde_json::Result<String> {
        let raw: BTreeMap<&str, SnapshotEntry> = self
            .entries
            .iter()
            .map(|(id, stats)| (id.as_str(), SnapshotEntry::from(stats)))
            .collect();
        serde_json::to_string_pretty(&raw)
    }

    pub fn get(&self, id: &str) -> Option<&ItemStats> {
        self.entries.get(id)
    }

    pub fn record(&mut self, stats: ItemStats) -> Option<ItemStats> {
        self.entries.insert(stats.id.clone(), stats)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn default_snapshot_path() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_PATH)
}
