use crate::core::error::ConfigError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_ITEMS_PATH: &str = "workshop_items.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedItems {
    ids: Vec<String>,
}

impl TrackedItems {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ItemsNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let items = Self::parse(path, &content)?;
        tracing::info!(?path, count = items.len(), "Loaded tracked items");
        Ok(items)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();

        for id in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if seen.insert(id) {
                ids.push(id.to_string());
            } else {
                tracing::warn!(item_id = id, "Duplicate item id in tracked list, ignoring");
            }
        }

        if ids.is_empty() {
            return Err(ConfigError::ItemsEmpty(path.to_path_buf()));
        }

        Ok(Self { ids })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

pub fn default_items_path() -> PathBuf {
    PathBuf::from(DEFAULT_ITEMS_PATH)
}
