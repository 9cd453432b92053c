pub mod baseline;
pub mod monitor;
pub mod summary;

use crate::core::items::TrackedItems;
use crate::core::settings::Settings;
use crate::providers::SteamWorkshopClient;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config: PathBuf,
    pub items: PathBuf,
    pub snapshot: PathBuf,
}

pub struct Startup {
    pub settings: Settings,
    pub items: TrackedItems,
    pub client: SteamWorkshopClient,
}

impl Startup {
    pub fn load(paths: &AppPaths) -> Result<Self> {
        let settings = Settings::load(&paths.config)?;
        let items = TrackedItems::load(&paths.items)?;
        let client = SteamWorkshopClient::from_settings(&settings);

        Ok(Self {
            settings,
            items,
            client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ConfigError;
    use tempfile::TempDir;

    fn paths(dir: &TempDir) -> AppPaths {
        AppPaths {
            config: dir.path().join("config.json"),
            items: dir.path().join("workshop_items.txt"),
            snapshot: dir.path().join("previous_workshop_data.json"),
        }
    }

    #[test]
    fn test_startup_requires_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("workshop_items.txt"), "1\n").unwrap();

        let err = Startup::load(&paths(&dir)).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_startup_rejects_empty_items() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.json"),
            r#"{"apiKey": "k", "userId": "1"}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("workshop_items.txt"), "\n").unwrap();

        let err = Startup::load(&paths(&dir)).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ItemsEmpty(_))
        ));
    }

    #[test]
    fn test_startup_loads_everything() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.json"),
            r#"{"apiKey": "k", "userId": "1"}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("workshop_items.txt"), "10\n20\n").unwrap();

        let startup = Startup::load(&paths(&dir)).unwrap();
        assert_eq!(startup.items.len(), 2);
        assert_eq!(startup.settings.api_key, "k");
    }
}
