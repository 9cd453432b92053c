use crate::core::error::ConfigError;
use crate::monitor::MONITOR_INTERVAL;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSettings {
    api_key: Option<String>,
    user_id: Option<UserId>,
    interval_ms: Option<u64>,
    persist_monitoring: bool,
    desktop_notifications: bool,
    endpoint: Option<String>,
}

// Usually a quoted string; a bare number is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserId {
    Text(String),
    Number(u64),
}

impl UserId {
    fn into_string(self) -> String {
        match self {
            UserId::Text(s) => s.trim().to_string(),
            UserId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub user_id: String,
    pub interval: Duration,
    pub persist_monitoring: bool,
    pub desktop_notifications: bool,
    pub endpoint: Option<String>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = Self::parse(path, &content)?;
        tracing::info!(?path, user_id = %settings.user_id, "Loaded config");
        Ok(settings)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let raw: RawSettings = if is_toml(path) {
            toml::from_str(content).map_err(|e| parse_error(e.to_string()))?
        } else {
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
        };

        let missing = |field| ConfigError::MissingField {
            path: path.to_path_buf(),
            field,
        };

        let api_key = raw
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| missing("apiKey"))?;

        let user_id = raw
            .user_id
            .map(UserId::into_string)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| missing("userId"))?;

        let settings = Self {
            api_key,
            user_id,
            interval: raw
                .interval_ms
                .map(Duration::from_millis)
                .unwrap_or(MONITOR_INTERVAL),
            persist_monitoring: raw.persist_monitoring,
            desktop_notifications: raw.desktop_notifications,
            endpoint: raw.endpoint,
        };

        settings.validate(path)?;
        Ok(settings)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                field: "intervalMs",
                message: "must be greater than 0".to_string(),
            });
        }

        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::Invalid {
                    path: path.to_path_buf(),
                    field: "endpoint",
                    message: format!("expected an http(s) URL, got {}", endpoint),
                });
            }
        }

        Ok(())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_PATH)
}
