use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file {} not found. Create it with the 'apiKey' and 'userId' fields.", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Config file {} must contain a non-empty '{field}' field.", path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("Invalid '{field}' in {}: {message}", path.display())]
    Invalid {
        path: PathBuf,
        field: &'static str,
        message: String,
    },

    #[error("Tracked items file {} not found. Add Workshop item ids to it, one per line.", .0.display())]
    ItemsNotFound(PathBuf),

    #[error("Tracked items file {} is empty. Add Workshop item ids to it, one per line.", .0.display())]
    ItemsEmpty(PathBuf),

    #[error("Snapshot file {} is corrupt: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
