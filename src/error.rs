use std::path::PathBuf;

/// Setup errors. Anything that can go wrong inside the frame loop is
/// handled in place (skip or identity) instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse places {path}: {source}")]
    Places {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Terminal setup failed: {0}")]
    Terminal(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
