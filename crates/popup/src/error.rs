use bus::BusError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PopupError {
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write `{path}`: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("`{path}` is not a valid keyword store: {source}")]
    StoreFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Bus(#[from] BusError),
    #[error("page answered with an unexpected response")]
    UnexpectedResponse,
}
