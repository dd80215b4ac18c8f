use crate::error::PopupError;
use crate::palette::Palette;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_PATH: &str = "multifind-keywords.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub palette: Palette,
    pub store_path: PathBuf,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

impl PopupConfig {
    pub fn from_file(path: &Path) -> Result<Self, PopupError> {
        let contents = std::fs::read_to_string(path).map_err(|source| PopupError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, PopupError> {
        let config: PopupConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PopupError> {
        if self.palette.is_empty() {
            return Err(PopupError::Invalid("palette must not be empty".into()));
        }
        if let Some(bad) = self.palette.colors().iter().find(|c| c.trim().is_empty()) {
            return Err(PopupError::Invalid(format!("blank palette color {bad:?}")));
        }
        Ok(())
    }
}
