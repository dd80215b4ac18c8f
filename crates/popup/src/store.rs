use crate::error::PopupError;
use crate::keywords::KeywordList;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const KEYWORDS_KEY: &str = "keywords";

/// A JSON object on disk. The keyword list lives under [`KEYWORDS_KEY`];
/// other keys are kept as found.
#[derive(Debug, Clone)]
pub struct KeywordStore {
    path: PathBuf,
}

impl KeywordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<KeywordList, PopupError> {
        let map = read_store_map(&self.path)?;
        let list = match map.get(KEYWORDS_KEY) {
            Some(Value::Array(values)) => KeywordList::from_stored(
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string)),
            ),
            Some(other) => {
                log::warn!(
                    target: "popup.store",
                    "ignoring non-list `{KEYWORDS_KEY}` in {}: {other}",
                    self.path.display()
                );
                KeywordList::new()
            }
            None => KeywordList::new(),
        };
        log::debug!(target: "popup.store", "loaded {} keywords", list.len());
        Ok(list)
    }

    pub fn save(&self, list: &KeywordList) -> Result<(), PopupError> {
        let mut map = read_store_map(&self.path)?;
        map.insert(
            KEYWORDS_KEY.to_string(),
            Value::Array(list.iter().map(|k| Value::String(k.to_string())).collect()),
        );
        write_store_map(&self.path, &map)?;
        log::debug!(target: "popup.store", "saved {} keywords", list.len());
        Ok(())
    }
}

fn read_store_map(path: &Path) -> Result<BTreeMap<String, Value>, PopupError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path).map_err(|source| PopupError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&content).map_err(|source| PopupError::StoreFormat {
        path: path.to_path_buf(),
        source,
    })
}

fn write_store_map(path: &Path, map: &BTreeMap<String, Value>) -> Result<(), PopupError> {
    let write_err = |source| PopupError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let encoded = serde_json::to_string_pretty(map).map_err(|source| PopupError::StoreFormat {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, encoded).map_err(write_err)
}
