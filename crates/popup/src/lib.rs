//! The control surface: keyword list management, persistence, and the
//! search/clear commands sent to a page.

mod config;
mod error;
mod keywords;
mod palette;
mod store;
mod summary;

pub use crate::config::{DEFAULT_STORE_PATH, PopupConfig};
pub use crate::error::PopupError;
pub use crate::keywords::KeywordList;
pub use crate::palette::{DEFAULT_PALETTE, Palette};
pub use crate::store::{KEYWORDS_KEY, KeywordStore};
pub use crate::summary::{CLEARED_LABEL, MatchSummary};

use bus::{ContentRequest, ContentResponse, PageClient};

#[derive(Debug)]
pub struct Popup {
    keywords: KeywordList,
    palette: Palette,
    store: KeywordStore,
}

impl Popup {
    /// Opens the popup, restoring the saved keyword list.
    pub fn open(config: PopupConfig) -> Result<Self, PopupError> {
        config.validate()?;
        let store = KeywordStore::new(config.store_path);
        let keywords = store.load()?;
        Ok(Self {
            keywords,
            palette: config.palette,
            store,
        })
    }

    pub fn keywords(&self) -> &KeywordList {
        &self.keywords
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Adds a keyword and saves. Returns false if it was rejected.
    pub fn add_keyword(&mut self, input: &str) -> Result<bool, PopupError> {
        if !self.keywords.add(input) {
            return Ok(false);
        }
        self.store.save(&self.keywords)?;
        Ok(true)
    }

    pub fn remove_keyword(&mut self, index: usize) -> Result<Option<String>, PopupError> {
        let removed = self.keywords.remove(index);
        if removed.is_some() {
            self.store.save(&self.keywords)?;
        }
        Ok(removed)
    }

    /// Highlights the whole list on the page and waits for the counts.
    pub fn search(&self, page: &PageClient) -> Result<MatchSummary, PopupError> {
        let request = ContentRequest::Highlight {
            keywords: self.keywords.as_slice().to_vec(),
            colors: self.palette.colors().to_vec(),
        };
        match page.send(request)? {
            ContentResponse::Matches { matches } => Ok(MatchSummary::new(&self.keywords, &matches)),
            ContentResponse::Cleared { .. } => Err(PopupError::UnexpectedResponse),
        }
    }

    /// Clears the page without waiting, then empties and saves the list.
    pub fn clear_all(&mut self, page: &PageClient) -> Result<(), PopupError> {
        if let Err(err) = page.post(ContentRequest::Clear) {
            log::warn!(target: "popup", "clear not delivered: {err}");
        }
        self.keywords.clear();
        self.store.save(&self.keywords)
    }
}
