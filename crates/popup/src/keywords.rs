/// The user's keyword list. Entries are trimmed, non-empty and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordList {
    items: Vec<String>,
}

impl KeywordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from stored values, dropping entries `add` would reject.
    pub fn from_stored(values: impl IntoIterator<Item = String>) -> Self {
        let mut list = Self::new();
        for value in values {
            list.add(&value);
        }
        list
    }

    /// Adds the trimmed `input`. Returns false for blanks and duplicates.
    pub fn add(&mut self, input: &str) -> bool {
        let keyword = input.trim();
        if keyword.is_empty() || self.items.iter().any(|k| k == keyword) {
            return false;
        }
        self.items.push(keyword.to_string());
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}
