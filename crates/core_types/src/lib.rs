use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub type RequestId = u64;

/// Per-keyword match counts, keyed by the literal keyword the caller supplied.
///
/// Entries keep first-insertion order so the wire object lists keywords the
/// way they were requested.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchTally {
    entries: Vec<(String, usize)>,
}

impl MatchTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `keyword` to zero, inserting it if it is not present yet.
    pub fn reset(&mut self, keyword: &str) {
        match self.position(keyword) {
            Some(i) => self.entries[i].1 = 0,
            None => self.entries.push((keyword.to_string(), 0)),
        }
    }

    pub fn add(&mut self, keyword: &str, count: usize) {
        match self.position(keyword) {
            Some(i) => self.entries[i].1 = self.entries[i].1.saturating_add(count),
            None => self.entries.push((keyword.to_string(), count)),
        }
    }

    pub fn get(&self, keyword: &str) -> Option<usize> {
        self.position(keyword).map(|i| self.entries[i].1)
    }

    pub fn total(&self) -> usize {
        self.entries
            .iter()
            .fold(0usize, |acc, (_, n)| acc.saturating_add(*n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), *n))
    }

    fn position(&self, keyword: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == keyword)
    }
}

impl Serialize for MatchTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (keyword, count) in &self.entries {
            map.serialize_entry(keyword, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MatchTally {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TallyVisitor;

        impl<'de> Visitor<'de> for TallyVisitor {
            type Value = MatchTally;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping keywords to match counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<MatchTally, A::Error> {
                let mut tally = MatchTally::new();
                while let Some((keyword, count)) = access.next_entry::<String, usize>()? {
                    tally.reset(&keyword);
                    tally.add(&keyword, count);
                }
                Ok(tally)
            }
        }

        deserializer.deserialize_map(TallyVisitor)
    }
}
