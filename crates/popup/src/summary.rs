use crate::keywords::KeywordList;
use core_types::MatchTally;

/// Label shown after the list has been cleared.
pub const CLEARED_LABEL: &str = "0 matches found";

/// Match counts laid out for display, one row per listed keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSummary {
    rows: Vec<(String, usize)>,
    total: usize,
}

impl MatchSummary {
    /// Keywords missing from `tally` count as zero; tally keys not in the
    /// list are ignored.
    pub fn new(list: &KeywordList, tally: &MatchTally) -> Self {
        let rows: Vec<(String, usize)> = list
            .iter()
            .map(|keyword| (keyword.to_string(), tally.get(keyword).unwrap_or(0)))
            .collect();
        let total = rows.iter().fold(0usize, |acc, (_, n)| acc.saturating_add(*n));
        Self { rows, total }
    }

    pub fn rows(&self) -> &[(String, usize)] {
        &self.rows
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count_label(&self, index: usize) -> Option<String> {
        self.rows.get(index).map(|(_, n)| format!("{n} matches"))
    }

    pub fn total_label(&self) -> String {
        format!("{} total matches found", self.total)
    }
}
