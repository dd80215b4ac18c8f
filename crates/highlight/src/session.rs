use crate::applier::highlight_keyword;
use crate::matcher::KeywordSpec;
use crate::remover::{ClearStats, clear_highlights};
use core_types::MatchTally;
use html::{Document, Id};

/// Fragments created by the current highlight pass, in creation order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HighlightRecord {
    fragments: Vec<Id>,
}

impl HighlightRecord {
    pub fn push(&mut self, fragment: Id) {
        self.fragments.push(fragment);
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, Id> {
        self.fragments.drain(..)
    }
}

/// Highlight state for one page: the record of live fragments and the tally
/// of the last apply pass.
#[derive(Debug, Default)]
pub struct HighlightSession {
    record: HighlightRecord,
    tally: MatchTally,
}

impl HighlightSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlights `keywords` in order inside the document body and returns the tally.
    ///
    /// Keywords are processed one after another against the live tree, so a
    /// later keyword can match inside markers produced by an earlier one. A
    /// keyword repeated in `keywords` restarts its count at zero.
    pub fn apply(&mut self, doc: &mut Document, keywords: &[KeywordSpec]) -> MatchTally {
        self.tally = MatchTally::new();
        let root = doc.body();
        for spec in keywords {
            if spec.text.is_empty() {
                log::warn!(target: "highlight.apply", "empty keyword matches at every position");
            }
            self.tally.reset(&spec.text);
            let count = highlight_keyword(doc, root, spec, &mut self.record);
            self.tally.add(&spec.text, count);
        }
        self.tally.clone()
    }

    pub fn clear(&mut self, doc: &mut Document) -> ClearStats {
        clear_highlights(doc, &mut self.record)
    }

    pub fn is_active(&self) -> bool {
        !self.record.is_empty()
    }

    pub fn record(&self) -> &HighlightRecord {
        &self.record
    }

    pub fn tally(&self) -> &MatchTally {
        &self.tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{MARKER_CLASS, MARKER_TAG};
    use html::parse_document;

    #[test]
    fn apply_resets_tally_each_pass() {
        let mut doc = parse_document("<body><p>cat</p></body>");
        let mut session = HighlightSession::new();
        let first = session.apply(&mut doc, &[KeywordSpec::new("cat", "#A")]);
        assert_eq!(first.get("cat"), Some(1));
        session.clear(&mut doc);

        let second = session.apply(&mut doc, &[KeywordSpec::new("dog", "#A")]);
        assert_eq!(second.get("cat"), None);
        assert_eq!(second.get("dog"), Some(0));
        assert!(!session.is_active());
    }

    #[test]
    fn repeated_keyword_keeps_only_last_pass_count() {
        let mut doc = parse_document("<body><p>cat</p></body>");
        let mut session = HighlightSession::new();
        let tally = session.apply(
            &mut doc,
            &[KeywordSpec::new("cat", "#A"), KeywordSpec::new("cat", "#B")],
        );
        // The second pass re-finds the occurrence inside the first marker.
        assert_eq!(tally.get("cat"), Some(1));
        assert_eq!(tally.len(), 1);
        assert_eq!(session.record().len(), 2);

        session.clear(&mut doc);
        let body = doc.body();
        assert_eq!(doc.text_content(body), "cat");
        assert!(doc.elements_with_class(body, MARKER_TAG, MARKER_CLASS).is_empty());
    }

    #[test]
    fn empty_keyword_list_yields_empty_tally() {
        let mut doc = parse_document("<body><p>cat</p></body>");
        let mut session = HighlightSession::new();
        assert!(session.apply(&mut doc, &[]).is_empty());
        assert!(!session.is_active());
    }
}
