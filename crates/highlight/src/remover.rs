//! Reverts highlight fragments and stray markers to plain text.

use crate::session::HighlightRecord;
use crate::style::{MARKER_CLASS, MARKER_TAG};
use html::{Document, DomError, Id};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClearStats {
    /// Recorded fragments turned back into text.
    pub restored: usize,
    /// Recorded fragments that had already been detached.
    pub skipped: usize,
    /// Markers found by the document sweep.
    pub swept: usize,
}

/// Restores the document and empties `record`.
///
/// Runs in two passes: every recorded fragment is replaced by one text node
/// holding its current text content, then the whole document is swept for
/// markers that were never recorded. Safe to call with nothing highlighted and
/// safe to call repeatedly.
pub fn clear_highlights(doc: &mut Document, record: &mut HighlightRecord) -> ClearStats {
    let mut stats = ClearStats::default();

    for fragment in record.drain() {
        match replace_with_text(doc, fragment) {
            Ok(true) => stats.restored += 1,
            Ok(false) => stats.skipped += 1,
            Err(err) => {
                stats.skipped += 1;
                log::warn!(target: "highlight.clear", "could not restore fragment {fragment:?}: {err}");
            }
        }
    }

    let stray = doc.elements_with_class(doc.root(), MARKER_TAG, MARKER_CLASS);
    for marker in stray {
        // An earlier marker in the list may have swallowed this one.
        if !doc.is_connected(marker) {
            continue;
        }
        match replace_with_text(doc, marker) {
            Ok(true) => stats.swept += 1,
            Ok(false) => {}
            Err(err) => {
                log::warn!(target: "highlight.clear", "could not unwrap marker {marker:?}: {err}");
            }
        }
    }

    if stats != ClearStats::default() {
        log::debug!(target: "highlight.clear", "{stats:?}");
    }
    stats
}

/// Replaces `node` with a text node of its text content. Returns `false` when
/// `node` has no parent.
fn replace_with_text(doc: &mut Document, node: Id) -> Result<bool, DomError> {
    let Some(parent) = doc.parent(node) else {
        return Ok(false);
    };
    let text = doc.text_content(node);
    let replacement = doc.create_text(text);
    doc.replace_child(parent, replacement, node)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applier::highlight_keyword;
    use crate::matcher::KeywordSpec;
    use html::{inner_html, parse_document};

    #[test]
    fn clear_restores_recorded_fragments() {
        let mut doc = parse_document("<body><p>cat and dog</p></body>");
        let body = doc.body();
        let mut record = HighlightRecord::default();
        highlight_keyword(&mut doc, body, &KeywordSpec::new("cat", "#A"), &mut record);

        let stats = clear_highlights(&mut doc, &mut record);
        assert_eq!(
            stats,
            ClearStats {
                restored: 1,
                skipped: 0,
                swept: 0
            }
        );
        assert!(record.is_empty());
        assert_eq!(inner_html(&doc, body), "<p>cat and dog</p>");
    }

    #[test]
    fn sweep_finds_markers_without_a_record() {
        let mut doc = parse_document(
            r#"<body><p>a <mark class="multifind-highlight">cat</mark> b <mark>keep</mark></p></body>"#,
        );
        let body = doc.body();
        let stats = clear_highlights(&mut doc, &mut HighlightRecord::default());
        assert_eq!(stats.swept, 1);
        assert_eq!(doc.text_content(body), "a cat b keep");
        assert!(doc.elements_with_class(body, MARKER_TAG, MARKER_CLASS).is_empty());
        assert_eq!(
            doc.descendants(body)
                .filter(|id| doc.element_name(*id) == Some("mark"))
                .count(),
            1
        );
    }

    #[test]
    fn detached_fragment_is_skipped() {
        let mut doc = parse_document("<body><p>cat</p></body>");
        let body = doc.body();
        let mut record = HighlightRecord::default();
        highlight_keyword(&mut doc, body, &KeywordSpec::new("cat", "#A"), &mut record);

        // Page script removes the whole paragraph, fragment included.
        let p = doc.children(body)[0];
        let fragment = doc.children(p)[0];
        doc.remove_child(p, fragment).unwrap();

        let stats = clear_highlights(&mut doc, &mut record);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.restored, 0);
        assert!(record.is_empty());
    }

    #[test]
    fn second_clear_changes_nothing() {
        let mut doc = parse_document("<body><p>cat cat</p></body>");
        let body = doc.body();
        let mut record = HighlightRecord::default();
        highlight_keyword(&mut doc, body, &KeywordSpec::new("cat", "#A"), &mut record);

        clear_highlights(&mut doc, &mut record);
        let once = inner_html(&doc, body);
        let arena = doc.arena_len();
        let stats = clear_highlights(&mut doc, &mut record);
        assert_eq!(stats, ClearStats::default());
        assert_eq!(inner_html(&doc, body), once);
        assert_eq!(doc.arena_len(), arena);
    }
}
