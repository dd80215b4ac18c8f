//! Rewrites matched text nodes into marker-bearing fragments.

use crate::error::HighlightError;
use crate::matcher::{KeywordMatcher, KeywordSpec, MatchSpan};
use crate::scanner::TextScanner;
use crate::session::HighlightRecord;
use crate::style::{FRAGMENT_TAG, MARKER_TAG, marker_attributes};
use html::{Document, Id};

/// Highlights every occurrence of one keyword in the text below `root`.
///
/// Scans the tree as it is now, so markers from earlier keywords are scanned
/// too. Each replaced node's fragment is pushed onto `record`. Returns the
/// number of matches highlighted; a node that cannot be rewritten is logged
/// and skipped.
pub fn highlight_keyword(
    doc: &mut Document,
    root: Id,
    spec: &KeywordSpec,
    record: &mut HighlightRecord,
) -> usize {
    let matcher = match KeywordMatcher::new(spec) {
        Ok(matcher) => matcher,
        Err(err) => {
            log::warn!(target: "highlight.apply", "skipping keyword {:?}: {}", spec.text, HighlightError::from(err));
            return 0;
        }
    };

    let mut scanner = TextScanner::new(root);
    let mut count = 0usize;
    while let Some(node) = scanner.next(doc) {
        let spans = match doc.text(node) {
            Some(text) => matcher.find_spans(text),
            None => continue,
        };
        if spans.is_empty() {
            continue;
        }
        match replace_text_node(doc, node, &spans) {
            Ok(fragment) => {
                record.push(fragment);
                count += spans.len();
            }
            Err(err) => {
                log::warn!(target: "highlight.apply", "skipping text node {node:?}: {err}");
            }
        }
    }

    log::debug!(
        target: "highlight.apply",
        "keyword {:?}: {} matches, {} fragments recorded",
        spec.text,
        count,
        record.len()
    );
    count
}

/// Swaps `node` for a fragment holding its text with every span wrapped in a marker.
pub fn replace_text_node(
    doc: &mut Document,
    node: Id,
    spans: &[MatchSpan<'_>],
) -> Result<Id, HighlightError> {
    let parent = doc.parent(node).ok_or(HighlightError::Detached(node))?;
    let text = doc.text(node).unwrap_or_default().to_string();
    let fragment = build_fragment(doc, &text, spans)?;
    doc.replace_child(parent, fragment, node)?;
    Ok(fragment)
}

/// Builds a detached fragment: literal text between spans, a marker per span.
pub fn build_fragment(
    doc: &mut Document,
    text: &str,
    spans: &[MatchSpan<'_>],
) -> Result<Id, HighlightError> {
    let fragment = doc.create_element(FRAGMENT_TAG, Vec::new());
    let mut cursor = 0;
    for span in spans {
        if span.start > cursor {
            let plain = doc.create_text(&text[cursor..span.start]);
            doc.append_child(fragment, plain)?;
        }
        let marker = doc.create_element(MARKER_TAG, marker_attributes(span.color));
        if !span.is_empty() {
            let matched = doc.create_text(&text[span.start..span.end]);
            doc.append_child(marker, matched)?;
        }
        doc.append_child(fragment, marker)?;
        cursor = span.end;
    }
    if cursor < text.len() {
        let plain = doc.create_text(&text[cursor..]);
        doc.append_child(fragment, plain)?;
    }
    Ok(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{MARKER_CLASS, marker_style};
    use html::{inner_html, parse_document};

    #[test]
    fn fragment_keeps_unmatched_text_exactly() {
        let mut doc = parse_document("<body><p>  Cat,\tcat.  </p></body>");
        let mut record = HighlightRecord::default();
        let spec = KeywordSpec::new("cat", "#A");
        let body = doc.body();

        assert_eq!(highlight_keyword(&mut doc, body, &spec, &mut record), 2);
        assert_eq!(record.len(), 1);
        assert_eq!(doc.text_content(body), "  Cat,\tcat.  ");

        let style = marker_style("#A");
        let marker = |word: &str| {
            format!(r#"<mark class="{MARKER_CLASS}" style="{style}">{word}</mark>"#)
        };
        assert_eq!(
            inner_html(&doc, body),
            format!(
                "<p><span>  {},\t{}.  </span></p>",
                marker("Cat"),
                marker("cat")
            )
        );
    }

    #[test]
    fn markup_like_text_is_not_reparsed() {
        let mut doc = Document::new();
        let p = doc.create_element("p", Vec::new());
        let t = doc.create_text("<b>cat</b> & co");
        doc.append_child(doc.root(), p).unwrap();
        doc.append_child(p, t).unwrap();

        let mut record = HighlightRecord::default();
        let spec = KeywordSpec::new("cat", "#A");
        assert_eq!(highlight_keyword(&mut doc, p, &spec, &mut record), 1);
        assert_eq!(doc.text_content(p), "<b>cat</b> & co");
        let fragment = doc.children(p)[0];
        assert_eq!(doc.children(fragment).len(), 3);
        assert!(doc.descendants(p).all(|id| doc.element_name(id) != Some("b")));
    }

    #[test]
    fn detached_text_node_is_reported() {
        let mut doc = Document::new();
        let orphan = doc.create_text("cat");
        let spec = KeywordSpec::new("cat", "#A");
        let matcher = KeywordMatcher::new(&spec).unwrap();
        let spans = matcher.find_spans("cat");
        assert!(matches!(
            replace_text_node(&mut doc, orphan, &spans),
            Err(HighlightError::Detached(id)) if id == orphan
        ));
    }

    #[test]
    fn text_without_match_is_left_alone() {
        let mut doc = parse_document("<body><p>dog</p></body>");
        let before = inner_html(&doc, doc.body());
        let mut record = HighlightRecord::default();
        let body = doc.body();
        let spec = KeywordSpec::new("cat", "#A");
        assert_eq!(highlight_keyword(&mut doc, body, &spec, &mut record), 0);
        assert!(record.is_empty());
        assert_eq!(inner_html(&doc, body), before);
    }
}
