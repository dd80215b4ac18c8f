//! Depth-first enumeration of matchable text nodes.

use html::traverse::is_raw_text_element;
use html::{Document, Id, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    Text,
    /// A container whose children are scanned.
    Element,
    /// An element whose whole subtree is skipped (`script`, `style`).
    Opaque,
    /// Comments and unknown ids.
    Other,
}

pub fn classify(doc: &Document, id: Id) -> NodeClass {
    match doc.kind(id) {
        Some(NodeKind::Text { .. }) => NodeClass::Text,
        Some(NodeKind::Element { name, .. }) if is_raw_text_element(name) => NodeClass::Opaque,
        Some(NodeKind::Element { .. }) | Some(NodeKind::Document { .. }) => NodeClass::Element,
        Some(NodeKind::Comment { .. }) | None => NodeClass::Other,
    }
}

/// Pre-order cursor over the text nodes below a root.
///
/// The cursor does not borrow the document between steps, so the caller may
/// edit the tree while scanning. An element's children are copied when the
/// element is entered: replacing an already-yielded text node does not shift
/// or hide its later siblings, and nodes inserted after that point are not
/// visited.
pub struct TextScanner {
    stack: Vec<std::vec::IntoIter<Id>>,
}

impl TextScanner {
    pub fn new(root: Id) -> Self {
        Self {
            stack: vec![vec![root].into_iter()],
        }
    }

    pub fn next(&mut self, doc: &Document) -> Option<Id> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some(id) = frame.next() else {
                self.stack.pop();
                continue;
            };
            match classify(doc, id) {
                NodeClass::Text => return Some(id),
                NodeClass::Element => self.stack.push(doc.children(id).to_vec().into_iter()),
                NodeClass::Opaque | NodeClass::Other => {}
            }
        }
    }
}

/// All text nodes the scanner would yield for `root` on an unchanging tree.
pub fn text_nodes(doc: &Document, root: Id) -> Vec<Id> {
    let mut scanner = TextScanner::new(root);
    let mut out = Vec::new();
    while let Some(id) = scanner.next(doc) {
        out.push(id);
    }
    out
}
