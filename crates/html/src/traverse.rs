use crate::{Document, Id};

/// Pre-order iterator over a subtree, yielding the subtree root first.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<Id>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(doc: &'a Document, root: Id) -> Self {
        let stack = if doc.contains(root) {
            vec![root]
        } else {
            Vec::new()
        };
        Self { doc, stack }
    }
}

impl Iterator for Descendants<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let id = self.stack.pop()?;
        // Reverse so the first child is popped next.
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Elements whose content is raw text rather than markup.
pub fn is_raw_text_element(name: &str) -> bool {
    name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style")
}

pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
