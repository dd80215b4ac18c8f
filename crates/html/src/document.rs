//! Live, mutable document tree.
//!
//! The tree is an arena: every node lives in `nodes` for the lifetime of the
//! document and is addressed by its [`Id`]. Structural edits only rewrite the
//! `parent`/`children` links, so an `Id` handed out earlier never dangles; a
//! detached node simply has no parent.
//!
//! Invariants:
//! - A node has at most one parent, and appears exactly once in that parent's
//!   children list.
//! - Only document and element nodes have children.
//! - Edits never create cycles.

use crate::traverse::Descendants;
use crate::types::{Id, NodeKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("unknown node {0:?}")]
    UnknownNode(Id),
    #[error("node {0:?} cannot have children")]
    InvalidParent(Id),
    #[error("node {0:?} already has a parent")]
    AlreadyAttached(Id),
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: Id, child: Id },
    #[error("inserting {child:?} under {parent:?} would create a cycle")]
    CycleDetected { parent: Id, child: Id },
    #[error("node {0:?} is not a text node")]
    WrongNodeKind(Id),
}

#[derive(Debug, Clone)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<Id>,
    children: Vec<Id>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeRecord>,
}

const ROOT: Id = Id(0);

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeRecord {
                kind: NodeKind::Document { doctype: None },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> Id {
        ROOT
    }

    pub fn doctype(&self) -> Option<&str> {
        match &self.nodes[ROOT.index()].kind {
            NodeKind::Document { doctype } => doctype.as_deref(),
            _ => None,
        }
    }

    pub fn set_doctype(&mut self, value: impl Into<String>) {
        if let NodeKind::Document { doctype } = &mut self.nodes[ROOT.index()].kind {
            *doctype = Some(value.into());
        }
    }

    /// Number of nodes ever allocated, attached or not.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    pub fn create_element(&mut self, name: &str, attributes: Vec<(String, Option<String>)>) -> Id {
        self.push(NodeKind::Element {
            name: name.to_ascii_lowercase(),
            attributes,
        })
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> Id {
        self.push(NodeKind::Text { text: text.into() })
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> Id {
        self.push(NodeKind::Comment { text: text.into() })
    }

    fn push(&mut self, kind: NodeKind) -> Id {
        let id = Id(self.nodes.len() as u32);
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn contains(&self, id: Id) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn kind(&self, id: Id) -> Option<&NodeKind> {
        self.nodes.get(id.index()).map(|record| &record.kind)
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.nodes.get(id.index()).and_then(|record| record.parent)
    }

    /// Current children of `id`; empty for leaves and unknown ids.
    pub fn children(&self, id: Id) -> &[Id] {
        self.nodes
            .get(id.index())
            .map(|record| record.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn text(&self, id: Id) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn set_text(&mut self, id: Id, value: &str) -> Result<(), DomError> {
        let record = self
            .nodes
            .get_mut(id.index())
            .ok_or(DomError::UnknownNode(id))?;
        match &mut record.kind {
            NodeKind::Text { text } => {
                text.clear();
                text.push_str(value);
                Ok(())
            }
            _ => Err(DomError::WrongNodeKind(id)),
        }
    }

    pub fn element_name(&self, id: Id) -> Option<&str> {
        self.kind(id).and_then(NodeKind::element_name)
    }

    pub fn attribute(&self, id: Id, name: &str) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_deref().unwrap_or("")),
            _ => None,
        }
    }

    pub fn has_class(&self, id: Id, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|value| value.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn append_child(&mut self, parent: Id, child: Id) -> Result<(), DomError> {
        self.check_insertable(parent, child)?;
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = Some(parent);
        Ok(())
    }

    /// Puts the detached `new_child` where `old_child` was and detaches `old_child`.
    pub fn replace_child(
        &mut self,
        parent: Id,
        new_child: Id,
        old_child: Id,
    ) -> Result<(), DomError> {
        self.check_insertable(parent, new_child)?;
        let pos = self.child_position(parent, old_child)?;
        self.nodes[parent.index()].children[pos] = new_child;
        self.nodes[new_child.index()].parent = Some(parent);
        self.nodes[old_child.index()].parent = None;
        Ok(())
    }

    pub fn remove_child(&mut self, parent: Id, child: Id) -> Result<(), DomError> {
        let pos = self.child_position(parent, child)?;
        self.nodes[parent.index()].children.remove(pos);
        self.nodes[child.index()].parent = None;
        Ok(())
    }

    fn check_insertable(&self, parent: Id, child: Id) -> Result<(), DomError> {
        let parent_record = self
            .nodes
            .get(parent.index())
            .ok_or(DomError::UnknownNode(parent))?;
        let child_record = self
            .nodes
            .get(child.index())
            .ok_or(DomError::UnknownNode(child))?;
        if !parent_record.kind.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        if child_record.parent.is_some() {
            return Err(DomError::AlreadyAttached(child));
        }
        // A leaf can only be its own ancestor.
        let may_contain_parent = child == parent || !child_record.children.is_empty();
        if child == ROOT || (may_contain_parent && self.is_inclusive_ancestor(child, parent)) {
            return Err(DomError::CycleDetected { parent, child });
        }
        Ok(())
    }

    fn child_position(&self, parent: Id, child: Id) -> Result<usize, DomError> {
        let record = self
            .nodes
            .get(parent.index())
            .ok_or(DomError::UnknownNode(parent))?;
        record
            .children
            .iter()
            .position(|c| *c == child)
            .ok_or(DomError::NotAChild { parent, child })
    }

    fn is_inclusive_ancestor(&self, ancestor: Id, node: Id) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether `id` is reachable from the document root.
    pub fn is_connected(&self, id: Id) -> bool {
        self.contains(id) && self.is_inclusive_ancestor(ROOT, id)
    }

    /// Pre-order walk of `root` and everything below it.
    pub fn descendants(&self, root: Id) -> Descendants<'_> {
        Descendants::new(self, root)
    }

    /// Concatenated text of every text node under `id`, in document order.
    /// Comments contribute nothing, matching DOM `textContent` on elements.
    pub fn text_content(&self, id: Id) -> String {
        match self.kind(id) {
            Some(NodeKind::Text { text }) | Some(NodeKind::Comment { text }) => {
                return text.clone();
            }
            None => return String::new(),
            _ => {}
        }
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(text) = self.text(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// The first `<body>` element in document order, or the root if there is none.
    pub fn body(&self) -> Id {
        self.descendants(ROOT)
            .find(|id| self.element_name(*id) == Some("body"))
            .unwrap_or(ROOT)
    }

    /// Elements named `tag` carrying `class`, in document order.
    pub fn elements_with_class(&self, root: Id, tag: &str, class: &str) -> Vec<Id> {
        self.descendants(root)
            .filter(|id| {
                self.element_name(*id)
                    .is_some_and(|name| name.eq_ignore_ascii_case(tag))
                    && self.has_class(*id, class)
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
