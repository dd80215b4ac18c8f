pub type NodeId = u32;

/// Handle to a node inside a [`crate::Document`] arena.
///
/// Handles stay valid for the lifetime of the document, including after the
/// node is detached from the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document {
        doctype: Option<String>,
    },
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl NodeKind {
    pub fn allows_children(&self) -> bool {
        matches!(self, NodeKind::Document { .. } | NodeKind::Element { .. })
    }

    pub fn element_name(&self) -> Option<&str> {
        match self {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }
}
