//! Page document model: an arena DOM that can be edited in place, plus the
//! tokenizer, tree builder and serializer used to get markup in and out of it.

pub mod serialize;
pub mod traverse;

mod document;
mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub use crate::document::{Document, DomError};
pub use crate::dom_builder::{build_document, parse_document};
pub use crate::entities::{escape_attribute, escape_text};
pub use crate::serialize::{inner_html, outer_html};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Id, NodeId, NodeKind, Token};
