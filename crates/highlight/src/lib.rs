//! In-page keyword highlighting.
//!
//! A highlight pass walks the text below the document body, wraps every
//! case-insensitive occurrence of each keyword in a colored `<mark>`, and
//! records the replaced nodes so that a clear pass can put the original text
//! back exactly.

pub mod applier;
pub mod matcher;
pub mod remover;
pub mod scanner;
pub mod style;

mod error;
mod session;

pub use crate::error::HighlightError;
pub use crate::matcher::{KeywordMatcher, KeywordSpec, MatchSpan};
pub use crate::remover::{ClearStats, clear_highlights};
pub use crate::scanner::{NodeClass, TextScanner, classify, text_nodes};
pub use crate::session::{HighlightRecord, HighlightSession};
pub use core_types::MatchTally;
