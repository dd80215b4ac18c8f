use html::{DomError, Id};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("text node {0:?} has no parent")]
    Detached(Id),
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error("keyword pattern rejected: {0}")]
    Pattern(#[from] regex::Error),
}
