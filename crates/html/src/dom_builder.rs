use crate::document::Document;
use crate::tokenizer::tokenize;
use crate::types::{Id, Token};

/// Parses `input` into a fresh [`Document`].
pub fn parse_document(input: &str) -> Document {
    build_document(tokenize(input))
}

/// Builds a tree from a token stream with a simple open-element stack.
///
/// End tags close the nearest open element of the same name (and everything
/// opened after it); an end tag with no matching open element is ignored.
pub fn build_document(tokens: Vec<Token>) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    let mut open_elements: Vec<(Id, String)> = Vec::new();

    for token in tokens {
        let parent = open_elements.last().map_or(root, |(id, _)| *id);
        let child = match token {
            Token::Doctype(value) => {
                doc.set_doctype(value);
                continue;
            }
            Token::Comment(text) => doc.create_comment(text),
            Token::Text(text) => {
                if text.is_empty() {
                    continue;
                }
                // Merge runs split by the tokenizer (e.g. a stray '<').
                if let Some(&last) = doc.children(parent).last() {
                    if let Some(existing) = doc.text(last) {
                        let merged = format!("{existing}{text}");
                        let _ = doc.set_text(last, &merged);
                        continue;
                    }
                }
                doc.create_text(text)
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let id = doc.create_element(&name, attributes);
                if !self_closing {
                    open_elements.push((id, name));
                }
                id
            }
            Token::EndTag(name) => {
                if let Some(pos) = open_elements.iter().rposition(|(_, open)| *open == name) {
                    open_elements.truncate(pos);
                }
                continue;
            }
        };
        // Fresh nodes under a live element: attaching cannot fail.
        if let Err(err) = doc.append_child(parent, child) {
            log::warn!(target: "html.builder", "dropping node {child:?}: {err}");
        }
    }

    doc
}
