use crate::entities::{escape_attribute, escape_text};
use crate::traverse::{is_raw_text_element, is_void_element};
use crate::{Document, Id, NodeKind};

/// Serializes `id` and its subtree back to markup.
pub fn outer_html(doc: &Document, id: Id) -> String {
    let mut out = String::new();
    write_node(doc, id, &mut out);
    out
}

/// Serializes the children of `id`.
pub fn inner_html(doc: &Document, id: Id) -> String {
    let mut out = String::new();
    for &child in doc.children(id) {
        write_node(doc, child, &mut out);
    }
    out
}

enum Step {
    Open(Id),
    Close(Id),
}

// Iterative so that deeply nested pages cannot overflow the stack.
fn write_node(doc: &Document, id: Id, out: &mut String) {
    let mut stack = vec![Step::Open(id)];
    while let Some(step) = stack.pop() {
        let node = match step {
            Step::Close(node) => {
                if let Some(name) = doc.element_name(node) {
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
                continue;
            }
            Step::Open(node) => node,
        };

        match doc.kind(node) {
            Some(NodeKind::Document { doctype }) => {
                if let Some(doctype) = doctype {
                    out.push_str("<!DOCTYPE ");
                    out.push_str(doctype);
                    out.push('>');
                }
                stack.extend(doc.children(node).iter().rev().map(|c| Step::Open(*c)));
            }
            Some(NodeKind::Element { name, attributes }) => {
                out.push('<');
                out.push_str(name);
                for (key, value) in attributes {
                    out.push(' ');
                    out.push_str(key);
                    if let Some(value) = value {
                        out.push_str("=\"");
                        escape_attribute(value, out);
                        out.push('"');
                    }
                }
                out.push('>');
                if is_void_element(name) {
                    continue;
                }
                if is_raw_text_element(name) {
                    for &child in doc.children(node) {
                        if let Some(text) = doc.text(child) {
                            out.push_str(text);
                        }
                    }
                    stack.push(Step::Close(node));
                    continue;
                }
                stack.push(Step::Close(node));
                stack.extend(doc.children(node).iter().rev().map(|c| Step::Open(*c)));
            }
            Some(NodeKind::Text { text }) => escape_text(text, out),
            Some(NodeKind::Comment { text }) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            None => {}
        }
    }
}
