//! Simplified HTML tokenizer.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_-]` and are lowercased.
//! `script` and `style` bodies are emitted verbatim as a single text token.
//!
//! Known limitations:
//! - No HTML5 parse-error recovery; a stray `<` not followed by a name char is text.
//! - Raw-text close tags only accept ASCII whitespace before `>`.
use crate::entities::decode_entities;
use crate::traverse::{is_raw_text_element, is_void_element};
use crate::types::Token;
use memchr::memchr;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

/// Finds `</name` followed by optional whitespace and `>`; returns (start, end) of the tag.
fn find_rawtext_close_tag(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    while i < len {
        i += memchr(b'<', &bytes[i..])?;
        if bytes.get(i + 1) == Some(&b'/')
            && starts_with_ignore_ascii_case_at(bytes, i + 2, name.as_bytes())
        {
            let mut k = i + 2 + name.len();
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    // Slices are only cut at ASCII structural bytes, so every endpoint is a
    // UTF-8 char boundary.
    while i < len {
        if bytes[i] != b'<' {
            let end = memchr(b'<', &bytes[i..]).map_or(len, |rel| i + rel);
            out.push(Token::Text(decode_entities(&input[i..end])));
            i = end;
            continue;
        }

        if input[i..].starts_with(HTML_COMMENT_START) {
            let body_start = i + HTML_COMMENT_START.len();
            match input[body_start..].find(HTML_COMMENT_END) {
                Some(rel) => {
                    out.push(Token::Comment(input[body_start..body_start + rel].to_string()));
                    i = body_start + rel + HTML_COMMENT_END.len();
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    i = len;
                }
            }
            continue;
        }

        if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
            let rest = &input[i + 2..];
            let end = rest.find('>').unwrap_or(rest.len());
            let doctype = rest[..end].trim();
            let doctype = doctype
                .get(7..)
                .map(str::trim)
                .unwrap_or_default()
                .to_string();
            out.push(Token::Doctype(doctype));
            i = (i + 2 + end + 1).min(len);
            continue;
        }

        if bytes.get(i + 1) == Some(&b'/') {
            let start = i + 2;
            let mut j = start;
            while j < len && is_name_char(bytes[j]) {
                j += 1;
            }
            let name = input[start..j].to_ascii_lowercase();
            j = memchr(b'>', &bytes[j..]).map_or(len, |rel| j + rel + 1);
            if !name.is_empty() {
                out.push(Token::EndTag(name));
            }
            i = j;
            continue;
        }

        let name_start = i + 1;
        let mut k = name_start;
        while k < len && is_name_char(bytes[k]) {
            k += 1;
        }
        if k == name_start {
            // Not a tag; keep the '<' as text.
            out.push(Token::Text("<".to_string()));
            i += 1;
            continue;
        }
        let name = input[name_start..k].to_ascii_lowercase();
        let (attributes, mut self_closing, after) = read_attributes(input, k);
        if is_void_element(&name) {
            self_closing = true;
        }
        i = after;

        let raw_text = is_raw_text_element(&name) && !self_closing;
        out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });

        if raw_text {
            match find_rawtext_close_tag(&input[i..], &name) {
                Some((rel_start, rel_end)) => {
                    let raw = &input[i..i + rel_start];
                    if !raw.is_empty() {
                        out.push(Token::Text(raw.to_string()));
                    }
                    i += rel_end;
                }
                None => {
                    // Missing close tag: the rest of the input is raw text.
                    let raw = &input[i..];
                    if !raw.is_empty() {
                        out.push(Token::Text(raw.to_string()));
                    }
                    i = len;
                }
            }
            out.push(Token::EndTag(name));
        }
    }
    log::trace!(target: "html.tokenizer", "tokenized {} bytes into {} tokens", len, out.len());
    out
}

/// Reads attributes starting right after the tag name. Returns the attributes, whether the
/// tag was written self-closing, and the index just past the closing `>`.
fn read_attributes(input: &str, mut k: usize) -> (Vec<(String, Option<String>)>, bool, usize) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut attributes = Vec::new();
    let mut self_closing = false;

    let skip_whitespace = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };

    loop {
        skip_whitespace(&mut k);
        if k >= len {
            break;
        }
        if bytes[k] == b'>' {
            k += 1;
            break;
        }
        if bytes[k] == b'/' {
            if bytes.get(k + 1) == Some(&b'>') {
                self_closing = true;
                k += 2;
                break;
            }
            k += 1;
            continue;
        }
        let attr_start = k;
        while k < len && is_name_char(bytes[k]) {
            k += 1;
        }
        if attr_start == k {
            k += 1;
            continue;
        }
        let attr_name = input[attr_start..k].to_ascii_lowercase();

        skip_whitespace(&mut k);
        if k >= len || bytes[k] != b'=' {
            attributes.push((attr_name, None));
            continue;
        }
        k += 1;
        skip_whitespace(&mut k);
        let value = if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
            let quote = bytes[k];
            let value_start = k + 1;
            let value_end = memchr(quote, &bytes[value_start..]).map_or(len, |rel| value_start + rel);
            k = (value_end + 1).min(len);
            decode_entities(&input[value_start..value_end])
        } else {
            let value_start = k;
            while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                if bytes[k] == b'/' && bytes.get(k + 1) == Some(&b'>') {
                    break;
                }
                k += 1;
            }
            decode_entities(&input[value_start..k])
        };
        attributes.push((attr_name, Some(value)));
    }

    (attributes, self_closing, k)
}
