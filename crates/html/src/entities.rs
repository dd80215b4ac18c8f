//! Character references and escaping.
//!
//! Decoding covers a deliberately small subset:
//! - Named: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`.
//! - Numeric, only when semicolon-terminated: `&#123;` and `&#x1F4A9;`.
//!
//! Anything else (unknown names, missing `;`, invalid scalars) is left as written.

use memchr::memchr;

const NAMED: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&apos;", '\''),
    ("&nbsp;", '\u{00A0}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while let Some(rel) = memchr(b'&', &bytes[i..]) {
        let amp = i + rel;
        out.push_str(&s[i..amp]);
        match decode_one(&s[amp..]) {
            Some((ch, consumed)) => {
                out.push(ch);
                i = amp + consumed;
            }
            None => {
                out.push('&');
                i = amp + 1;
            }
        }
    }
    out.push_str(&s[i..]);
    out
}

/// Decodes the reference at the start of `s`, returning the char and bytes consumed.
fn decode_one(s: &str) -> Option<(char, usize)> {
    if let Some((name, ch)) = NAMED.iter().find(|(name, _)| s.starts_with(name)) {
        return Some((*ch, name.len()));
    }

    let rest = s.strip_prefix("&#")?;
    let (digits, radix, max, prefix_len) = match rest.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16, MAX_HEX_DIGITS, 3),
        None => (rest, 10, MAX_DEC_DIGITS, 2),
    };
    let end = digits.find(';')?;
    if end == 0 || end > max {
        return None;
    }
    let value = u32::from_str_radix(&digits[..end], radix).ok()?;
    let ch = char::from_u32(value)?;
    Some((ch, prefix_len + end + 1))
}

/// Escapes text for use between tags.
pub fn escape_text(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

/// Escapes text for use inside a double-quoted attribute value.
pub fn escape_attribute(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_entities_preserves_utf8() {
        assert_eq!(decode_entities("120×32 café"), "120×32 café");
    }

    #[test]
    fn decode_entities_decodes_named_and_numeric() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_entities("&#x1F600;"), "😀");
    }

    #[test]
    fn decode_entities_leaves_malformed_references() {
        assert_eq!(decode_entities("&copy; &amp"), "&copy; &amp");
        assert_eq!(decode_entities("&#;&#x;&#12"), "&#;&#x;&#12");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#12345678;"), "&#12345678;");
    }

    #[test]
    fn escape_round_trips_through_decode() {
        let raw = "Tom & \"Jerry\" <3\u{00A0}";
        let mut text = String::new();
        escape_text(raw, &mut text);
        assert_eq!(decode_entities(&text), raw);

        let mut attr = String::new();
        escape_attribute(raw, &mut attr);
        assert!(!attr.contains('"'));
        assert_eq!(decode_entities(&attr), raw);
    }
}
