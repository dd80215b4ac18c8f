//! Markup injected around matches.

/// Tag of the element wrapping one matched occurrence.
pub const MARKER_TAG: &str = "mark";
/// Class carried by every marker; the clear sweep finds stray markers by it.
pub const MARKER_CLASS: &str = "multifind-highlight";
/// Tag of the element that replaces a matched text node.
pub const FRAGMENT_TAG: &str = "span";
/// Used when a request carries no colors at all.
pub const DEFAULT_MARKER_COLOR: &str = "#ffff00";

pub fn marker_style(color: &str) -> String {
    format!("background-color: {color}; color: #000; padding: 2px 0; border-radius: 2px;")
}

pub(crate) fn marker_attributes(color: &str) -> Vec<(String, Option<String>)> {
    vec![
        ("class".to_string(), Some(MARKER_CLASS.to_string())),
        ("style".to_string(), Some(marker_style(color))),
    ]
}
