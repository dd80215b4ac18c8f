//! Case-insensitive literal keyword search over one text value.

use crate::style::DEFAULT_MARKER_COLOR;
use regex::{Regex, RegexBuilder};

/// One requested keyword and the color its markers get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSpec {
    pub text: String,
    pub color: String,
}

impl KeywordSpec {
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
        }
    }

    /// Pairs keywords with colors by position, wrapping around `colors`.
    pub fn pair_with_colors(keywords: &[String], colors: &[String]) -> Vec<KeywordSpec> {
        keywords
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let color = if colors.is_empty() {
                    DEFAULT_MARKER_COLOR
                } else {
                    colors[index % colors.len()].as_str()
                };
                KeywordSpec::new(text.clone(), color)
            })
            .collect()
    }
}

/// A matched occurrence: byte offsets into the scanned text plus the keyword
/// and color it was found for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan<'a> {
    pub start: usize,
    pub end: usize,
    pub keyword: &'a str,
    pub color: &'a str,
}

impl MatchSpan<'_> {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

pub struct KeywordMatcher<'a> {
    spec: &'a KeywordSpec,
    pattern: Regex,
}

impl<'a> KeywordMatcher<'a> {
    pub fn new(spec: &'a KeywordSpec) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(&regex::escape(&spec.text))
            .case_insensitive(true)
            .build()?;
        Ok(Self { spec, pattern })
    }

    /// Every non-overlapping occurrence, left to right. Scanning resumes right
    /// after each match, so "catcat" holds two matches of "cat".
    pub fn find_spans(&self, text: &str) -> Vec<MatchSpan<'a>> {
        let spec = self.spec;
        self.pattern
            .find_iter(text)
            .map(|m| MatchSpan {
                start: m.start(),
                end: m.end(),
                keyword: &spec.text,
                color: &spec.color,
            })
            .collect()
    }
}
