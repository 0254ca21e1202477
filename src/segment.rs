//! Placeholder-preserving segmentation of translatable strings.
//!
//! A placeholder is a colon followed by letters or underscores (`:name`),
//! together with the whitespace around it, so spacing survives translation
//! verbatim. Everything else is a TEXT segment.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::error::SegmentationError;

#[allow(clippy::unwrap_used)]
static PLACEHOLDER: LazyLock<Regex> =
    // unwrap is safe: pattern is a compile-time constant
    LazyLock::new(|| Regex::new(r"\s*:[A-Za-z_]+\s*").unwrap());

#[allow(clippy::unwrap_used)]
static PLACEHOLDER_NAME: LazyLock<Regex> =
    // unwrap is safe: pattern is a compile-time constant
    LazyLock::new(|| Regex::new(r":([A-Za-z_]+)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Placeholder,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub value: String,
}

impl Segment {
    fn new(kind: SegmentKind, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// TEXT segments with visible content go to the translator; whitespace
    /// and placeholders pass through unchanged.
    pub fn needs_translation(&self) -> bool {
        self.kind == SegmentKind::Text && !self.value.trim().is_empty()
    }
}

/// Splits `text` into an ordered sequence of TEXT and PLACEHOLDER segments.
///
/// Concatenating the segment values reproduces `text` exactly.
pub fn segment(text: &str) -> Result<Vec<Segment>, SegmentationError> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for found in PLACEHOLDER.find_iter(text) {
        if found.start() > cursor {
            segments.push(Segment::new(SegmentKind::Text, &text[cursor..found.start()]));
        }
        segments.push(Segment::new(SegmentKind::Placeholder, found.as_str()));
        cursor = found.end();
    }

    if cursor < text.len() {
        segments.push(Segment::new(SegmentKind::Text, &text[cursor..]));
    }

    let reassembled: String = segments.iter().map(|s| s.value.as_str()).collect();
    if reassembled != text {
        return Err(SegmentationError {
            input: text.to_string(),
            reassembled,
        });
    }

    Ok(segments)
}

/// Values of the segments that need translation, in order.
pub fn translatable_texts(segments: &[Segment]) -> Vec<String> {
    segments
        .iter()
        .filter(|s| s.needs_translation())
        .map(|s| s.value.clone())
        .collect()
}

/// Rebuilds a string, replacing each translatable segment with the output
/// of `translate` and keeping every other segment verbatim.
pub fn reassemble<E, F>(segments: &[Segment], mut translate: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<String, E>,
{
    let mut out = String::new();
    for segment in segments {
        if segment.needs_translation() {
            out.push_str(&translate(&segment.value)?);
        } else {
            out.push_str(&segment.value);
        }
    }
    Ok(out)
}

/// Substitutes `:name` placeholders with values from `replace`.
///
/// `:Name` receives the value with its first letter capitalized and `:NAME`
/// the value in upper case. Unknown placeholders are left as they are.
pub fn apply_replacements<'a, I>(text: &str, replace: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let replace: Vec<_> = replace.into_iter().collect();
    if replace.is_empty() {
        return text.to_string();
    }

    PLACEHOLDER_NAME
        .replace_all(text, |caps: &Captures<'_>| {
            let token = &caps[1];
            replace
                .iter()
                .find_map(|(key, value)| {
                    if token == key.as_str() {
                        Some((*value).clone())
                    } else if token == capitalize(key) {
                        Some(capitalize(value))
                    } else if token == key.to_uppercase() {
                        Some(value.to_uppercase())
                    } else {
                        None
                    }
                })
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
