//! Provider options attached to a translation request.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the provider should split the input into sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitSentences {
    /// Treat the whole input as one sentence.
    None,
    /// Split on punctuation and newlines.
    Default,
    /// Split on punctuation only.
    NoNewlines,
}

impl SplitSentences {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "0",
            Self::Default => "1",
            Self::NoNewlines => "nonewlines",
        }
    }
}

/// Option name → value mapping sent with every text of a request.
///
/// Insertion order is kept for display, but never influences the cache
/// fingerprint: see [`TranslationOptions::canonical_json`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationOptions(IndexMap<String, Value>);

impl TranslationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an arbitrary option, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn formality(self, value: &str) -> Self {
        self.with("formality", value)
    }

    #[must_use]
    pub fn glossary(self, glossary_id: &str) -> Self {
        self.with("glossary_id", glossary_id)
    }

    #[must_use]
    pub fn split_sentences(self, split: SplitSentences) -> Self {
        self.with("split_sentences", split.as_str())
    }

    #[must_use]
    pub fn preserve_formatting(self, enabled: bool) -> Self {
        self.with("preserve_formatting", enabled)
    }

    #[must_use]
    pub fn context(self, context: &str) -> Self {
        self.with("context", context)
    }

    #[must_use]
    pub fn tag_handling(self, handling: &str) -> Self {
        self.with("tag_handling", handling)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Serializes the options as JSON with object keys sorted at every level.
    pub fn canonical_json(&self) -> String {
        let mut out = String::new();
        write_object(self.0.iter(), &mut out);
        out
    }
}

fn write_object<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>, out: &mut String) {
    let mut entries: Vec<_> = entries.collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    out.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&Value::String(key.clone()).to_string());
        out.push(':');
        write_value(value, out);
    }
    out.push('}');
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => write_object(map.iter(), out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
