//! Glossaries: fixed term pairs the provider applies while translating.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::GlossaryError;

/// Source term → target term pairs, in insertion order.
///
/// Adding a source term twice keeps the last target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryEntries(IndexMap<String, String>);

impl GlossaryEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one pair. Terms are trimmed and must be non-empty single-line
    /// text without tabs.
    pub fn insert(&mut self, source: &str, target: &str) -> Result<(), GlossaryError> {
        let source = check_term(source)?;
        let target = check_term(target)?;
        self.0.insert(source, target);
        Ok(())
    }

    /// Parses `source<TAB>target` lines; blank lines are skipped.
    pub fn from_tsv(contents: &str) -> Result<Self, GlossaryError> {
        let mut entries = Self::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let Some((source, target)) = line.split_once('\t') else {
                return Err(GlossaryError::MalformedLine {
                    line: index + 1,
                    content: line.to_string(),
                });
            };
            entries.insert(source, target)?;
        }
        Ok(entries)
    }

    pub fn to_tsv(&self) -> String {
        self.0
            .iter()
            .map(|(source, target)| format!("{source}\t{target}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.0.get(source).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }
}

fn check_term(term: &str) -> Result<String, GlossaryError> {
    let trimmed = term.trim();
    if trimmed.is_empty() || trimmed.contains(['\t', '\n', '\r']) {
        return Err(GlossaryError::InvalidTerm(term.to_string()));
    }
    Ok(trimmed.to_string())
}

/// A glossary to be created on the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGlossary {
    pub name: String,
    pub source_lang: String,
    pub target_lang: String,
    pub entries: GlossaryEntries,
}

impl NewGlossary {
    pub fn new(
        name: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        entries: GlossaryEntries,
    ) -> Result<Self, GlossaryError> {
        if entries.is_empty() {
            return Err(GlossaryError::Empty);
        }

        Ok(Self {
            name: name.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            entries,
        })
    }
}

/// Metadata of a glossary stored by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryInfo {
    pub glossary_id: String,
    pub name: String,
    /// Whether the glossary can already be used in translations.
    #[serde(default)]
    pub ready: bool,
    pub source_lang: String,
    pub target_lang: String,
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entry_count: u64,
}

/// A language pair the provider supports for glossaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryLanguagePair {
    pub source_lang: String,
    pub target_lang: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tsv_round_trip_keeps_order() {
        let entries = GlossaryEntries::from_tsv("Hello\tHallo\n\nWorld\tWelt\n").unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get("World"), Some("Welt"));
        assert_eq!(entries.to_tsv(), "Hello\tHallo\nWorld\tWelt");
    }

    #[test]
    fn test_malformed_line_is_reported_with_number() {
        let err = GlossaryEntries::from_tsv("Hello\tHallo\nno tab here").unwrap_err();
        assert_eq!(
            err,
            GlossaryError::MalformedLine {
                line: 2,
                content: "no tab here".to_string()
            }
        );
    }

    #[test]
    fn test_terms_are_checked() {
        let mut entries = GlossaryEntries::new();
        assert!(entries.insert("  ", "x").is_err());
        assert!(entries.insert("a\tb", "x").is_err());
        assert!(entries.insert("a", "line\nbreak").is_err());

        entries.insert(" cache ", "Zwischenspeicher").unwrap();
        entries.insert("cache", "Cache").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("cache"), Some("Cache"));
    }

    #[test]
    fn test_new_glossary_needs_entries() {
        assert_eq!(
            NewGlossary::new("empty", "en", "de", GlossaryEntries::new()),
            Err(GlossaryError::Empty)
        );
    }

    #[test]
    fn test_glossary_info_tolerates_missing_fields() {
        let info: GlossaryInfo = serde_json::from_str(
            r#"{"glossary_id": "g1", "name": "Terms", "source_lang": "en", "target_lang": "de"}"#,
        )
        .unwrap();

        assert!(!info.ready);
        assert_eq!(info.entry_count, 0);
        assert!(info.creation_time.is_none());
    }
}
