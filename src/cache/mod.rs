//! Persistent translation cache.
//!
//! The store is append-only from the translator's point of view: entries
//! are created on a cache miss and only read afterwards.

mod sqlite;

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::error::StoreError;

pub use sqlite::{DEFAULT_TABLE, SqliteCacheStore};

/// A cached translation of one text for one language pair and option set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub text: String,
    pub text_digest: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    /// Canonical JSON of the options.
    pub options: String,
    pub options_digest: String,
    pub detected_source_lang: Option<String>,
    pub billed_units: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The exact-match columns shared by every digest of a batch lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheScope<'a> {
    pub source_lang: &'a str,
    pub target_lang: &'a str,
    pub options_digest: &'a str,
}

/// Lookup/insert contract of the translation cache.
pub trait CacheStore: Send + Sync {
    /// Returns the entries present for `text_digests`, keyed by digest.
    ///
    /// When several rows match a digest, the oldest one wins.
    fn lookup(
        &self,
        text_digests: &[String],
        scope: CacheScope<'_>,
    ) -> Result<HashMap<String, CacheEntry>, StoreError>;

    fn insert(&self, entry: &CacheEntry) -> Result<(), StoreError>;
}
