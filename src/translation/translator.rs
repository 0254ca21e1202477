//! Cache-aware translation: consult the cache, translate only the misses,
//! remember what was fetched.

use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use super::{AUTO_DETECT, TranslationOptions};
use crate::cache::{CacheEntry, CacheScope, CacheStore};
use crate::error::TranslateError;
use crate::fingerprint::{self, CanonicalOptions};
use crate::gateway::{TextTranslator, TranslationResult};
use crate::segment;

/// Defaults applied when a call leaves a setting unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatorConfig {
    pub default_source_lang: Option<String>,
    pub default_target_lang: Option<String>,
    /// Whether callers should use the cache unless told otherwise.
    pub use_cache: bool,
}

pub struct CachingTranslator<G, S> {
    gateway: G,
    store: S,
    config: TranslatorConfig,
}

impl<G, S> CachingTranslator<G, S>
where
    G: TextTranslator,
    S: CacheStore,
{
    pub const fn new(gateway: G, store: S, config: TranslatorConfig) -> Self {
        Self {
            gateway,
            store,
            config,
        }
    }

    pub const fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Explicit value, else the configured default, else [`AUTO_DETECT`].
    pub fn resolve_source_lang(&self, explicit: Option<&str>) -> String {
        non_empty(explicit)
            .or_else(|| non_empty(self.config.default_source_lang.as_deref()))
            .unwrap_or(AUTO_DETECT)
            .to_string()
    }

    /// Explicit value, else the configured default; there is no sentinel.
    pub fn resolve_target_lang(&self, explicit: Option<&str>) -> Result<String, TranslateError> {
        non_empty(explicit)
            .or_else(|| non_empty(self.config.default_target_lang.as_deref()))
            .map(str::to_string)
            .ok_or(TranslateError::MissingTargetLanguage)
    }

    /// Translates `texts`, returning one result per text in input order.
    ///
    /// With `use_cache` the store is consulted once for the whole batch and
    /// only distinct misses are sent to the gateway, in a single call.
    /// Without it the store is never touched.
    pub async fn translate_many(
        &self,
        texts: &[String],
        source_lang: Option<&str>,
        target_lang: Option<&str>,
        options: &TranslationOptions,
        use_cache: bool,
    ) -> Result<Vec<TranslationResult>, TranslateError> {
        let source_lang = self.resolve_source_lang(source_lang);
        let target_lang = self.resolve_target_lang(target_lang)?;

        if texts.is_empty() {
            return Ok(Vec::new());
        }

        if !use_cache {
            let results = self
                .gateway
                .translate(texts, &source_lang, &target_lang, options)
                .await?;
            ensure_count(texts.len(), results.len())?;
            return Ok(results);
        }

        let canonical = CanonicalOptions::new(options);
        let digests: Vec<String> = texts.iter().map(|t| fingerprint::text_digest(t)).collect();

        let mut seen = HashSet::new();
        let unique: Vec<String> = digests
            .iter()
            .filter(|d| seen.insert(d.as_str()))
            .cloned()
            .collect();

        let scope = CacheScope {
            source_lang: &source_lang,
            target_lang: &target_lang,
            options_digest: canonical.digest(),
        };

        let mut resolved: HashMap<String, TranslationResult> = self
            .store
            .lookup(&unique, scope)?
            .into_iter()
            .map(|(digest, entry)| (digest, cached_result(entry, &source_lang)))
            .collect();

        let hits = resolved.len();

        // First occurrence of every digest the cache could not answer.
        let mut queued = HashSet::new();
        let misses: Vec<usize> = digests
            .iter()
            .enumerate()
            .filter(|(_, d)| !resolved.contains_key(d.as_str()) && queued.insert(d.as_str()))
            .map(|(i, _)| i)
            .collect();

        debug!(
            texts = texts.len(),
            hits,
            misses = misses.len(),
            "translation cache consulted"
        );

        if !misses.is_empty() {
            let miss_texts: Vec<String> = misses.iter().map(|&i| texts[i].clone()).collect();
            let fetched = self
                .gateway
                .translate(&miss_texts, &source_lang, &target_lang, options)
                .await?;
            ensure_count(miss_texts.len(), fetched.len())?;

            let now = Utc::now();
            for (&i, result) in misses.iter().zip(fetched) {
                let entry = CacheEntry {
                    text: texts[i].clone(),
                    text_digest: digests[i].clone(),
                    translated_text: result.translated_text.clone(),
                    source_lang: source_lang.clone(),
                    target_lang: target_lang.clone(),
                    options: canonical.json().to_string(),
                    options_digest: canonical.digest().to_string(),
                    detected_source_lang: Some(result.detected_source_lang.clone()),
                    billed_units: Some(result.billed_units as i64),
                    created_at: now,
                    updated_at: now,
                };

                if let Err(err) = self.store.insert(&entry) {
                    warn!(
                        error = %err,
                        text_digest = %entry.text_digest,
                        "failed to cache translation; continuing without it"
                    );
                }

                resolved.insert(digests[i].clone(), result);
            }
        }

        digests
            .iter()
            .map(|d| {
                resolved
                    .get(d)
                    .cloned()
                    .ok_or(TranslateError::MalformedResponse {
                        expected: texts.len(),
                        got: resolved.len(),
                    })
            })
            .collect()
    }

    /// Single-text form of [`Self::translate_many`].
    pub async fn translate_one(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: Option<&str>,
        options: &TranslationOptions,
        use_cache: bool,
    ) -> Result<TranslationResult, TranslateError> {
        let mut results = self
            .translate_many(
                &[text.to_string()],
                source_lang,
                target_lang,
                options,
                use_cache,
            )
            .await?;

        results.pop().ok_or(TranslateError::MalformedResponse {
            expected: 1,
            got: 0,
        })
    }

    /// Translates `text` while keeping `:placeholder` tokens untouched.
    ///
    /// All translatable segments go out as one batch.
    pub async fn translate_preserving_placeholders(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: Option<&str>,
        options: &TranslationOptions,
        use_cache: bool,
    ) -> Result<String, TranslateError> {
        let segments = segment::segment(text)?;
        let pieces = segment::translatable_texts(&segments);

        let mut translated = self
            .translate_many(&pieces, source_lang, target_lang, options, use_cache)
            .await?
            .into_iter()
            .map(|r| r.translated_text);

        segment::reassemble(&segments, |_| {
            translated.next().ok_or(TranslateError::MalformedResponse {
                expected: pieces.len(),
                got: 0,
            })
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn cached_result(entry: CacheEntry, source_lang: &str) -> TranslationResult {
    TranslationResult {
        translated_text: entry.translated_text,
        detected_source_lang: entry
            .detected_source_lang
            .unwrap_or_else(|| source_lang.to_string()),
        billed_units: entry.billed_units.unwrap_or(0).max(0) as u64,
    }
}

fn ensure_count(expected: usize, got: usize) -> Result<(), TranslateError> {
    if expected == got {
        Ok(())
    } else {
        Err(TranslateError::MalformedResponse { expected, got })
    }
}
