//! Test doubles shared by the integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use lingo_cache::cache::{CacheEntry, CacheScope, CacheStore};
use lingo_cache::error::{RemoteError, StoreError};
use lingo_cache::gateway::{TextTranslator, TranslationResult};
use lingo_cache::translation::{AUTO_DETECT, CachingTranslator, TranslationOptions, TranslatorConfig};

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCall {
    pub texts: Vec<String>,
    pub source_lang: String,
    pub target_lang: String,
}

/// Gateway that "translates" by looking texts up in a dictionary, falling
/// back to `<target>:<text>`.
#[derive(Default)]
pub struct FakeGateway {
    dictionary: HashMap<String, String>,
    calls: Mutex<Vec<GatewayCall>>,
    failure: Mutex<Option<RemoteError>>,
    drop_last_result: AtomicBool,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(pairs: &[(&str, &str)]) -> Self {
        Self {
            dictionary: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// Every following call fails with `err`.
    pub fn fail_with(&self, err: RemoteError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    /// Every following call returns one result too few.
    pub fn drop_last_result(&self) {
        self.drop_last_result.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn translate_text(&self, text: &str, target_lang: &str) -> String {
        self.dictionary
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("{target_lang}:{text}"))
    }
}

#[async_trait]
impl TextTranslator for FakeGateway {
    async fn translate(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
        _options: &TranslationOptions,
    ) -> Result<Vec<TranslationResult>, RemoteError> {
        self.calls.lock().unwrap().push(GatewayCall {
            texts: texts.to_vec(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        });

        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }

        let detected = if source_lang == AUTO_DETECT {
            "EN".to_string()
        } else {
            source_lang.to_string()
        };

        let mut results: Vec<TranslationResult> = texts
            .iter()
            .map(|text| TranslationResult {
                translated_text: self.translate_text(text, target_lang),
                detected_source_lang: detected.clone(),
                billed_units: text.chars().count() as u64,
            })
            .collect();

        if self.drop_last_result.load(Ordering::SeqCst) {
            results.pop();
        }
        Ok(results)
    }
}

/// In-memory cache store counting every call.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<CacheEntry>>,
    lookups: AtomicUsize,
    inserts: AtomicUsize,
    fail_lookup: AtomicBool,
    fail_insert: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_lookups(&self) {
        self.fail_lookup.store(true, Ordering::SeqCst);
    }

    pub fn fail_inserts(&self) {
        self.fail_insert.store(true, Ordering::SeqCst);
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn entries(&self) -> Vec<CacheEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn seed(&self, entry: CacheEntry) {
        self.entries.lock().unwrap().push(entry);
    }
}

impl CacheStore for MemoryStore {
    fn lookup(
        &self,
        text_digests: &[String],
        scope: CacheScope<'_>,
    ) -> Result<HashMap<String, CacheEntry>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(StoreError::Lookup(rusqlite::Error::InvalidQuery));
        }

        let mut found = HashMap::new();
        for entry in self.entries.lock().unwrap().iter() {
            if text_digests.contains(&entry.text_digest)
                && entry.source_lang == scope.source_lang
                && entry.target_lang == scope.target_lang
                && entry.options_digest == scope.options_digest
            {
                found
                    .entry(entry.text_digest.clone())
                    .or_insert_with(|| entry.clone());
            }
        }
        Ok(found)
    }

    fn insert(&self, entry: &CacheEntry) -> Result<(), StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Insert(rusqlite::Error::InvalidQuery));
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

pub type TestTranslator = CachingTranslator<FakeGateway, MemoryStore>;

/// Translator defaulting to `en` → `de` with the cache enabled.
pub fn translator(gateway: FakeGateway) -> TestTranslator {
    CachingTranslator::new(
        gateway,
        MemoryStore::new(),
        TranslatorConfig {
            default_source_lang: Some("en".to_string()),
            default_target_lang: Some("de".to_string()),
            use_cache: true,
        },
    )
}

pub fn strings(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| (*t).to_string()).collect()
}

/// Collects formatted `tracing` output while installed as the thread's
/// default subscriber.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Routes events on the current thread here until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Lines logged at WARN level.
    pub fn warnings(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains("WARN"))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
