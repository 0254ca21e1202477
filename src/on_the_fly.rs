//! On-the-fly translation of keys missing from a target locale.
//!
//! A [`MissingKey`] names a key that a lookup in `locale` could not find.
//! The resolver translates the source-language file holding the key (which
//! also writes the target file) and returns the fresh value with
//! replacements applied. [`MissingKeyQueue`] defers that work to a worker.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::error::FileError;
use crate::files;
use crate::gateway::TextTranslator;
use crate::merge::MergeEngine;
use crate::segment;
use crate::tree::TreeFormat;

/// A key to translate into `locale`, with `:placeholder` replacements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKey {
    pub key: String,
    pub locale: String,
    pub replace: BTreeMap<String, String>,
}

impl MissingKey {
    pub fn new(key: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            locale: locale.into(),
            replace: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_replacement(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.replace.insert(name.into(), value.into());
        self
    }
}

pub struct KeyResolver<'a, G, S> {
    engine: MergeEngine<'a, G, S>,
    lang_dir: PathBuf,
    source_lang: String,
}

impl<'a, G, S> KeyResolver<'a, G, S>
where
    G: TextTranslator,
    S: CacheStore,
{
    pub fn new(
        engine: MergeEngine<'a, G, S>,
        lang_dir: impl Into<PathBuf>,
        source_lang: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            lang_dir: lang_dir.into(),
            source_lang: source_lang.into(),
        }
    }

    /// Source files that may hold `key`, with the path of the key inside each.
    ///
    /// `group.rest` lives in `<lang_dir>/<source>/<group>.{json,toml}`; a key
    /// without a dot lives in `<lang_dir>/<source>.json`.
    pub fn candidates(&self, key: &str) -> Vec<(PathBuf, String)> {
        let source_dir = self.lang_dir.join(&self.source_lang);
        match key.split_once('.') {
            Some((group, rest)) if !group.is_empty() && !rest.is_empty() => {
                [TreeFormat::Json, TreeFormat::Toml]
                    .iter()
                    .map(|format| {
                        let file = format!("{group}.{}", format.extension());
                        (source_dir.join(file), rest.to_string())
                    })
                    .collect()
            }
            _ => vec![(
                self.lang_dir.join(format!("{}.json", self.source_lang)),
                key.to_string(),
            )],
        }
    }

    /// Translates the file holding `job.key` and returns the translated value.
    ///
    /// Missing candidate files are skipped; `None` means no candidate
    /// contained the key.
    pub async fn resolve(&self, job: &MissingKey) -> Result<Option<String>, FileError> {
        for (path, inner_key) in self.candidates(&job.key) {
            if !path.is_file() {
                continue;
            }

            let Some(outcome) =
                files::translate_file(&self.engine, &path, &self.source_lang, &job.locale).await?
            else {
                continue;
            };

            if let Some(value) = outcome.tree.get_path(&inner_key) {
                return Ok(Some(segment::apply_replacements(value, &job.replace)));
            }
        }

        debug!(key = %job.key, locale = %job.locale, "key not found in any source file");
        Ok(None)
    }

    pub fn lang_dir(&self) -> &Path {
        &self.lang_dir
    }
}

/// Sending half of the missing-key queue.
#[derive(Debug, Clone)]
pub struct MissingKeyQueue {
    sender: mpsc::Sender<MissingKey>,
}

/// Receiving half, drained by [`run_worker`].
pub struct MissingKeyReceiver {
    receiver: mpsc::Receiver<MissingKey>,
}

/// Creates a bounded queue of missing keys.
pub fn queue(capacity: usize) -> (MissingKeyQueue, MissingKeyReceiver) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (MissingKeyQueue { sender }, MissingKeyReceiver { receiver })
}

impl MissingKeyQueue {
    /// Enqueues a job; returns `false` once the worker has shut down.
    pub async fn enqueue(&self, job: MissingKey) -> bool {
        self.sender.send(job).await.is_ok()
    }
}

/// Processes queued jobs until every sender is dropped.
///
/// Failures are logged and never stop the worker. Returns the number of
/// keys that resolved to a value.
pub async fn run_worker<G, S>(resolver: &KeyResolver<'_, G, S>, mut jobs: MissingKeyReceiver) -> usize
where
    G: TextTranslator,
    S: CacheStore,
{
    let mut resolved = 0;
    while let Some(job) = jobs.receiver.recv().await {
        match resolver.resolve(&job).await {
            Ok(Some(value)) => {
                resolved += 1;
                info!(key = %job.key, locale = %job.locale, value = %value, "translated missing key");
            }
            Ok(None) => {
                warn!(key = %job.key, locale = %job.locale, "missing key has no source translation");
            }
            Err(err) => {
                warn!(key = %job.key, locale = %job.locale, error = %err, "failed to translate missing key");
            }
        }
    }
    resolved
}
