//! Source-driven merge of a source tree into an existing translated tree.
//!
//! Keys already present in the existing tree are copied verbatim; missing
//! leaves are translated with placeholders preserved. The walk happens in
//! two passes so every missing leaf of the whole tree can share batched
//! translator calls.

use tracing::debug;

use crate::cache::CacheStore;
use crate::error::MergeError;
use crate::gateway::TextTranslator;
use crate::segment::{self, Segment};
use crate::translation::{CachingTranslator, TranslationOptions};
use crate::tree::{Node, TranslationTree};

/// Largest number of texts sent in one translator call.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Result of a merge: the new tree and how many leaves were translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub tree: TranslationTree,
    pub translated: usize,
}

struct PendingLeaf {
    segments: Vec<Segment>,
}

pub struct MergeEngine<'a, G, S> {
    translator: &'a CachingTranslator<G, S>,
    options: TranslationOptions,
    use_cache: bool,
    batch_size: usize,
}

impl<'a, G, S> MergeEngine<'a, G, S>
where
    G: TextTranslator,
    S: CacheStore,
{
    /// Engine using the translator's configured cache flag and no options.
    pub fn new(translator: &'a CachingTranslator<G, S>) -> Self {
        Self {
            translator,
            options: TranslationOptions::new(),
            use_cache: translator.config().use_cache,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: TranslationOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Sets the batch size; zero is treated as one.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Builds the target tree for `source`, reusing entries of `existing`.
    ///
    /// Keys only present in `existing` are dropped. A failed translation
    /// fails the whole merge.
    pub async fn merge_translate(
        &self,
        source: &TranslationTree,
        existing: &TranslationTree,
        source_lang: Option<&str>,
        target_lang: Option<&str>,
    ) -> Result<MergeOutcome, MergeError> {
        let mut pending = Vec::new();
        plan(source, existing, "", &mut pending)?;

        let pieces: Vec<String> = pending
            .iter()
            .flat_map(|leaf| segment::translatable_texts(&leaf.segments))
            .collect();

        debug!(
            leaves = pending.len(),
            segments = pieces.len(),
            "merging translation tree"
        );

        let mut translated_pieces = Vec::with_capacity(pieces.len());
        for batch in pieces.chunks(self.batch_size) {
            let results = self
                .translator
                .translate_many(batch, source_lang, target_lang, &self.options, self.use_cache)
                .await
                .map_err(|source| MergeError::Translation {
                    leaves: pending.len(),
                    source,
                })?;
            translated_pieces.extend(results.into_iter().map(|r| r.translated_text));
        }

        let mut pieces = translated_pieces.into_iter();
        let mut leaves = pending.iter().map(|leaf| {
            segment::reassemble::<(), _>(&leaf.segments, |_| Ok(pieces.next().unwrap_or_default()))
                .unwrap_or_default()
        });

        let tree = build(source, existing, &mut leaves);

        Ok(MergeOutcome {
            tree,
            translated: pending.len(),
        })
    }
}

/// First pass: validates shapes and collects missing leaves depth-first.
fn plan(
    source: &TranslationTree,
    existing: &TranslationTree,
    prefix: &str,
    pending: &mut Vec<PendingLeaf>,
) -> Result<(), MergeError> {
    for (key, node) in source {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match (node, existing.get(key)) {
            (Node::Branch(subtree), Some(Node::Branch(existing_subtree))) => {
                plan(subtree, existing_subtree, &path, pending)?;
            }
            (Node::Branch(subtree), None) => {
                plan(subtree, &TranslationTree::new(), &path, pending)?;
            }
            (Node::Leaf(_), Some(Node::Leaf(_))) => {}
            (Node::Leaf(text), None) => {
                let segments = segment::segment(text).map_err(|source| {
                    MergeError::Segmentation {
                        key: path.clone(),
                        source,
                    }
                })?;
                pending.push(PendingLeaf { segments });
            }
            (expected, Some(found)) => {
                return Err(MergeError::ShapeMismatch {
                    key: path,
                    expected: expected.kind(),
                    found: found.kind(),
                });
            }
        }
    }
    Ok(())
}

/// Second pass: same walk as [`plan`], filling missing leaves in order.
fn build<I>(source: &TranslationTree, existing: &TranslationTree, translated: &mut I) -> TranslationTree
where
    I: Iterator<Item = String>,
{
    let mut out = TranslationTree::new();
    for (key, node) in source {
        let merged = match (node, existing.get(key)) {
            (Node::Branch(subtree), Some(Node::Branch(existing_subtree))) => {
                Node::Branch(build(subtree, existing_subtree, translated))
            }
            (Node::Branch(subtree), _) => {
                Node::Branch(build(subtree, &TranslationTree::new(), translated))
            }
            (Node::Leaf(_), Some(kept)) => kept.clone(),
            (Node::Leaf(_), None) => Node::Leaf(translated.next().unwrap_or_default()),
        };
        out.insert(key.clone(), merged);
    }
    out
}
