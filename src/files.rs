//! Translation of locale files and folders of locale files.

use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::error::FileError;
use crate::gateway::TextTranslator;
use crate::merge::MergeEngine;
use crate::tree::{TranslationTree, TreeFormat};

/// What happened to one translated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub source_path: PathBuf,
    pub target_path: PathBuf,
    pub tree: TranslationTree,
    /// Leaves translated in this run; the rest came from the existing file.
    pub translated: usize,
}

/// Derives the target-language path for a source-language file.
///
/// `<dir>/<source>.<ext>` becomes `<dir>/<target>.<ext>`. Otherwise every
/// path component equal to the source language is replaced. Returns `None`
/// when nothing would change.
pub fn target_path_for(path: &Path, source_lang: &str, target_lang: &str) -> Option<PathBuf> {
    if path.file_stem() == Some(OsStr::new(source_lang))
        && let Some(ext) = path.extension()
    {
        let mut target = path.with_file_name(target_lang);
        target.set_extension(ext);
        return Some(target);
    }

    let mut changed = false;
    let target: PathBuf = path
        .components()
        .map(|component| match component {
            Component::Normal(name) if name == OsStr::new(source_lang) => {
                changed = true;
                OsStr::new(target_lang).to_os_string()
            }
            other => other.as_os_str().to_os_string(),
        })
        .collect();

    changed.then_some(target)
}

/// Translates one locale file into the target language.
///
/// The existing target file, when present, supplies already accepted
/// translations. Nothing is written when the merge fails. Returns `None`
/// when the path has no target-language counterpart.
pub async fn translate_file<G, S>(
    engine: &MergeEngine<'_, G, S>,
    path: &Path,
    source_lang: &str,
    target_lang: &str,
) -> Result<Option<FileOutcome>, FileError>
where
    G: TextTranslator,
    S: CacheStore,
{
    if !path.is_file() {
        return Err(FileError::SourceMissing(path.to_path_buf()));
    }
    TreeFormat::from_path(path)?;

    let Some(target_path) = target_path_for(path, source_lang, target_lang) else {
        debug!(path = %path.display(), "no target path for file; skipping");
        return Ok(None);
    };

    let source = TreeFormat::load(path)?;
    let existing = if target_path.is_file() {
        TreeFormat::load(&target_path)?
    } else {
        TranslationTree::new()
    };

    let outcome = engine
        .merge_translate(&source, &existing, Some(source_lang), Some(target_lang))
        .await
        .map_err(|source| FileError::Merge {
            path: path.to_path_buf(),
            source,
        })?;

    TreeFormat::save(&target_path, &outcome.tree)?;

    info!(
        source = %path.display(),
        target = %target_path.display(),
        translated = outcome.translated,
        "translated locale file"
    );

    Ok(Some(FileOutcome {
        source_path: path.to_path_buf(),
        target_path,
        tree: outcome.tree,
        translated: outcome.translated,
    }))
}

/// Translates every `.json` and `.toml` file under `folder`, in sorted order.
///
/// Stops at the first failure.
pub async fn translate_folder<G, S>(
    engine: &MergeEngine<'_, G, S>,
    folder: &Path,
    source_lang: &str,
    target_lang: &str,
) -> Result<Vec<FileOutcome>, FileError>
where
    G: TextTranslator,
    S: CacheStore,
{
    if !folder.is_dir() {
        return Err(FileError::FolderMissing(folder.to_path_buf()));
    }

    let mut files = Vec::new();
    collect_locale_files(folder, &mut files)?;
    files.sort();

    let mut outcomes = Vec::new();
    for file in files {
        if let Some(outcome) = translate_file(engine, &file, source_lang, target_lang).await? {
            outcomes.push(outcome);
        }
    }
    Ok(outcomes)
}

fn collect_locale_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), FileError> {
    let io_error = |source| FileError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_dir() {
            collect_locale_files(&path, files)?;
        } else if TreeFormat::from_path(&path).is_ok() {
            files.push(path);
        }
    }
    Ok(())
}
