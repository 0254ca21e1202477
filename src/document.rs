//! Whole-document translation: upload, wait for the provider, download.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::DocumentError;
use crate::fs::atomic_write;
use crate::gateway::DocumentTranslator;
use crate::translation::{AUTO_DETECT, TranslationOptions};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_POLLS: u32 = 600;

/// Identifies an uploaded document; both parts are needed for every
/// follow-up request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHandle {
    pub document_id: String,
    pub document_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentState {
    Queued,
    Translating,
    Done,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatus {
    pub document_id: String,
    pub status: DocumentState,
    pub seconds_remaining: Option<u64>,
    pub billed_characters: Option<u64>,
    pub error_message: Option<String>,
}

/// A document ready to be sent to the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub contents: Vec<u8>,
    /// `None` lets the provider detect the language.
    pub source_lang: Option<String>,
    pub target_lang: String,
    pub options: TranslationOptions,
    /// Ask the provider to shrink embedded media before translating.
    pub minify: bool,
}

/// Everything needed to translate one document file.
#[derive(Debug, Clone)]
pub struct DocumentJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source_lang: Option<String>,
    pub target_lang: String,
    pub options: TranslationOptions,
    pub minify: bool,
    pub poll_interval: Duration,
    pub max_polls: u32,
}

impl DocumentJob {
    /// Job writing next to `input` (see [`default_output_path`]), with the
    /// default polling schedule.
    pub fn new(input: impl Into<PathBuf>, target_lang: impl Into<String>) -> Self {
        let input = input.into();
        let target_lang = target_lang.into();
        Self {
            output: default_output_path(&input, &target_lang),
            input,
            source_lang: None,
            target_lang,
            options: TranslationOptions::new(),
            minify: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub document_id: String,
    pub output: PathBuf,
    pub billed_characters: Option<u64>,
}

/// `report.docx` translated to `de` becomes `report.de.docx`.
pub fn default_output_path(input: &Path, target_lang: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match input.extension() {
        Some(ext) => format!("{stem}.{target_lang}.{}", ext.to_string_lossy()),
        None => format!("{stem}.{target_lang}"),
    };
    input.with_file_name(file_name)
}

/// Uploads `job.input`, polls until the provider finishes and writes the
/// result to `job.output`. Nothing is written unless translation succeeds.
pub async fn translate_document<D>(gateway: &D, job: &DocumentJob) -> Result<DocumentOutcome, DocumentError>
where
    D: DocumentTranslator,
{
    let contents = fs::read(&job.input).map_err(|source| DocumentError::Read {
        path: job.input.clone(),
        source,
    })?;

    let upload = DocumentUpload {
        file_name: job
            .input
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        contents,
        source_lang: job
            .source_lang
            .clone()
            .filter(|lang| lang != AUTO_DETECT),
        target_lang: job.target_lang.clone(),
        options: job.options.clone(),
        minify: job.minify,
    };

    let handle = gateway.upload_document(&upload).await?;
    debug!(document_id = %handle.document_id, "document uploaded");

    let status = wait_until_done(gateway, &handle, job).await?;

    let translated = gateway.download_document(&handle).await?;
    atomic_write(&job.output, &translated).map_err(|source| DocumentError::Write {
        path: job.output.clone(),
        source,
    })?;

    Ok(DocumentOutcome {
        document_id: handle.document_id,
        output: job.output.clone(),
        billed_characters: status.billed_characters,
    })
}

async fn wait_until_done<D>(
    gateway: &D,
    handle: &DocumentHandle,
    job: &DocumentJob,
) -> Result<DocumentStatus, DocumentError>
where
    D: DocumentTranslator,
{
    let mut polls = 0;
    loop {
        let status = gateway.document_status(handle).await?;
        polls += 1;

        match status.status {
            DocumentState::Done => return Ok(status),
            DocumentState::Error => {
                return Err(DocumentError::Failed {
                    document_id: handle.document_id.clone(),
                    message: status
                        .error_message
                        .unwrap_or_else(|| "no reason given".to_string()),
                });
            }
            DocumentState::Queued | DocumentState::Translating => {
                if polls >= job.max_polls {
                    return Err(DocumentError::TimedOut {
                        document_id: handle.document_id.clone(),
                        polls,
                    });
                }
                debug!(
                    document_id = %handle.document_id,
                    state = ?status.status,
                    seconds_remaining = status.seconds_remaining,
                    "document not ready"
                );
                tokio::time::sleep(job.poll_interval).await;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("docs/report.docx"), "de"),
            PathBuf::from("docs/report.de.docx")
        );
        assert_eq!(
            default_output_path(Path::new("README"), "pt-BR"),
            PathBuf::from("README.pt-BR")
        );
    }

    #[test]
    fn test_status_parses_provider_states() {
        let status: DocumentStatus = serde_json::from_str(
            r#"{"document_id": "d1", "status": "translating", "seconds_remaining": 4}"#,
        )
        .unwrap();

        assert_eq!(status.status, DocumentState::Translating);
        assert_eq!(status.seconds_remaining, Some(4));
        assert!(status.billed_characters.is_none());
    }
}
