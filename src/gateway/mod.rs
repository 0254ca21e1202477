//! Remote translation provider boundary.
//!
//! Each provider capability is its own trait so implementations can share
//! one transport while callers depend only on what they use.

mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::{DocumentHandle, DocumentStatus, DocumentUpload};
use crate::error::RemoteError;
use crate::glossary::{GlossaryEntries, GlossaryInfo, GlossaryLanguagePair, NewGlossary};
use crate::translation::TranslationOptions;
use crate::usage::Usage;

pub use http::{GatewayConfig, HttpGateway};

/// Outcome of translating one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
    /// Language the provider detected, or the explicit source language.
    pub detected_source_lang: String,
    pub billed_units: u64,
}

/// Which side of a translation a language list describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageKind {
    Source,
    Target,
}

impl LanguageKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }
}

/// A language as listed by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLanguage {
    #[serde(rename = "language")]
    pub code: String,
    pub name: String,
    /// Only reported for target languages.
    #[serde(default)]
    pub supports_formality: Option<bool>,
}

#[async_trait]
pub trait TextTranslator: Send + Sync {
    /// Translates `texts`, returning exactly one result per input in order.
    ///
    /// `source_lang` may be [`crate::translation::AUTO_DETECT`].
    async fn translate(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
        options: &TranslationOptions,
    ) -> Result<Vec<TranslationResult>, RemoteError>;
}

#[async_trait]
pub trait UsageReporter: Send + Sync {
    async fn usage(&self) -> Result<Usage, RemoteError>;
}

#[async_trait]
pub trait LanguageCatalog: Send + Sync {
    async fn languages(&self, kind: LanguageKind) -> Result<Vec<RemoteLanguage>, RemoteError>;
}

#[async_trait]
pub trait GlossaryManager: Send + Sync {
    async fn create_glossary(&self, glossary: &NewGlossary) -> Result<GlossaryInfo, RemoteError>;

    async fn list_glossaries(&self) -> Result<Vec<GlossaryInfo>, RemoteError>;

    async fn glossary(&self, glossary_id: &str) -> Result<GlossaryInfo, RemoteError>;

    async fn glossary_entries(&self, glossary_id: &str) -> Result<GlossaryEntries, RemoteError>;

    async fn delete_glossary(&self, glossary_id: &str) -> Result<(), RemoteError>;

    /// Language pairs glossaries can be created for.
    async fn glossary_language_pairs(&self) -> Result<Vec<GlossaryLanguagePair>, RemoteError>;
}

/// Asynchronous whole-document translation; see [`crate::document`].
#[async_trait]
pub trait DocumentTranslator: Send + Sync {
    async fn upload_document(&self, upload: &DocumentUpload) -> Result<DocumentHandle, RemoteError>;

    async fn document_status(&self, handle: &DocumentHandle) -> Result<DocumentStatus, RemoteError>;

    /// Fetches the translated file; only valid once the status is done.
    async fn download_document(&self, handle: &DocumentHandle) -> Result<Vec<u8>, RemoteError>;
}
