//! Error types shared across the translation pipeline.
//!
//! Library layers return these typed errors; the CLI wraps them in
//! `anyhow::Error` and maps the root cause to an exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Settings that are missing or unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Missing required configuration: API key\n\n\
         Set the {env_var} environment variable:\n  \
         export {env_var}=\"your-api-key\"\n\n\
         Or set api_key under [api] in ~/.config/lingo/config.toml"
    )]
    MissingApiKey { env_var: String },

    #[error(
        "Invalid {role} language code: '{code}'\n\n\
         Valid codes include: en, de, fr, cs, ja, ...\n\
         Run 'lingo languages' to see all supported codes."
    )]
    InvalidLanguage { role: &'static str, code: String },
}

/// Failures of the persistent translation cache.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create cache directory: {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open cache database: {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to prepare cache schema")]
    Schema(#[source] rusqlite::Error),

    #[error("Invalid cache table name '{0}' (expected letters, digits and underscores)")]
    InvalidTableName(String),

    #[error("Cache lookup failed")]
    Lookup(#[source] rusqlite::Error),

    #[error("Failed to insert translation into cache")]
    Insert(#[source] rusqlite::Error),
}

/// Failures reported by the remote translation provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("Authentication with the translation API failed: {0}")]
    Auth(String),

    #[error("Translation quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Temporary translation API failure: {0}")]
    Transient(String),

    #[error("Translation API rejected the request: {0}")]
    InvalidRequest(String),
}

impl RemoteError {
    /// Returns `true` if a caller may retry the same request later.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Failures of a cache-aware translation call.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(
        "Missing required configuration: target language\n\n\
         Please provide it via:\n  \
         - CLI option: lingo --to <lang>\n  \
         - Config file: [translation] target_lang in ~/.config/lingo/config.toml"
    )]
    MissingTargetLanguage,

    #[error("Translation API returned {got} results for {expected} texts")]
    MalformedResponse { expected: usize, got: usize },

    #[error(transparent)]
    Segmentation(#[from] SegmentationError),
}

/// Placeholder segmentation produced a split that does not reproduce its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Segmentation of {input:?} is not lossless (reassembled {reassembled:?})")]
pub struct SegmentationError {
    pub input: String,
    pub reassembled: String,
}

/// Failures of a hierarchical merge.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Failed to translate {leaves} missing entries")]
    Translation {
        leaves: usize,
        #[source]
        source: TranslateError,
    },

    #[error("Key '{key}' is a {expected} in the source but a {found} in the existing translations")]
    ShapeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Key '{key}' could not be segmented")]
    Segmentation {
        key: String,
        #[source]
        source: SegmentationError,
    },
}

/// Failures while reading, translating or writing locale files.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Source file does not exist: {0}")]
    SourceMissing(PathBuf),

    #[error("Folder does not exist: {0}")]
    FolderMissing(PathBuf),

    #[error("Unsupported translation file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON translation file: {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid TOML translation file: {path}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to encode TOML for {path}")]
    TomlWrite {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },

    #[error("Failed to translate {path}")]
    Merge {
        path: PathBuf,
        #[source]
        source: MergeError,
    },
}

/// Glossary term lists that cannot be sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlossaryError {
    #[error("Glossary line {line} is not a tab-separated term pair: {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("Glossary term {0:?} is empty or contains a tab or line break")]
    InvalidTerm(String),

    #[error("Glossary has no entries")]
    Empty,
}

/// Failures of a whole-document translation.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("Failed to read document: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write translated document: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Translation of document {document_id} failed: {message}")]
    Failed { document_id: String, message: String },

    #[error("Document {document_id} was still being translated after {polls} status checks")]
    TimedOut { document_id: String, polls: u32 },
}
