//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

pub use args::{Args, Command, GlossaryCommand, LanguageArgs};

use exitcode::ExitCode;

use crate::error::{
    ConfigError, DocumentError, FileError, GlossaryError, MergeError, RemoteError, StoreError,
    TranslateError,
};

/// Maps the first recognized cause in the error chain to a process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<RemoteError>() {
            return remote_code(e);
        }
        if let Some(e) = cause.downcast_ref::<StoreError>() {
            return store_code(e);
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return match e {
                ConfigError::MissingApiKey { .. } => exitcode::CONFIG,
                ConfigError::InvalidLanguage { .. } => exitcode::USAGE,
            };
        }
        if let Some(e) = cause.downcast_ref::<TranslateError>() {
            return translate_code(e);
        }
        if let Some(e) = cause.downcast_ref::<MergeError>() {
            match e {
                // the wrapped TranslateError comes next in the chain
                MergeError::Translation { .. } => continue,
                MergeError::ShapeMismatch { .. } | MergeError::Segmentation { .. } => {
                    return exitcode::DATAERR;
                }
            }
        }
        if let Some(e) = cause.downcast_ref::<FileError>() {
            match e {
                FileError::Merge { .. } => continue,
                FileError::SourceMissing(_) | FileError::FolderMissing(_) => {
                    return exitcode::NOINPUT;
                }
                FileError::UnsupportedFormat(_)
                | FileError::Json { .. }
                | FileError::TomlParse { .. } => return exitcode::DATAERR,
                FileError::Io { .. } | FileError::TomlWrite { .. } => return exitcode::IOERR,
            }
        }
        if let Some(e) = cause.downcast_ref::<DocumentError>() {
            return document_code(e);
        }
        if cause.is::<GlossaryError>() {
            return exitcode::DATAERR;
        }
        if cause.is::<toml::de::Error>() {
            return exitcode::CONFIG;
        }
    }
    exitcode::SOFTWARE
}

const fn remote_code(err: &RemoteError) -> ExitCode {
    match err {
        RemoteError::Auth(_) => exitcode::NOPERM,
        RemoteError::QuotaExceeded(_) => exitcode::UNAVAILABLE,
        RemoteError::Transient(_) => exitcode::TEMPFAIL,
        RemoteError::InvalidRequest(_) => exitcode::DATAERR,
    }
}

const fn store_code(err: &StoreError) -> ExitCode {
    match err {
        StoreError::InvalidTableName(_) => exitcode::CONFIG,
        _ => exitcode::IOERR,
    }
}

const fn document_code(err: &DocumentError) -> ExitCode {
    match err {
        DocumentError::Remote(e) => remote_code(e),
        DocumentError::Read { .. } => exitcode::NOINPUT,
        DocumentError::Write { .. } => exitcode::IOERR,
        DocumentError::Failed { .. } => exitcode::DATAERR,
        DocumentError::TimedOut { .. } => exitcode::TEMPFAIL,
    }
}

// Store and Remote are transparent, so their own variants never show up
// as separate links in the chain.
const fn translate_code(err: &TranslateError) -> ExitCode {
    match err {
        TranslateError::Store(e) => store_code(e),
        TranslateError::Remote(e) => remote_code(e),
        TranslateError::MissingTargetLanguage => exitcode::CONFIG,
        TranslateError::MalformedResponse { .. } => exitcode::DATAERR,
        TranslateError::Segmentation(_) => exitcode::SOFTWARE,
    }
}
