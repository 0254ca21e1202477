//! On-disk surface formats for translation trees.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

use super::TranslationTree;
use crate::error::FileError;
use crate::fs::atomic_write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Json,
    Toml,
}

impl TreeFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, FileError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(FileError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }

    pub fn parse(self, path: &Path, contents: &str) -> Result<TranslationTree, FileError> {
        match self {
            Self::Json => serde_json::from_str(contents).map_err(|source| FileError::Json {
                path: path.to_path_buf(),
                source,
            }),
            Self::Toml => toml::from_str(contents).map_err(|source| FileError::TomlParse {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Pretty-printed document with a trailing newline.
    pub fn render(self, path: &Path, tree: &TranslationTree) -> Result<String, FileError> {
        match self {
            Self::Json => {
                let mut buf = Vec::new();
                let mut serializer =
                    serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
                tree.serialize(&mut serializer)
                    .map_err(|source| FileError::Json {
                        path: path.to_path_buf(),
                        source,
                    })?;

                let mut out = String::from_utf8_lossy(&buf).into_owned();
                out.push('\n');
                Ok(out)
            }
            Self::Toml => toml::to_string_pretty(&tree.leaves_first()).map_err(|source| {
                FileError::TomlWrite {
                    path: path.to_path_buf(),
                    source,
                }
            }),
        }
    }

    pub fn load(path: &Path) -> Result<TranslationTree, FileError> {
        let format = Self::from_path(path)?;
        let contents = fs::read_to_string(path).map_err(|source| FileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        format.parse(path, &contents)
    }

    /// Writes `tree` atomically, creating missing directories.
    pub fn save(path: &Path, tree: &TranslationTree) -> Result<(), FileError> {
        let contents = Self::from_path(path)?.render(path, tree)?;
        atomic_write(path, &contents).map_err(|source| FileError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
