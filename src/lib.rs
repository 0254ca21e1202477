//! # lingo - Caching Translation Client
//!
//! `lingo` translates text and localization files through a remote
//! translation API, remembering every translation in a local `SQLite`
//! cache so repeated requests never hit the API twice.
//!
//! ## Features
//!
//! - **Cache-aware batching**: one cache lookup and at most one API call per batch
//! - **Placeholder preservation**: `:name` tokens survive translation untouched
//! - **Locale files**: nested JSON and TOML trees, merged with existing translations
//! - **Missing keys**: translate a key on demand, directly or through a queue
//! - **Provider extras**: glossaries, whole-document translation, live language lists
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a sentence
//! lingo text --to de "Hello, world"
//!
//! # Translate every locale file under lang/en into Czech
//! lingo folder lang --from en --to cs
//!
//! # Translate one missing key
//! lingo key auth.welcome --locale cs -r name=Taylor
//!
//! # Translate a document and create a glossary
//! lingo document report.docx --to de
//! lingo glossary create "Product terms" --from en --to de --entry cache=Cache
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/lingo/config.toml`:
//!
//! ```toml
//! [translation]
//! source_lang = "en"
//! target_lang = "cs"
//! cache = true
//!
//! [api]
//! endpoint = "https://api-free.deepl.com/v2"
//! api_key_env = "LINGO_API_KEY"
//!
//! [on_the_fly]
//! lang_dir = "lang"
//! ```

/// Translation cache store backed by `SQLite`.
pub mod cache;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and resolution.
pub mod config;

/// Whole-document translation through the provider.
pub mod document;

/// Typed errors of the translation pipeline.
pub mod error;

/// Translation of locale files and folders.
pub mod files;

/// Cache keys for translation requests.
pub mod fingerprint;

/// File system utilities.
pub mod fs;

/// Remote translation provider interfaces and HTTP client.
pub mod gateway;

/// Glossary term lists and provider metadata.
pub mod glossary;

/// Input reading from arguments, files and stdin.
pub mod input;

/// Source-driven merge of translation trees.
pub mod merge;

/// Translation of keys missing from a locale.
pub mod on_the_fly;

/// Global output configuration (quiet mode, colors, logging).
pub mod output;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// Placeholder-preserving segmentation.
pub mod segment;

/// Cache-aware translator, options and language codes.
pub mod translation;

/// Nested key/value trees and their file formats.
pub mod tree;

/// Terminal UI components (spinner, colors).
pub mod ui;

/// API usage and limits.
pub mod usage;
