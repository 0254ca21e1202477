//! Configuration file management and resolution.

mod manager;

pub use manager::{
    ApiConfig, ConfigFile, ConfigManager, DEFAULT_ENDPOINT, OnTheFlyConfig, ResolveOptions,
    ResolvedConfig, TranslationConfig, resolve_config,
};
