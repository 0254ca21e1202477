//! Subcommand implementations.

use anyhow::{Context, Result, bail};

use crate::cache::SqliteCacheStore;
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::gateway::HttpGateway;
use crate::translation::{AUTO_DETECT, CachingTranslator};

/// Document translation command handler.
pub mod document;

/// Glossary management command handlers.
pub mod glossary;

/// Language listing command handler.
pub mod languages;

/// Locale file and missing-key command handlers.
pub mod locale;

/// Text translation command handler.
pub mod translate;

/// Usage command handler.
pub mod usage;

/// Translator wired to the HTTP provider and the on-disk cache.
pub type AppTranslator = CachingTranslator<HttpGateway, SqliteCacheStore>;

/// Resolved settings plus the translator built from them.
pub struct Session {
    pub config: ResolvedConfig,
    pub translator: AppTranslator,
}

impl Session {
    pub fn open(options: &ResolveOptions) -> Result<Self> {
        let config = load_config(options)?;

        let gateway = HttpGateway::new(config.gateway.clone())?;
        let store = SqliteCacheStore::new(&config.cache_table)
            .context("Failed to open translation cache")?;
        let translator = CachingTranslator::new(gateway, store, config.translator.clone());

        Ok(Self { config, translator })
    }

    /// Language pair for file translation; both ends must be concrete codes.
    pub fn file_languages(&self) -> Result<(String, String)> {
        let source = self.translator.resolve_source_lang(None);
        if source == AUTO_DETECT {
            bail!(
                "Locale files need an explicit source language\n\n\
                 Please provide it via:\n  \
                 - CLI option: lingo --from <lang>\n  \
                 - Config file: [translation] source_lang in ~/.config/lingo/config.toml"
            );
        }
        let target = self.translator.resolve_target_lang(None)?;
        Ok((source, target))
    }
}

pub fn load_config(options: &ResolveOptions) -> Result<ResolvedConfig> {
    let config_file = ConfigManager::new().load_or_default()?;
    resolve_config(options, &config_file)
}

/// Gateway for commands that talk to the provider without the cache.
pub fn open_gateway(options: &ResolveOptions) -> Result<HttpGateway> {
    let config = load_config(options)?;
    Ok(HttpGateway::new(config.gateway)?)
}
