use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::DEFAULT_TABLE;
use crate::error::ConfigError;
use crate::gateway::GatewayConfig;
use crate::paths;
use crate::translation::{
    TranslatorConfig, validate_source_language, validate_target_language,
};

pub const DEFAULT_ENDPOINT: &str = "https://api-free.deepl.com/v2";
const DEFAULT_AUTH_SCHEME: &str = "DeepL-Auth-Key";
const DEFAULT_API_KEY_ENV: &str = "LINGO_API_KEY";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRIES: u32 = 3;
const DEFAULT_LANG_DIR: &str = "lang";

/// Language defaults and cache settings in the `[translation]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationConfig {
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    /// Whether translations are cached (default: true).
    pub cache: Option<bool>,
    pub cache_table: Option<String>,
}

/// Provider connection settings in the `[api]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,
    pub auth_scheme: Option<String>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
}

impl ApiConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        let env_var = self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV);
        if let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|key| !key.is_empty())
    }
}

/// Settings for translating missing keys, in the `[on_the_fly]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnTheFlyConfig {
    pub lang_dir: Option<PathBuf>,
    pub source_lang: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/lingo/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub on_the_fly: OnTheFlyConfig,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub from: Option<String>,
    pub to: Option<String>,
    pub endpoint: Option<String>,
    pub no_cache: bool,
    pub lang_dir: Option<PathBuf>,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub gateway: GatewayConfig,
    pub translator: TranslatorConfig,
    pub cache_table: String,
    pub lang_dir: PathBuf,
    /// Source language of the locale files used for missing keys.
    pub on_the_fly_source: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take
/// precedence over built-in defaults. Languages are left unresolved when
/// neither source names them; the translator decides what that means.
///
/// # Errors
///
/// Returns an error if no API key is available or a configured language
/// code is not supported.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let api = &config_file.api;

    let Some(api_key) = api.get_api_key() else {
        let env_var = api.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV);
        return Err(ConfigError::MissingApiKey {
            env_var: env_var.to_string(),
        }
        .into());
    };

    let gateway = GatewayConfig {
        endpoint: options
            .endpoint
            .clone()
            .or_else(|| api.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        api_key: Some(api_key),
        auth_scheme: api
            .auth_scheme
            .clone()
            .unwrap_or_else(|| DEFAULT_AUTH_SCHEME.to_string()),
        timeout: Duration::from_secs(api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        retries: api.retries.unwrap_or(DEFAULT_RETRIES),
    };

    let translation = &config_file.translation;
    let translator = TranslatorConfig {
        default_source_lang: options.from.clone().or_else(|| translation.source_lang.clone()),
        default_target_lang: options.to.clone().or_else(|| translation.target_lang.clone()),
        use_cache: !options.no_cache && translation.cache.unwrap_or(true),
    };

    let on_the_fly = &config_file.on_the_fly;
    let on_the_fly_source = on_the_fly
        .source_lang
        .clone()
        .or_else(|| translation.source_lang.clone());

    check_language(translator.default_source_lang.as_deref(), validate_source_language)?;
    check_language(translator.default_target_lang.as_deref(), validate_target_language)?;
    check_language(on_the_fly_source.as_deref(), validate_source_language)?;

    Ok(ResolvedConfig {
        gateway,
        translator,
        cache_table: translation
            .cache_table
            .clone()
            .unwrap_or_else(|| DEFAULT_TABLE.to_string()),
        lang_dir: options
            .lang_dir
            .clone()
            .or_else(|| on_the_fly.lang_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LANG_DIR)),
        on_the_fly_source,
    })
}

fn check_language(code: Option<&str>, validate: fn(&str) -> Result<()>) -> Result<()> {
    code.map_or(Ok(()), |code| {
        validate(code).with_context(|| format!("Unsupported language '{code}' in configuration"))
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/lingo/config.toml`
    /// or `~/.config/lingo/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Self {
        Self {
            config_path: paths::config_dir().join("config.toml"),
        }
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Missing file means defaults; a file that fails to parse is an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
