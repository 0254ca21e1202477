//! Language code validation and supported languages.

use anyhow::Result;

use crate::error::ConfigError;
use crate::ui::Style;

/// Source language sentinel asking the provider to detect the language.
pub const AUTO_DETECT: &str = "auto";

/// Supported source language codes and their names.
pub const SOURCE_LANGUAGES: &[(&str, &str)] = &[
    (AUTO_DETECT, "Automatic detection"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sv", "Swedish"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("zh", "Chinese"),
];

/// Supported target language codes and their names.
pub const TARGET_LANGUAGES: &[(&str, &str)] = &[
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("en-GB", "English (British)"),
    ("en-US", "English (American)"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("pt-BR", "Portuguese (Brazilian)"),
    ("pt-PT", "Portuguese (European)"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sv", "Swedish"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("zh", "Chinese (Simplified)"),
];

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Source languages"));
    for (code, name) in SOURCE_LANGUAGES {
        println!("  {:6} {}", Style::code(code), Style::secondary(name));
    }
    println!();
    println!("{}", Style::header("Target languages"));
    for (code, name) in TARGET_LANGUAGES {
        println!("  {:6} {}", Style::code(code), Style::secondary(name));
    }
}

/// Validates that the given code can be used as a source language.
pub fn validate_source_language(lang: &str) -> Result<()> {
    validate(lang, SOURCE_LANGUAGES, "source")
}

/// Validates that the given code can be used as a target language.
pub fn validate_target_language(lang: &str) -> Result<()> {
    validate(lang, TARGET_LANGUAGES, "target")
}

fn validate(lang: &str, supported: &[(&str, &str)], role: &'static str) -> Result<()> {
    if supported.iter().any(|(code, _)| *code == lang) {
        Ok(())
    } else {
        Err(ConfigError::InvalidLanguage {
            role,
            code: lang.to_string(),
        }
        .into())
    }
}
