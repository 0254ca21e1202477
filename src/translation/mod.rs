mod language;
mod options;
mod translator;

pub use language::{
    AUTO_DETECT, SOURCE_LANGUAGES, TARGET_LANGUAGES, print_languages, validate_source_language,
    validate_target_language,
};
pub use options::{SplitSentences, TranslationOptions};
pub use translator::{CachingTranslator, TranslatorConfig};
