use anyhow::Result;
use std::io::{self, Write};
use std::path::PathBuf;

use super::Session;
use crate::config::ResolveOptions;
use crate::input::InputReader;
use crate::translation::TranslationOptions;
use crate::ui::Spinner;

pub struct TranslateOptions {
    pub texts: Vec<String>,
    pub file: Option<PathBuf>,
    pub lines: bool,
    pub placeholders: bool,
    pub formality: Option<String>,
    pub context: Option<String>,
    pub glossary: Option<String>,
    pub resolve: ResolveOptions,
}

impl TranslateOptions {
    fn provider_options(&self) -> TranslationOptions {
        let mut options = TranslationOptions::new();
        if let Some(formality) = &self.formality {
            options = options.formality(formality);
        }
        if let Some(context) = &self.context {
            options = options.context(context);
        }
        if let Some(glossary) = &self.glossary {
            options = options.glossary(glossary);
        }
        options
    }
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let texts = InputReader::texts(&options.texts, options.file.as_deref(), options.lines)?;
    let session = Session::open(&options.resolve)?;
    let translator = &session.translator;
    let use_cache = translator.config().use_cache;
    let provider_options = options.provider_options();

    let spinner = Spinner::new("Translating...");

    let translated = if options.placeholders {
        let mut out = Vec::with_capacity(texts.len());
        for text in &texts {
            out.push(
                translator
                    .translate_preserving_placeholders(text, None, None, &provider_options, use_cache)
                    .await?,
            );
        }
        out
    } else {
        translator
            .translate_many(&texts, None, None, &provider_options, use_cache)
            .await?
            .into_iter()
            .map(|result| result.translated_text)
            .collect()
    };

    spinner.stop();

    let mut stdout = io::stdout().lock();
    for text in translated {
        writeln!(stdout, "{text}")?;
    }
    stdout.flush()?;

    Ok(())
}
