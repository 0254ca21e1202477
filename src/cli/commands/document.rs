use anyhow::Result;
use std::path::PathBuf;

use super::load_config;
use crate::config::ResolveOptions;
use crate::document::{DocumentJob, translate_document};
use crate::error::TranslateError;
use crate::gateway::HttpGateway;
use crate::status;
use crate::translation::TranslationOptions;
use crate::ui::{Spinner, Style};

pub struct DocumentOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub formality: Option<String>,
    pub glossary: Option<String>,
    pub minify: bool,
    pub resolve: ResolveOptions,
}

impl DocumentOptions {
    fn provider_options(&self) -> TranslationOptions {
        let mut options = TranslationOptions::new();
        if let Some(formality) = &self.formality {
            options = options.formality(formality);
        }
        if let Some(glossary) = &self.glossary {
            options = options.glossary(glossary);
        }
        options
    }
}

pub async fn run_document(options: DocumentOptions) -> Result<()> {
    let config = load_config(&options.resolve)?;
    let target = config
        .translator
        .default_target_lang
        .clone()
        .ok_or(TranslateError::MissingTargetLanguage)?;

    let mut job = DocumentJob::new(options.input.clone(), target);
    job.source_lang = config.translator.default_source_lang.clone();
    job.options = options.provider_options();
    job.minify = options.minify;
    if let Some(output) = &options.output {
        job.output = output.clone();
    }

    let gateway = HttpGateway::new(config.gateway)?;

    let spinner = Spinner::new(&format!("Translating {}...", options.input.display()));
    let outcome = translate_document(&gateway, &job).await;
    spinner.stop();
    let outcome = outcome?;

    match outcome.billed_characters {
        Some(billed) => status!(
            "{} {} ({} characters billed)",
            Style::success("Written:"),
            outcome.output.display(),
            billed
        ),
        None => status!("{} {}", Style::success("Written:"), outcome.output.display()),
    }
    Ok(())
}
