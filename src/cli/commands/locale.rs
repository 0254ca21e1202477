use anyhow::{Result, bail};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

use super::Session;
use crate::config::ResolveOptions;
use crate::files::{self, FileOutcome};
use crate::merge::MergeEngine;
use crate::on_the_fly::{KeyResolver, MissingKey};
use crate::status;
use crate::ui::{Spinner, Style};

pub async fn run_file(path: &Path, resolve: &ResolveOptions) -> Result<()> {
    let session = Session::open(resolve)?;
    let (source, target) = session.file_languages()?;
    let engine = MergeEngine::new(&session.translator);

    let spinner = Spinner::new(&format!("Translating {}...", path.display()));
    let outcome = files::translate_file(&engine, path, &source, &target).await?;
    spinner.stop();

    match outcome {
        Some(outcome) => report(&outcome),
        None => status!(
            "{} {} has no '{}' path component; nothing to do",
            Style::warning("Skipped:"),
            path.display(),
            source
        ),
    }
    Ok(())
}

pub async fn run_folder(folder: &Path, resolve: &ResolveOptions) -> Result<()> {
    let session = Session::open(resolve)?;
    let (source, target) = session.file_languages()?;
    let engine = MergeEngine::new(&session.translator);

    let spinner = Spinner::new(&format!("Translating {}...", folder.display()));
    let outcomes = files::translate_folder(&engine, folder, &source, &target).await?;
    spinner.stop();

    for outcome in &outcomes {
        report(outcome);
    }
    status!(
        "{} {} file(s), {} new translation(s)",
        Style::success("Done:"),
        outcomes.len(),
        outcomes.iter().map(|o| o.translated).sum::<usize>()
    );
    Ok(())
}

pub struct KeyOptions {
    pub key: String,
    pub locale: String,
    pub replace: Vec<(String, String)>,
    pub resolve: ResolveOptions,
}

pub async fn run_key(options: KeyOptions) -> Result<()> {
    let session = Session::open(&options.resolve)?;

    let Some(source) = options
        .resolve
        .from
        .clone()
        .or_else(|| session.config.on_the_fly_source.clone())
    else {
        bail!(
            "Missing required configuration: source language of the locale files\n\n\
             Please provide it via:\n  \
             - CLI option: lingo key --from <lang>\n  \
             - Config file: [on_the_fly] source_lang in ~/.config/lingo/config.toml"
        );
    };

    let resolver = KeyResolver::new(
        MergeEngine::new(&session.translator),
        session.config.lang_dir.clone(),
        source,
    );

    let job = MissingKey {
        key: options.key,
        locale: options.locale,
        replace: options.replace.into_iter().collect::<BTreeMap<_, _>>(),
    };

    let spinner = Spinner::new(&format!("Translating {}...", job.key));
    let value = resolver.resolve(&job).await?;
    spinner.stop();

    let Some(value) = value else {
        bail!(
            "Key '{}' not found in the source translations under {}",
            job.key,
            resolver.lang_dir().display()
        );
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{value}")?;
    stdout.flush()?;
    Ok(())
}

fn report(outcome: &FileOutcome) {
    status!(
        "{} {} {} {} ({} new)",
        Style::success("Translated"),
        Style::value(outcome.source_path.display()),
        Style::secondary("->"),
        Style::value(outcome.target_path.display()),
        outcome.translated
    );
}
