use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use super::open_gateway;
use crate::config::ResolveOptions;
use crate::gateway::GlossaryManager;
use crate::glossary::{GlossaryEntries, GlossaryInfo, NewGlossary};
use crate::status;
use crate::ui::{Spinner, Style};

pub struct CreateOptions {
    pub name: String,
    pub source_lang: String,
    pub target_lang: String,
    pub file: Option<PathBuf>,
    pub entries: Vec<(String, String)>,
}

impl CreateOptions {
    /// Entries from `--file` first, then `--entry` pairs on top.
    pub fn collect_entries(&self) -> Result<GlossaryEntries> {
        let mut entries = match &self.file {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read glossary file: {}", path.display()))?;
                GlossaryEntries::from_tsv(&contents)
                    .with_context(|| format!("Invalid glossary file: {}", path.display()))?
            }
            None => GlossaryEntries::new(),
        };
        for (source, target) in &self.entries {
            entries.insert(source, target)?;
        }
        Ok(entries)
    }
}

pub async fn run_create(options: CreateOptions, resolve: &ResolveOptions) -> Result<()> {
    let entries = options.collect_entries()?;
    let glossary = NewGlossary::new(
        &options.name,
        &options.source_lang,
        &options.target_lang,
        entries,
    )?;
    let gateway = open_gateway(resolve)?;

    let spinner = Spinner::new("Creating glossary...");
    let info = gateway.create_glossary(&glossary).await;
    spinner.stop();
    let info = info?;

    status!("{} glossary {}", Style::success("Created:"), Style::value(&info.glossary_id));
    print_glossary(&info);
    Ok(())
}

pub async fn run_list(resolve: &ResolveOptions) -> Result<()> {
    let gateway = open_gateway(resolve)?;
    let spinner = Spinner::new("Fetching glossaries...");
    let glossaries = gateway.list_glossaries().await;
    spinner.stop();
    let glossaries = glossaries?;

    if glossaries.is_empty() {
        status!("No glossaries");
        return Ok(());
    }
    for info in &glossaries {
        print_glossary(info);
    }
    Ok(())
}

pub async fn run_show(glossary_id: &str, with_entries: bool, resolve: &ResolveOptions) -> Result<()> {
    let gateway = open_gateway(resolve)?;
    let spinner = Spinner::new("Fetching glossary...");
    let info = gateway.glossary(glossary_id).await;
    let entries = match (&info, with_entries) {
        (Ok(_), true) => Some(gateway.glossary_entries(glossary_id).await),
        _ => None,
    };
    spinner.stop();

    print_glossary(&info?);
    if let Some(entries) = entries {
        for (source, target) in entries?.iter() {
            println!("    {source} {} {target}", Style::secondary("→"));
        }
    }
    Ok(())
}

pub async fn run_delete(glossary_id: &str, resolve: &ResolveOptions) -> Result<()> {
    let gateway = open_gateway(resolve)?;
    gateway.delete_glossary(glossary_id).await?;
    status!("{} glossary {}", Style::success("Deleted:"), Style::value(glossary_id));
    Ok(())
}

pub async fn run_pairs(resolve: &ResolveOptions) -> Result<()> {
    let gateway = open_gateway(resolve)?;
    let spinner = Spinner::new("Fetching glossary language pairs...");
    let pairs = gateway.glossary_language_pairs().await;
    spinner.stop();

    println!("{}", Style::header("Glossary language pairs"));
    for pair in pairs? {
        println!("  {} → {}", Style::code(&pair.source_lang), Style::code(&pair.target_lang));
    }
    Ok(())
}

fn print_glossary(info: &GlossaryInfo) {
    let created = info
        .creation_time
        .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    let state = if info.ready { "ready" } else { "pending" };

    println!(
        "{}  {}  {} → {}  {} entries  {}",
        Style::value(&info.glossary_id),
        Style::header(&info.name),
        Style::code(&info.source_lang),
        Style::code(&info.target_lang),
        info.entry_count,
        Style::secondary(format!("{state} {created}").trim_end()),
    );
}
