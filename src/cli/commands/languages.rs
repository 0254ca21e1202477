use anyhow::Result;

use super::open_gateway;
use crate::config::ResolveOptions;
use crate::gateway::{LanguageCatalog, LanguageKind, RemoteLanguage};
use crate::translation::print_languages;
use crate::ui::{Spinner, Style};

pub async fn run_languages(remote: bool, resolve: &ResolveOptions) -> Result<()> {
    if !remote {
        print_languages();
        return Ok(());
    }

    let gateway = open_gateway(resolve)?;
    let spinner = Spinner::new("Fetching languages...");
    let source = gateway.languages(LanguageKind::Source).await;
    let target = gateway.languages(LanguageKind::Target).await;
    spinner.stop();

    print_section("Source languages", &source?);
    println!();
    print_section("Target languages", &target?);
    Ok(())
}

fn print_section(title: &str, languages: &[RemoteLanguage]) {
    println!("{}", Style::header(title));
    for language in languages {
        println!("  {}", format_language(language));
    }
}

fn format_language(language: &RemoteLanguage) -> String {
    let line = format!("{:6} {}", Style::code(&language.code), Style::secondary(&language.name));
    match language.supports_formality {
        Some(true) => format!("{line} {}", Style::value("(formality)")),
        _ => line,
    }
}
