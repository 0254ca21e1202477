use anyhow::Result;
use clap::Parser;

use lingo_cache::cli::commands::{document, glossary, languages, locale, translate, usage};
use lingo_cache::cli::{Args, Command, GlossaryCommand, LanguageArgs, exit_code_for};
use lingo_cache::config::ResolveOptions;
use lingo_cache::output::{self, OutputConfig};
use lingo_cache::translation::{validate_source_language, validate_target_language};
use lingo_cache::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        verbose: args.verbose,
        no_color: args.no_color || std::env::var("NO_COLOR").is_ok(),
    });

    if let Err(err) = run(args.command).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        std::process::exit(exit_code_for(&err));
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Languages { remote, endpoint } => {
            languages::run_languages(remote, &endpoint_only(endpoint)).await?;
        }
        Command::Usage { endpoint } => {
            usage::run_usage(&endpoint_only(endpoint)).await?;
        }
        Command::Glossary { endpoint, action } => {
            run_glossary(action, &endpoint_only(endpoint)).await?;
        }
        Command::Document {
            input,
            output,
            from,
            to,
            formality,
            glossary,
            minify,
            endpoint,
        } => {
            let resolve = resolve_options(LanguageArgs {
                from,
                to,
                endpoint,
                no_cache: true,
            })?;
            let options = document::DocumentOptions {
                input,
                output,
                formality,
                glossary,
                minify,
                resolve,
            };
            document::run_document(options).await?;
        }
        Command::Text {
            texts,
            file,
            lines,
            placeholders,
            formality,
            context,
            glossary,
            lang,
        } => {
            let options = translate::TranslateOptions {
                texts,
                file,
                lines,
                placeholders,
                formality,
                context,
                glossary,
                resolve: resolve_options(lang)?,
            };
            translate::run_translate(options).await?;
        }
        Command::File { path, lang } => {
            locale::run_file(&path, &resolve_options(lang)?).await?;
        }
        Command::Folder { path, lang } => {
            locale::run_folder(&path, &resolve_options(lang)?).await?;
        }
        Command::Key {
            key,
            locale: target,
            lang_dir,
            replace,
            lang,
        } => {
            validate_target_language(&target)?;
            let mut resolve = resolve_options(lang)?;
            resolve.lang_dir = lang_dir;

            let options = locale::KeyOptions {
                key,
                locale: target,
                replace,
                resolve,
            };
            locale::run_key(options).await?;
        }
    }

    Ok(())
}

async fn run_glossary(action: GlossaryCommand, resolve: &ResolveOptions) -> Result<()> {
    match action {
        GlossaryCommand::List => glossary::run_list(resolve).await,
        GlossaryCommand::Show {
            glossary_id,
            entries,
        } => glossary::run_show(&glossary_id, entries, resolve).await,
        GlossaryCommand::Create {
            name,
            from,
            to,
            file,
            entries,
        } => {
            validate_source_language(&from)?;
            validate_target_language(&to)?;
            let options = glossary::CreateOptions {
                name,
                source_lang: from,
                target_lang: to,
                file,
                entries,
            };
            glossary::run_create(options, resolve).await
        }
        GlossaryCommand::Delete { glossary_id } => glossary::run_delete(&glossary_id, resolve).await,
        GlossaryCommand::Pairs => glossary::run_pairs(resolve).await,
    }
}

fn endpoint_only(endpoint: Option<String>) -> ResolveOptions {
    ResolveOptions {
        endpoint,
        ..ResolveOptions::default()
    }
}

fn resolve_options(lang: LanguageArgs) -> Result<ResolveOptions> {
    if let Some(ref code) = lang.from {
        validate_source_language(code)?;
    }
    if let Some(ref code) = lang.to {
        validate_target_language(code)?;
    }

    Ok(ResolveOptions {
        from: lang.from,
        to: lang.to,
        endpoint: lang.endpoint,
        no_cache: lang.no_cache,
        lang_dir: None,
    })
}
