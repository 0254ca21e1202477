use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lingo")]
#[command(about = "Caching translation client for text and localization files")]
#[command(version)]
pub struct Args {
    /// Only print translations and errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show debug logs (cache hits, requests)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Language and endpoint overrides shared by translating commands.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct LanguageArgs {
    /// Source language code (e.g., en, de; `auto` to detect)
    #[arg(short = 's', long = "from")]
    pub from: Option<String>,

    /// Target language code (e.g., cs, ja, pt-BR)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// API endpoint URL
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    /// Bypass the translation cache
    #[arg(short = 'n', long)]
    pub no_cache: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate text given as arguments, a file or stdin
    Text {
        /// Texts to translate (reads --file or stdin if omitted)
        texts: Vec<String>,

        /// File to read the text from
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// Translate every non-empty line separately
        #[arg(short = 'l', long)]
        lines: bool,

        /// Keep `:placeholder` tokens out of the translation
        #[arg(short = 'p', long)]
        placeholders: bool,

        /// Formality preference (e.g., more, less, prefer_more)
        #[arg(long)]
        formality: Option<String>,

        /// Extra context that influences the translation
        #[arg(long)]
        context: Option<String>,

        /// Glossary ID to apply
        #[arg(long)]
        glossary: Option<String>,

        #[command(flatten)]
        lang: LanguageArgs,
    },
    /// Translate a locale file (.json or .toml)
    File {
        path: PathBuf,

        #[command(flatten)]
        lang: LanguageArgs,
    },
    /// Translate every locale file under a folder
    Folder {
        path: PathBuf,

        #[command(flatten)]
        lang: LanguageArgs,
    },
    /// Translate a key missing from a locale
    Key {
        /// Translation key, e.g. `auth.failed`
        key: String,

        /// Locale the key is missing from
        #[arg(long)]
        locale: String,

        /// Directory holding the locale files
        #[arg(long)]
        lang_dir: Option<PathBuf>,

        /// Placeholder replacement, e.g. `name=Taylor` (repeatable)
        #[arg(short = 'r', long = "replace", value_parser = parse_pair)]
        replace: Vec<(String, String)>,

        #[command(flatten)]
        lang: LanguageArgs,
    },
    /// Translate a whole document (docx, pptx, pdf, html, txt, ...)
    Document {
        /// Document to translate
        input: PathBuf,

        /// Where to write the result (default: <name>.<lang>.<ext> next to the input)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Source language code (detected if omitted)
        #[arg(short = 's', long = "from")]
        from: Option<String>,

        /// Target language code
        #[arg(short = 't', long = "to")]
        to: Option<String>,

        /// Formality preference (e.g., more, less)
        #[arg(long)]
        formality: Option<String>,

        /// Glossary ID to apply
        #[arg(long)]
        glossary: Option<String>,

        /// Let the provider shrink embedded media first
        #[arg(long)]
        minify: bool,

        /// API endpoint URL
        #[arg(short = 'e', long)]
        endpoint: Option<String>,
    },
    /// Manage glossaries stored by the provider
    Glossary {
        /// API endpoint URL
        #[arg(short = 'e', long)]
        endpoint: Option<String>,

        #[command(subcommand)]
        action: GlossaryCommand,
    },
    /// Show API usage and limits
    Usage {
        /// API endpoint URL
        #[arg(short = 'e', long)]
        endpoint: Option<String>,
    },
    /// List supported language codes
    Languages {
        /// Ask the provider instead of using the built-in list
        #[arg(short = 'r', long)]
        remote: bool,

        /// API endpoint URL (with --remote)
        #[arg(short = 'e', long, requires = "remote")]
        endpoint: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GlossaryCommand {
    /// List all glossaries
    List,
    /// Show one glossary
    Show {
        glossary_id: String,

        /// Also print the term pairs
        #[arg(long)]
        entries: bool,
    },
    /// Create a glossary from term pairs
    Create {
        name: String,

        /// Source language code
        #[arg(short = 's', long = "from")]
        from: String,

        /// Target language code
        #[arg(short = 't', long = "to")]
        to: String,

        /// Tab-separated file of `source<TAB>target` lines
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// Term pair, e.g. `cache=Zwischenspeicher` (repeatable)
        #[arg(long = "entry", value_parser = parse_pair)]
        entries: Vec<(String, String)>,
    },
    /// Delete a glossary
    Delete { glossary_id: String },
    /// List language pairs glossaries can be created for
    Pairs,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
