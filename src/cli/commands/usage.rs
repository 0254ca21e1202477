use anyhow::Result;

use super::open_gateway;
use crate::config::ResolveOptions;
use crate::gateway::UsageReporter;
use crate::ui::{Spinner, Style};
use crate::usage::{Usage, UsageLevel, UsageRow};

pub async fn run_usage(resolve: &ResolveOptions) -> Result<()> {
    let gateway = open_gateway(resolve)?;

    let spinner = Spinner::new("Fetching usage...");
    let usage = gateway.usage().await?;
    spinner.stop();

    print_usage(&usage);
    Ok(())
}

/// Prints the usage table to stdout.
pub fn print_usage(usage: &Usage) {
    println!("{}", Style::header("API usage"));
    for row in usage.rows() {
        println!("  {}", format_row(&row));
    }

    if usage.any_limit_reached() {
        println!();
        println!("{}", Style::error("Translation limit exceeded"));
    }
}

fn format_row(row: &UsageRow) -> String {
    let detail = &row.detail;
    let line = format!(
        "{:<26} {:>12} / {:<12} {:>6.1}%  remaining {}",
        row.label,
        detail.count,
        detail.limit,
        detail.percentage(),
        detail.remaining()
    );

    match detail.level() {
        UsageLevel::Normal => line,
        UsageLevel::Warning => Style::warning(line),
        UsageLevel::Exceeded => Style::error(line),
    }
}
