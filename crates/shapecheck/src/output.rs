use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub schema_id: &'static str,
    pub pattern: String,
    pub strict: bool,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PatternListing<'a> {
    pub schema_id: &'static str,
    pub directory: String,
    pub patterns: Vec<&'a str>,
}

pub fn print_check(report: &CheckReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PATTERN", "STRICT", "RESULT", "DETAIL"])
                .add_row(vec![
                    report.pattern.clone(),
                    report.strict.to_string(),
                    verdict(report.matched).to_string(),
                    report.message.clone().unwrap_or_default(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => match &report.message {
            None => println!("{}: {}", report.pattern, verdict(report.matched)),
            Some(message) => println!(
                "{}: {}\n  {message}",
                report.pattern,
                verdict(report.matched)
            ),
        },
    }
}

pub fn print_listing(listing: &PatternListing<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(listing),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PATTERN"]);
            for name in &listing.patterns {
                table.add_row(vec![name.to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for name in &listing.patterns {
                println!("{name}");
            }
        }
    }
}

fn print_json<T: Serialize>(out: &T) {
    println!(
        "{}",
        serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
    );
}

fn verdict(matched: bool) -> &'static str {
    if matched {
        "match"
    } else {
        "mismatch"
    }
}
