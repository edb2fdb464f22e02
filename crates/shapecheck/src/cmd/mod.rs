use clap::{ArgGroup, Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod check;
pub mod list;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a JSON value against a pattern.
    Check(CheckArgs),
    /// List the named patterns in a directory.
    List(ListArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Check(args) => check::run(args, format),
        Command::List(args) => list::run(args, format),
        Command::Version(args) => version::run(args, format),
    }
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["pattern", "registry"])))]
pub struct CheckArgs {
    /// Pattern document file.
    #[arg(long, short = 'p', value_name = "FILE", conflicts_with_all = ["registry", "name"])]
    pub pattern: Option<PathBuf>,
    /// Directory of `<name>.pattern.json` files.
    #[arg(long, value_name = "DIR", requires = "name")]
    pub registry: Option<PathBuf>,
    /// Pattern name to look up in --registry.
    #[arg(long, requires = "registry")]
    pub name: Option<String>,
    /// JSON value to check.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Read the JSON value from a file. Default: stdin.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
    /// Tolerate undeclared fields at the top level.
    #[arg(long)]
    pub loose: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directory of `<name>.pattern.json` files.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
