use serde::Serialize;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

const VERSION_SCHEMA_ID: &str = "https://schemas.3leaps.dev/shapecheck/cli/v1/version.schema.json";

const PATTERN_MARKERS: &[&str] = &[
    "string", "number", "boolean", "integer", "anything", "object", "array", "function", "date",
];
const PATTERN_OPERATORS: &[&str] = &["$optional", "$oneOf", "$regex", "$literal"];

#[derive(Debug, Serialize)]
struct VersionInfo {
    schema_id: &'static str,
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<BuildInfo>,
}

#[derive(Debug, Serialize)]
struct BuildInfo {
    target_os: &'static str,
    target_arch: &'static str,
    rustc: &'static str,
    git_hash: &'static str,
    pattern_markers: &'static [&'static str],
    pattern_operators: &'static [&'static str],
}

pub fn run(args: VersionArgs, format: OutputFormat) -> CliResult<i32> {
    let info = version_info(args.extended);

    match (format, &info.build) {
        (OutputFormat::Json, _) => println!(
            "{}",
            serde_json::to_string(&info).unwrap_or_else(|_| "{}".to_string())
        ),
        (_, None) => println!("{} {}", info.name, info.version),
        (_, Some(build)) => {
            println!("name: {}", info.name);
            println!("version: {}", info.version);
            println!("target_os: {}", build.target_os);
            println!("target_arch: {}", build.target_arch);
            println!("rustc: {}", build.rustc);
            println!("git_hash: {}", build.git_hash);
            println!("pattern_markers: {}", build.pattern_markers.join(", "));
            println!("pattern_operators: {}", build.pattern_operators.join(", "));
        }
    }

    Ok(SUCCESS)
}

fn version_info(extended: bool) -> VersionInfo {
    VersionInfo {
        schema_id: VERSION_SCHEMA_ID,
        name: "shapecheck",
        version: env!("CARGO_PKG_VERSION"),
        build: extended.then(|| BuildInfo {
            target_os: std::env::consts::OS,
            target_arch: std::env::consts::ARCH,
            rustc: option_env!("RUSTC_VERSION").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            pattern_markers: PATTERN_MARKERS,
            pattern_operators: PATTERN_OPERATORS,
        }),
    }
}
