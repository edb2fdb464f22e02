use std::io::Read;
use std::path::Path;

use shapecheck_pattern::{ensure, Diagnostic, Pattern, PatternRegistry, RegistryConfig, RegistryError};
use shapecheck_value::Value;
use tracing::{debug, info};

use crate::cmd::CheckArgs;
use crate::exit::{io_error, registry_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_check, CheckReport, OutputFormat};

const CHECK_SCHEMA_ID: &str = "https://schemas.3leaps.dev/shapecheck/cli/v1/check-result.schema.json";

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let strict = !args.loose;
    let value = read_value(&args)?;

    let (name, outcome) = match (&args.pattern, &args.registry, &args.name) {
        (Some(path), _, _) => {
            let pattern = load_pattern(path)?;
            (pattern_label(path), ensure(&value, &pattern, strict))
        }
        (None, Some(dir), Some(name)) => (name.clone(), check_registered(dir, name, &value, strict)?),
        _ => {
            return Err(CliError::new(
                USAGE,
                "either --pattern or --registry with --name is required",
            ))
        }
    };

    let report = match outcome {
        Ok(()) => {
            info!(pattern = %name, strict, "value matched");
            CheckReport {
                schema_id: CHECK_SCHEMA_ID,
                pattern: name,
                strict,
                matched: true,
                message: None,
                path: Vec::new(),
            }
        }
        Err(diagnostic) => {
            debug!(pattern = %name, strict, error = %diagnostic, "value mismatched");
            CheckReport {
                schema_id: CHECK_SCHEMA_ID,
                pattern: name,
                strict,
                matched: false,
                message: Some(diagnostic.message().to_string()),
                path: diagnostic.path().to_vec(),
            }
        }
    };

    print_check(&report, format);
    Ok(if report.matched { SUCCESS } else { DATA_INVALID })
}

fn check_registered(
    dir: &Path,
    name: &str,
    value: &Value,
    strict: bool,
) -> CliResult<Result<(), Diagnostic>> {
    let config = RegistryConfig {
        strict_mode: strict,
        fail_on_missing_pattern: true,
        ..RegistryConfig::default()
    };
    let registry = PatternRegistry::from_directory_with_config(dir, config)
        .map_err(|err| registry_error("failed to load patterns", err))?;

    match registry.validate_value(name, value) {
        Ok(()) => Ok(Ok(())),
        Err(RegistryError::Mismatch { source, .. }) => Ok(Err(source)),
        Err(err) => Err(registry_error("check failed", err)),
    }
}

fn load_pattern(path: &Path) -> CliResult<Pattern> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| io_error(&format!("failed to read {}", path.display()), err))?;
    Pattern::from_document_str(&text)
        .map_err(|err| registry_error(&format!("invalid pattern {}", path.display()), err))
}

fn read_value(args: &CheckArgs) -> CliResult<Value> {
    let json: serde_json::Value = if let Some(text) = &args.json {
        serde_json::from_str(text)
            .map_err(|err| CliError::new(DATA_INVALID, format!("--json is not valid JSON: {err}")))?
    } else if let Some(path) = &args.file {
        let bytes = std::fs::read(path)
            .map_err(|err| io_error(&format!("failed to read {}", path.display()), err))?;
        serde_json::from_slice(&bytes).map_err(|err| {
            CliError::new(
                DATA_INVALID,
                format!("{} is not valid JSON: {err}", path.display()),
            )
        })?
    } else {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|err| io_error("failed to read stdin", err))?;
        serde_json::from_str(&text)
            .map_err(|err| CliError::new(DATA_INVALID, format!("stdin is not valid JSON: {err}")))?
    };
    Ok(Value::from(json))
}

fn pattern_label(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    match file_name.strip_suffix(".pattern.json") {
        Some(stem) => stem.to_string(),
        None => file_name,
    }
}
