use shapecheck_pattern::PatternRegistry;
use tracing::debug;

use crate::cmd::ListArgs;
use crate::exit::{registry_error, CliResult, SUCCESS};
use crate::output::{print_listing, OutputFormat, PatternListing};

const LISTING_SCHEMA_ID: &str = "https://schemas.3leaps.dev/shapecheck/cli/v1/pattern-list.schema.json";

pub fn run(args: ListArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = PatternRegistry::from_directory(&args.path)
        .map_err(|err| registry_error("failed to load patterns", err))?;
    let patterns = registry.names();
    debug!(directory = %args.path.display(), count = patterns.len(), "listed patterns");

    print_listing(
        &PatternListing {
            schema_id: LISTING_SCHEMA_ID,
            directory: args.path.display().to_string(),
            patterns,
        },
        format,
    );
    Ok(SUCCESS)
}
