use crate::app::AppContext;
use crate::cli::anonymize::AnonymizeArgs;
use crate::cli::root::OutputFormat;
use crate::db;
use crate::error::CliError;
use crate::output;
use sqlmask_rs_sdk::{AnonymizeRequest, AnonymizerConfig};
use std::io::Read;
use tracing::debug;

pub fn run(context: &AppContext, args: AnonymizeArgs) -> Result<(), CliError> {
    let sql = resolve_sql(&args.sql, std::io::stdin())?;
    let config = AnonymizerConfig {
        identifier_quoting: args.quoting.into(),
    };
    let anonymizer = db::open_anonymizer(context, config, args.dry_run)?;
    debug!(dry_run = args.dry_run, "running anonymize command");

    match pollster::block_on(anonymizer.anonymize(AnonymizeRequest::new(sql))) {
        Ok(response) => {
            match context.format {
                OutputFormat::Json => output::print_anonymize_json(&response),
                OutputFormat::Table => output::print_anonymize_table(&response),
            }
            Ok(())
        }
        Err(err) => {
            if context.format == OutputFormat::Json {
                output::print_error_json(&err);
            }
            Err(err.into())
        }
    }
}

/// `-` reads the whole of `stdin`. The text is passed on unchanged, so blank
/// input behaves the same whichever way it arrives.
fn resolve_sql(arg: &str, mut stdin: impl Read) -> Result<String, CliError> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut input = String::new();
    stdin
        .read_to_string(&mut input)
        .map_err(|source| CliError::io("failed to read SQL from stdin", source))?;
    Ok(input)
}
