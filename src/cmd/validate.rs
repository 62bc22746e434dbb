use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::record::Record;
use crate::domain::report::ValidationReport;
use crate::domain::rules::RegistryConfig;
use crate::engine::catalog;
use crate::engine::registry::{RuleRegistry, build_registry};
use crate::engine::validate::{ValidateOptions, execute_validation};
use crate::io::{self, Format, IoError};
use crate::util::time;

/// Input arguments for validate command execution API.
#[derive(Debug, Clone, Default)]
pub struct ValidateCommandArgs {
    pub input: Option<PathBuf>,
    pub from: Option<Format>,
    pub rules: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub to: Option<Format>,
    pub tolerance: Option<f64>,
}

/// Structured command response that carries exit-code mapping and JSON payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValidateCommandResponse {
    pub exit_code: i32,
    pub payload: Value,
}

pub fn run_with_stdin<R: Read>(args: &ValidateCommandArgs, stdin: R) -> ValidateCommandResponse {
    match execute(args, stdin) {
        Ok(outcome) => report_response(outcome),
        Err(CommandError::InputUsage(message)) => ValidateCommandResponse {
            exit_code: 3,
            payload: json!({
                "error": "input_usage_error",
                "message": message,
            }),
        },
        Err(CommandError::Internal(message)) => ValidateCommandResponse {
            exit_code: 1,
            payload: json!({
                "error": "internal_error",
                "message": message,
            }),
        },
    }
}

struct ValidateOutcome {
    report: ValidationReport,
    artifact_path: Option<PathBuf>,
}

fn report_response(outcome: ValidateOutcome) -> ValidateCommandResponse {
    let exit_code = if outcome.report.clean { 0 } else { 2 };
    match serde_json::to_value(&outcome.report) {
        Ok(mut payload) => {
            if let Some(path) = &outcome.artifact_path {
                payload["artifact_path"] = json!(path.display().to_string());
            }
            ValidateCommandResponse { exit_code, payload }
        }
        Err(_) => ValidateCommandResponse {
            exit_code: 1,
            payload: json!({
                "error": "internal_error",
                "message": "failed to serialize validation report"
            }),
        },
    }
}

fn execute<R: Read>(
    args: &ValidateCommandArgs,
    stdin: R,
) -> Result<ValidateOutcome, CommandError> {
    let registry = load_registry(args)?;
    let options = resolve_options(args)?;
    let records = load_input_records(args, stdin)?;

    let report = execute_validation(&records, &registry, &options)
        .map_err(|error| CommandError::InputUsage(error.to_string()))?;

    let artifact_path = match &args.output {
        Some(directory) => Some(write_artifact(directory, args.to, &report)?),
        None => None,
    };

    Ok(ValidateOutcome {
        report,
        artifact_path,
    })
}

fn resolve_options(args: &ValidateCommandArgs) -> Result<ValidateOptions, CommandError> {
    let wage_tolerance = args.tolerance.unwrap_or(0.0);
    if !wage_tolerance.is_finite() || wage_tolerance < 0.0 {
        return Err(CommandError::InputUsage(
            "tolerance must be a non-negative number".to_string(),
        ));
    }
    Ok(ValidateOptions { wage_tolerance })
}

fn load_registry(args: &ValidateCommandArgs) -> Result<RuleRegistry, CommandError> {
    let Some(rules_path) = &args.rules else {
        return Ok(catalog::wage_filing_registry());
    };

    let format = io::resolve_input_format(None, Some(rules_path)).map_err(|err| {
        CommandError::InputUsage(format!(
            "unable to resolve rules format from `{}`: {err}",
            rules_path.display()
        ))
    })?;
    if !matches!(format, Format::Json | Format::Yaml) {
        return Err(CommandError::InputUsage(format!(
            "rules file must be json or yaml, got {format}"
        )));
    }

    let file = File::open(rules_path).map_err(|err| {
        CommandError::InputUsage(format!(
            "failed to open rules file `{}`: {err}",
            rules_path.display()
        ))
    })?;
    let values = io::reader::read_values(file, format).map_err(map_io_as_input_usage)?;
    if values.len() != 1 {
        return Err(CommandError::InputUsage(
            "rules file must contain exactly one document".to_string(),
        ));
    }
    let rules_value = values.into_iter().next().unwrap_or(Value::Null);
    let config: RegistryConfig = serde_json::from_value(rules_value)
        .map_err(|err| CommandError::InputUsage(format!("invalid rules document: {err}")))?;

    build_registry(&config).map_err(|error| CommandError::InputUsage(error.to_string()))
}

fn load_input_records<R: Read>(
    args: &ValidateCommandArgs,
    stdin: R,
) -> Result<Vec<Record>, CommandError> {
    if let Some(path) = &args.input {
        let format =
            io::resolve_input_format(args.from, Some(path)).map_err(map_io_as_input_usage)?;
        let file = File::open(path).map_err(|err| {
            CommandError::InputUsage(format!(
                "failed to open input file `{}`: {err}",
                path.display()
            ))
        })?;
        io::reader::read_records(file, format).map_err(map_io_as_input_usage)
    } else {
        let format = args.from.unwrap_or(Format::Json);
        io::reader::read_records(stdin, format).map_err(map_io_as_input_usage)
    }
}

/// Persists the aggregated issues next to the run, one row per issue group,
/// under a timestamped file name the way the upstream pipeline labels its
/// outputs.
fn write_artifact(
    directory: &Path,
    to: Option<Format>,
    report: &ValidationReport,
) -> Result<PathBuf, CommandError> {
    let format = to.unwrap_or(Format::Csv);
    let path = directory.join(format!(
        "validation_report_{}.{}",
        time::artifact_stamp(),
        format.extension()
    ));

    std::fs::create_dir_all(directory).map_err(|err| {
        CommandError::Internal(format!(
            "failed to create output directory `{}`: {err}",
            directory.display()
        ))
    })?;

    let rows: Vec<Value> = report
        .issues
        .iter()
        .map(|group| {
            serde_json::to_value(group)
                .map_err(|err| CommandError::Internal(format!("failed to serialize issue row: {err}")))
        })
        .collect::<Result<_, _>>()?;

    let file = File::create(&path).map_err(|err| {
        CommandError::Internal(format!(
            "failed to create report file `{}`: {err}",
            path.display()
        ))
    })?;
    io::writer::write_values(file, format, &rows)
        .map_err(|err| CommandError::Internal(err.to_string()))?;

    Ok(path)
}

fn map_io_as_input_usage(error: IoError) -> CommandError {
    CommandError::InputUsage(error.to_string())
}

enum CommandError {
    InputUsage(String),
    Internal(String),
}
