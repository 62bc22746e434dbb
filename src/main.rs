use std::io;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use wagegate::cmd::{catalog, validate};
use wagegate::io::Format;

#[derive(Debug, Parser)]
#[command(
    name = "wagegate",
    version,
    about = "Deterministic wage-filing validation CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate filing records and aggregate rule failures into a report.
    Validate(ValidateArgs),
    /// Print the built-in wage-filing rule catalog as a rules document.
    Catalog,
}

#[derive(Debug, clap::Args)]
struct ValidateArgs {
    /// Record input file; stdin is read when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Input format; resolved from the file extension when omitted, JSON on
    /// stdin.
    #[arg(long, value_enum)]
    from: Option<CliInputFormat>,

    /// Rules document (json or yaml); the built-in catalog applies when
    /// omitted.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Directory receiving the timestamped report artifact.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Artifact format.
    #[arg(long, value_enum)]
    to: Option<CliArtifactFormat>,

    /// Allowed absolute difference in wage-sum checks.
    #[arg(long)]
    tolerance: Option<f64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliInputFormat {
    Json,
    Jsonl,
    Csv,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliArtifactFormat {
    Json,
    Jsonl,
    Csv,
}

impl From<CliInputFormat> for Format {
    fn from(value: CliInputFormat) -> Self {
        match value {
            CliInputFormat::Json => Self::Json,
            CliInputFormat::Jsonl => Self::Jsonl,
            CliInputFormat::Csv => Self::Csv,
            CliInputFormat::Yaml => Self::Yaml,
        }
    }
}

impl From<CliArtifactFormat> for Format {
    fn from(value: CliArtifactFormat) -> Self {
        match value {
            CliArtifactFormat::Json => Self::Json,
            CliArtifactFormat::Jsonl => Self::Jsonl,
            CliArtifactFormat::Csv => Self::Csv,
        }
    }
}

#[derive(Serialize)]
struct CliError<'a> {
    error: &'a str,
    message: String,
    code: i32,
}

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return handle_parse_error(error),
    };

    match cli.command {
        Commands::Validate(args) => run_validate(args),
        Commands::Catalog => run_catalog(),
    }
}

fn handle_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{error}");
            0
        }
        _ => {
            emit_error("input_usage_error", error.to_string(), 3);
            3
        }
    }
}

fn run_validate(args: ValidateArgs) -> i32 {
    let command_args = validate::ValidateCommandArgs {
        input: args.input,
        from: args.from.map(Into::into),
        rules: args.rules,
        output: args.output,
        to: args.to.map(Into::into),
        tolerance: args.tolerance,
    };

    let stdin = io::stdin();
    let response = validate::run_with_stdin(&command_args, stdin.lock());
    emit_response(response.exit_code, &response.payload)
}

fn run_catalog() -> i32 {
    let response = catalog::run();
    emit_response(response.exit_code, &response.payload)
}

fn emit_response(exit_code: i32, payload: &Value) -> i32 {
    let written = match exit_code {
        0 | 2 => emit_json_stdout(payload),
        _ => emit_json_stderr(payload),
    };
    if written {
        exit_code
    } else {
        emit_error(
            "internal_error",
            "failed to serialize command response".to_string(),
            1,
        );
        1
    }
}

fn emit_json_stdout(value: &Value) -> bool {
    match serde_json::to_string(value) {
        Ok(serialized) => {
            println!("{serialized}");
            true
        }
        Err(_) => false,
    }
}

fn emit_json_stderr(value: &Value) -> bool {
    match serde_json::to_string(value) {
        Ok(serialized) => {
            eprintln!("{serialized}");
            true
        }
        Err(_) => false,
    }
}

fn emit_error(error: &'static str, message: String, code: i32) {
    let payload = CliError {
        error,
        message,
        code,
    };
    match serde_json::to_string(&payload) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(_) => eprintln!(
            "{{\"error\":\"internal_error\",\"message\":\"failed to serialize error\",\"code\":1}}"
        ),
    }
}
