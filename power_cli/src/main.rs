//! # Powerworks CLI Application
//!
//! Runs the power engineering calculators from a terminal.
//!
//! ```text
//! power_cli list
//! power_cli run 4 2 --input request.json
//! echo '{"Pc": 5, "Sigma": 1, "B": 7}' | power_cli run 3 1 --json
//! power_cli prompt 4 2
//! ```

mod config;
mod telemetry;

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use power_core::format::{render_text, MAX_PRECISION};
use power_core::{evaluate, CalcError, Calculator, ErrorEnvelope, ErrorKind, EvaluationOptions, Response};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::debug;

use config::{CliConfig, ConfigError, OutputFormat, DEFAULT_CONFIG_FILE};
use telemetry::TelemetryError;

#[derive(Parser, Debug)]
#[command(
    name = "power_cli",
    about = "Power engineering calculators: fuel, emissions, faults, reliability, loads",
    version
)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log filter, overrides the config file (RUST_LOG overrides both)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List calculators and their input fields
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate one request read from a file or stdin
    Run(RunArgs),
    /// Enter the fields of a calculator interactively
    Prompt(PromptArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Project number (1-6)
    project: u8,
    /// Calculator within the project ("1", "2", "3")
    slug: String,
    /// JSON payload file; `-` or omitted reads stdin
    #[arg(long, short)]
    input: Option<PathBuf>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct PromptArgs {
    project: u8,
    slug: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Print the JSON envelope instead of text
    #[arg(long)]
    json: bool,
    /// Decimals in results (0-17)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=MAX_PRECISION as i64))]
    precision: Option<u32>,
    /// Require composition sums to be exactly 100
    #[arg(long)]
    strict_sum: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("failed to read {what}: {source}")]
    Io {
        what: String,
        #[source]
        source: io::Error,
    },

    #[error("request is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} has nested inputs; use `run` with a JSON payload")]
    NotPromptable(Calculator),

    #[error(transparent)]
    Calculation(#[from] CalcError),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Calculation(err) if err.kind() == ErrorKind::NotFound => 2,
            CliError::NotPromptable(_) => 2,
            _ => 1,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    if let Err(err) = telemetry::init(&log_level) {
        eprintln!("Error: {}", CliError::from(err));
        return ExitCode::FAILURE;
    }

    let json_errors = match &cli.command {
        Command::Run(args) => output_format(&config, &args.output) == OutputFormat::Json,
        Command::Prompt(args) => output_format(&config, &args.output) == OutputFormat::Json,
        Command::List { .. } => false,
    };

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, json_errors);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(command: Command, config: &CliConfig) -> Result<(), CliError> {
    match command {
        Command::List { json } => list(json),
        Command::Run(args) => {
            let payload = read_payload(args.input.as_ref())?;
            let options = evaluation_options(config, &args.output);
            let response = evaluate(args.project, &args.slug, &payload, &options)?;
            print_response(&response, output_format(config, &args.output), &options)
        }
        Command::Prompt(args) => {
            let calculator = Calculator::resolve(args.project, &args.slug)?;
            if !calculator.is_flat() {
                return Err(CliError::NotPromptable(calculator));
            }
            let payload = prompt_fields(calculator)?;
            let options = evaluation_options(config, &args.output);
            let response = evaluate(args.project, &args.slug, &payload, &options)?;
            println!();
            print_response(&response, output_format(config, &args.output), &options)
        }
    }
}

fn output_format(config: &CliConfig, args: &OutputArgs) -> OutputFormat {
    if args.json {
        OutputFormat::Json
    } else {
        config.output
    }
}

fn evaluation_options(config: &CliConfig, args: &OutputArgs) -> EvaluationOptions {
    let mut options = config.evaluation_options();
    if args.strict_sum {
        options.closure_tolerance = 0.0;
    }
    if args.precision.is_some() {
        options.precision = args.precision;
    }
    options
}

// =============================================================================
// COMMANDS
// =============================================================================

fn list(as_json: bool) -> Result<(), CliError> {
    if as_json {
        let catalog: Vec<Value> = Calculator::ALL
            .iter()
            .map(|c| {
                json!({
                    "project": c.project(),
                    "slug": c.slug(),
                    "calculator": c.name(),
                    "title": c.display_name(),
                    "fields": c.fields(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    for calculator in Calculator::ALL {
        println!(
            "{}/{}  {:<18} {}",
            calculator.project(),
            calculator.slug(),
            calculator.name(),
            calculator.display_name()
        );
        for field in calculator.fields() {
            if field.unit.is_empty() {
                println!("      {:<20} {}", field.name, field.label);
            } else {
                println!("      {:<20} {} [{}]", field.name, field.label, field.unit);
            }
        }
    }
    Ok(())
}

fn read_payload(input: Option<&PathBuf>) -> Result<Value, CliError> {
    let text = match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path).map_err(|source| CliError::Io {
            what: path.display().to_string(),
            source,
        })?,
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| CliError::Io {
                    what: "stdin".to_string(),
                    source,
                })?;
            buffer
        }
    };
    debug!(bytes = text.len(), "read request payload");
    Ok(serde_json::from_str(&text)?)
}

/// Read one line; `None` on end of input.
fn prompt_line(prompt: &str) -> Result<Option<String>, CliError> {
    let to_cli = |source| CliError::Io {
        what: "stdin".to_string(),
        source,
    };

    print!("{}", prompt);
    io::stdout().flush().map_err(to_cli)?;

    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input).map_err(to_cli)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Ask for every field in form order. Values are kept as typed so the
/// validator reports empty or malformed entries the way a form would.
fn prompt_fields(calculator: Calculator) -> Result<Value, CliError> {
    println!("{} ({}/{})", calculator.display_name(), calculator.project(), calculator.slug());
    println!();

    let mut fields = Map::new();
    for field in calculator.fields() {
        let prompt = if field.unit.is_empty() {
            format!("{}: ", field.label)
        } else {
            format!("{} ({}): ", field.label, field.unit)
        };
        match prompt_line(&prompt)? {
            Some(value) => {
                fields.insert(field.name.to_string(), Value::String(value));
            }
            None => break,
        }
    }
    Ok(Value::Object(fields))
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_response(response: &Response, format: OutputFormat, options: &EvaluationOptions) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(response)?),
        OutputFormat::Text => {
            let precision = match options.precision {
                Some(precision) => precision,
                None => Calculator::resolve(response.project, &response.slug)?.default_precision(),
            };
            println!("{} ({}/{})", response.calculator, response.project, response.slug);
            print!("{}", render_text(&response.result, precision));
        }
    }
    Ok(())
}

fn report_error(err: &CliError, as_json: bool) {
    if let (true, CliError::Calculation(calc_err)) = (as_json, err) {
        let envelope = ErrorEnvelope::from(calc_err);
        if let Ok(json) = serde_json::to_string_pretty(&envelope) {
            println!("{}", json);
            return;
        }
    }
    eprintln!("Error: {}", err);
}
