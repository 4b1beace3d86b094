mod config;
mod logging;
mod summary;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rulefix_core::record_json_schema;
use rulefix_eval::{InspectError, InspectOptions, InspectionEngine, render_report};
use rulefix_generate::output::write_bytes_atomic;
use rulefix_generate::{FixtureGenerator, GenerationError};
use thiserror::Error;

use config::{ConfigError, load_config};
use logging::init_logging;
use summary::render_summary;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Inspect(#[from] InspectError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "rulefix", version, about = "Rule fixture generator")]
struct Cli {
    /// Also write JSON logs to this file.
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,
    /// Defaults to `generate` with built-in settings.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a shuffled rule fixture and its stats file.
    Generate(GenerateArgs),
    /// Classify the records of an existing fixture.
    Inspect(InspectArgs),
    /// Print the JSON Schema of a fixture line.
    Schema(SchemaArgs),
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Number of rules to generate.
    #[arg(long)]
    total: Option<u64>,
    /// Fixture path (.jsonl or .ndjson).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Seed for all random draws.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML config file; `rulefix.toml` is used when present.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Fixture to inspect.
    #[arg(value_name = "FIXTURE")]
    path: PathBuf,
    /// Write the report here instead of stdout.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
    /// Emit the report as JSON instead of markdown.
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Findings listed verbatim.
    #[arg(long, default_value_t = 20)]
    max_examples: usize,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Write the schema here instead of stdout.
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", failure_line(&err));
            ExitCode::FAILURE
        }
    }
}

fn failure_line(err: &CliError) -> String {
    format!("error: {err}")
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(cli.log_file.as_deref())?;

    match cli.command {
        None => run_generate(GenerateArgs::default()),
        Some(Command::Generate(args)) => run_generate(args),
        Some(Command::Inspect(args)) => run_inspect(args),
        Some(Command::Schema(args)) => run_schema(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        total,
        output,
        seed,
        config,
    } = args;

    let cwd = std::env::current_dir()?;
    let config = load_config(config.as_deref(), &cwd)?;
    let options = config.resolve(total, output, seed);

    let result = FixtureGenerator::new(options).run()?;
    println!("{}", render_summary(&result));
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<(), CliError> {
    let engine = InspectionEngine::new(InspectOptions {
        max_examples: args.max_examples,
    })?;
    let report = engine.run(&args.path)?;

    let rendered = if args.json {
        serde_json::to_string_pretty(&report)?
    } else {
        render_report(&report)
    };

    match args.report {
        Some(path) => {
            write_bytes_atomic(&path, rendered.as_bytes())?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn run_schema(args: SchemaArgs) -> Result<(), CliError> {
    let schema = serde_json::to_string_pretty(&record_json_schema())?;
    match args.out {
        Some(path) => write_bytes_atomic(&path, schema.as_bytes())?,
        None => println!("{schema}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_means_default_generate() {
        let cli = Cli::try_parse_from(["rulefix"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn generate_flags_parse() {
        let cli = Cli::try_parse_from([
            "rulefix",
            "generate",
            "--total",
            "100",
            "--seed",
            "7",
            "--output",
            "out/r.jsonl",
        ])
        .expect("parse");
        let Some(Command::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.total, Some(100));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.output, Some(PathBuf::from("out/r.jsonl")));
    }

    #[test]
    fn failures_are_reported_on_one_line() {
        let err = CliError::from(GenerationError::InvalidOptions(
            "total must be at least 1".to_string(),
        ));
        let line = failure_line(&err);
        assert_eq!(line.matches("total must be at least 1").count(), 1);
        assert!(line.starts_with("error: "));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn negative_total_is_rejected() {
        assert!(Cli::try_parse_from(["rulefix", "generate", "--total", "-5"]).is_err());
    }
}
