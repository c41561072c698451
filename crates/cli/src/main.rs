mod outcome;
mod schema_file;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use optschema::{OptionKind, Parser};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

use crate::outcome::Outcome;
use crate::schema_file::{DEFAULT_SCHEMA_NAME, load_definition, write_starter_definition};

#[derive(ClapParser)]
#[command(name = "optschema")]
#[command(version, about = "Parse arguments against a declarative option schema", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter optschema.json
    Init(InitArgs),

    /// Parse arguments against a schema and print the result as JSON
    Parse(ParseArgs),

    /// Print the usage text for a schema
    Usage(UsageArgs),

    /// Validate a schema without parsing anything
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Replace an existing schema file
    #[arg(long)]
    force: bool,
}

#[derive(clap::Args)]
struct SchemaArgs {
    /// Path to the schema definition
    #[arg(short, long, default_value = DEFAULT_SCHEMA_NAME, value_name = "FILE")]
    schema: PathBuf,

    /// Program name shown in usage and version output
    #[arg(short, long, value_name = "NAME")]
    program: Option<String>,
}

#[derive(clap::Args)]
struct ParseArgs {
    #[command(flatten)]
    schema: SchemaArgs,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print the whole parse result (values, help, version, errors) instead
    /// of acting on it
    #[arg(long)]
    report: bool,

    /// Arguments to parse; put them after `--`
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(clap::Args)]
struct UsageArgs {
    #[command(flatten)]
    schema: SchemaArgs,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Path to the schema definition
    #[arg(short, long, default_value = DEFAULT_SCHEMA_NAME, value_name = "FILE")]
    schema: PathBuf,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::Parse(args) => parse(args),
        Commands::Usage(args) => usage(args),
        Commands::Check(args) => check(args),
    }
}

fn load_parser(path: &Path) -> Result<Parser> {
    let definition = load_definition(path)?;
    Parser::new(definition).with_context(|| format!("invalid schema: {}", path.display()))
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn init(args: InitArgs) -> Result<ExitCode> {
    tracing::debug!("executing init command");

    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let dest = write_starter_definition(&dir, args.force)?;
    eprintln!("Created: {}", dest.display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Edit {DEFAULT_SCHEMA_NAME} to describe your options");
    eprintln!("  2. Run: optschema usage");
    eprintln!("  3. Run: optschema parse -- --last-name Smith in.txt");

    Ok(ExitCode::SUCCESS)
}

fn parse(args: ParseArgs) -> Result<ExitCode> {
    tracing::debug!("executing parse command");

    let parser = load_parser(&args.schema.schema)?;
    let program = args.schema.program.as_deref();
    let result = parser.parse_args(&args.args);
    let outcome = Outcome::from_result(&result);

    if args.report {
        println!("{}", to_json(&result, args.pretty)?);
        return Ok(ExitCode::from(outcome.exit_status()));
    }

    match &outcome {
        Outcome::Help => print!("{}", parser.usage(program)),
        Outcome::Version => println!("{}", parser.version(program)),
        Outcome::Failed(messages) => {
            for message in messages {
                eprintln!("error: {message}");
            }
            eprintln!();
            eprint!("{}", parser.usage(program));
        }
        Outcome::Matched => println!("{}", to_json(&result.values, args.pretty)?),
    }

    Ok(ExitCode::from(outcome.exit_status()))
}

fn usage(args: UsageArgs) -> Result<ExitCode> {
    tracing::debug!("executing usage command");

    let parser = load_parser(&args.schema.schema)?;
    print!("{}", parser.usage(args.schema.program.as_deref()));
    Ok(ExitCode::SUCCESS)
}

fn check(args: CheckArgs) -> Result<ExitCode> {
    tracing::debug!("executing check command");

    let parser = load_parser(&args.schema)?;
    let schema = parser.schema();

    eprintln!("=== Schema Check Results ===");
    eprintln!("Schema: {}", args.schema.display());
    for spec in schema.options() {
        let kind = match spec.kind {
            OptionKind::Boolean => "boolean",
            OptionKind::String { multi: false } => "string",
            OptionKind::String { multi: true } => "string (multi)",
            OptionKind::Help => "help",
            OptionKind::Version => "version",
        };
        let short = spec
            .short
            .map(|c| format!("-{c}"))
            .unwrap_or_else(|| "  ".to_string());
        let required = if spec.is_required() { ", required" } else { "" };
        eprintln!("  {short} --{} ({kind}{required})", spec.long);
    }
    for pos in schema.positional() {
        eprintln!("  <{}> (positional)", pos.name);
    }
    eprintln!("OK: schema is valid");

    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
