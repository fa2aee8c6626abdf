use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uniscout::fill::{self, FillOptions};
use uniscout::schema::WorkbookSchema;
use uniscout::{Result, ToolError, builder};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Build(args) => execute_build(args),
        Command::Fill(args) => execute_fill(args),
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn execute_build(args: BuildArgs) -> Result<()> {
    let schema = load_schema(args.schema.as_deref())?;
    builder::build_workbook(&args.output, &schema)
}

fn execute_fill(args: FillArgs) -> Result<()> {
    let schema = load_schema(args.schema.as_deref())?;
    let options = FillOptions {
        input: args.input,
        output: args.output,
        roster: args.roster,
        references: args.references,
        checkpoint: args.checkpoint,
    };
    fill::run(&schema, &options)
}

fn load_schema(path: Option<&Path>) -> Result<WorkbookSchema> {
    match path {
        Some(path) if !path.exists() => Err(ToolError::MissingInput(path.to_path_buf())),
        Some(path) => WorkbookSchema::from_file(path),
        None => Ok(WorkbookSchema::default_schema()),
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Build and populate a university comparison workbook."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the empty, schema-conformant workbook.
    Build(BuildArgs),
    /// Populate a built workbook by scraping public university pages.
    Fill(FillArgs),
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Output workbook path.
    #[arg(long, default_value = "Information.xlsx")]
    output: PathBuf,

    /// Optional JSON schema overriding the built-in sheet definitions.
    #[arg(long)]
    schema: Option<PathBuf>,
}

#[derive(clap::Args)]
struct FillArgs {
    /// Workbook produced by `build`.
    #[arg(long, default_value = "Information.xlsx")]
    input: PathBuf,

    /// Populated workbook to write.
    #[arg(long, default_value = "Information_Filled.xlsx")]
    output: PathBuf,

    /// Optional JSON roster overriding the built-in institution list.
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Optional JSON schema; must match the input workbook.
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Markdown log of every page the run consulted.
    #[arg(long, default_value = "references.md")]
    references: PathBuf,

    /// Resume checkpoint, removed once the output is saved.
    #[arg(long, default_value = "checkpoint.json")]
    checkpoint: PathBuf,
}
