use crate::batch::{run_batch, BatchArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::infra::{print_json, read_quote_request};
use auto_quote::config::AppConfig;
use auto_quote::error::AppError;
use auto_quote::quote::QuoteEngine;
use auto_quote::telemetry;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "auto-quote",
    about = "Score auto insurance quotes from driver, vehicle, and policy inputs",
    version
)]
pub(crate) struct Cli {
    /// JSON rate sheet overriding QUOTE_RATING_PATH and the standard sheet
    #[arg(long, global = true)]
    pub(crate) rating: Option<PathBuf>,
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Quote a single JSON input document
    Quote(QuoteArgs),
    /// Quote every row of a CSV file, one JSON line per row
    Batch(BatchArgs),
    /// Quote the reference applicant and print a readable breakdown (default command)
    Demo(DemoArgs),
    /// Print the effective rate sheet as JSON
    Rates,
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Input document path, or '-' for stdin
    #[arg(long, short)]
    pub(crate) input: PathBuf,
    /// Emit single-line JSON instead of pretty output
    #[arg(long)]
    pub(crate) compact: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(path) = cli.rating {
        config.rating.path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let engine = config.rating.engine()?;
    let rate_sheet = config
        .rating
        .path
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "standard".to_string());
    info!(
        environment = ?config.environment,
        %rate_sheet,
        "quote engine ready"
    );

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Quote(args) => run_quote(&engine, args),
        Command::Batch(args) => run_batch(&engine, args),
        Command::Demo(args) => run_demo(&engine, args),
        Command::Rates => print_json(engine.rating(), false),
    }
}

fn run_quote(engine: &QuoteEngine, args: QuoteArgs) -> Result<(), AppError> {
    let request = read_quote_request(&args.input)?;
    let result = engine.quote_builder(request)?;
    print_json(&result, args.compact)
}
