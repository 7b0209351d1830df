mod commands;
mod helpers;

use clap::Parser;
use spline_core::domain::SplineError;
use tracing_subscriber::EnvFilter;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let spline_error = error.as_spline_error();
            eprintln!("{}", spline_error.diagnostic_line());
            if let Some(summary_line) = spline_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            spline_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("genie-splines".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            init_logging(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

/// `RUST_LOG` takes precedence over the verbosity flag.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when `run` is called twice in one process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "genie-splines",
    version,
    about = "Inspect, tabulate, sum and flux-average GENIE cross-section splines"
)]
struct Cli {
    /// Log progress at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Print the parsed description of every spline
    Describe(commands::DescribeArgs),
    /// Write one cross-section table per spline
    Tables(commands::TablesArgs),
    /// Sum the splines of one target and current per neutrino flavor
    Sum(commands::SumArgs),
    /// Flux-average tabulated cross sections
    Convolve(commands::ConvolveArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Describe(args) => commands::run_describe_command(args),
        CliCommand::Tables(args) => commands::run_tables_command(args),
        CliCommand::Sum(args) => commands::run_sum_command(args),
        CliCommand::Convolve(args) => commands::run_convolve_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(SplineError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<SplineError> for CliError {
    fn from(error: SplineError) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_spline_error(&self) -> SplineError {
        match self {
            Self::Usage(message) => {
                SplineError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => SplineError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
