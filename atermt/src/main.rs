//! Atermt CLI - inspect and exercise the ATerm function-symbol registry.
//!
//! Parses the registry options, bootstraps a registry and dispatches to the
//! selected command handler.

mod commands;
mod error;

use std::io::{self, Write};
use std::process::ExitCode;

use aterm_afun::config::{ParsedOptions, OPT_DEPRECATED_TABLE_SIZE, OPT_HELP, OPT_TABLE_CLASS};
use aterm_afun::{AfunConfig, SymbolRegistry};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{run_builtins, run_intern, run_stats, run_stress, InternArgs, StatsArgs, StressArgs};
use error::{AtermtError, Result};

/// Atermt - ATerm symbol registry tool
#[derive(Parser, Debug)]
#[command(name = "atermt")]
#[command(author = "ATerm Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and exercise the ATerm function-symbol registry", long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "ATERMT_VERBOSE")]
    verbose: bool,

    /// Initial symbol table class; the table holds 2^CLASS symbols
    #[arg(long = "at-afuntable", value_name = "CLASS", global = true)]
    at_afuntable: Option<u8>,

    /// Print the registry options and their current values
    #[arg(long = "at-help", global = true)]
    at_help: bool,

    /// Deprecated, use --at-afuntable
    #[arg(long = "at-symboltable", value_name = "SIZE", global = true, hide = true)]
    at_symboltable: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands for the atermt CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print statistics of a freshly bootstrapped registry
    Stats(StatsCommand),

    /// Intern symbols and print their identities
    Intern(InternCommand),

    /// Intern many symbols, verify their identities and collect them
    Stress(StressCommand),

    /// List the well-known symbols
    Builtins,
}

/// Arguments for the stats subcommand.
#[derive(Parser, Debug)]
struct StatsCommand {
    /// Print JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the intern subcommand.
#[derive(Parser, Debug)]
struct InternCommand {
    /// Symbol names
    #[arg(required = true)]
    names: Vec<String>,

    /// Arity of every symbol
    #[arg(short, long, default_value_t = 0)]
    arity: usize,

    /// Intern quoted symbols
    #[arg(short, long)]
    quoted: bool,
}

/// Arguments for the stress subcommand.
#[derive(Parser, Debug)]
struct StressCommand {
    /// Number of distinct symbols
    #[arg(short, long, default_value_t = 10_000)]
    count: usize,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose)?;

    let options = registry_options(&cli)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if options.help {
        write!(out, "{}", options.config.help_text())?;
        out.flush()?;
        return Ok(());
    }
    let Some(command) = cli.command else {
        return Err(AtermtError::Validation("no command given, see --help".to_string()));
    };

    tracing::debug!(table_class = options.config.table_class, "bootstrapping registry");
    let mut registry = SymbolRegistry::new(options.config)?;

    execute_command(command, &mut registry, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Initialize the logging system.
///
/// Log records go to stderr so command output stays machine-readable.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let subscriber = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| AtermtError::Logging(e.to_string()))
}

/// Build the registry options from the environment and the flags.
///
/// The flags are replayed through the toolkit option scanner so the CLI
/// and embedding tools accept and reject the same options.
fn registry_options(cli: &Cli) -> Result<ParsedOptions> {
    let mut options = Vec::new();
    if let Some(class) = cli.at_afuntable {
        options.push(OPT_TABLE_CLASS.to_string());
        options.push(class.to_string());
    }
    if let Some(size) = cli.at_symboltable {
        options.push(OPT_DEPRECATED_TABLE_SIZE.to_string());
        options.push(size.to_string());
    }
    if cli.at_help {
        options.push(OPT_HELP.to_string());
    }

    Ok(AfunConfig::from_env().parse_args(options)?)
}

/// Execute the selected command.
fn execute_command(
    command: Commands,
    registry: &mut SymbolRegistry,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Stats(args) => run_stats(StatsArgs { json: args.json }, registry, out),
        Commands::Intern(args) => run_intern(
            InternArgs {
                names: args.names,
                arity: args.arity,
                quoted: args.quoted,
            },
            registry,
            out,
        ),
        Commands::Stress(args) => run_stress(StressArgs { count: args.count }, registry, out),
        Commands::Builtins => run_builtins(registry, out),
    }
}
