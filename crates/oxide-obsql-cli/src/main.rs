//! obsql CLI
//!
//! Command-line tool that parses OceanBase MySQL/Oracle SQL and prints the
//! reduced syntax tree and its diagnostics.

mod commands;
mod error;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_obsql_core::{Dialect, MySqlDialect, OracleDialect};

use crate::commands::{BuildOptions, OutputFormat};

/// Reduce OceanBase SQL into a typed syntax tree.
#[derive(Parser)]
#[command(name = "obsql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL dialect of the input.
    #[arg(short, long, env = "OBSQL_DIALECT", value_enum, default_value_t = DialectArg::Mysql)]
    dialect: DialectArg,

    /// Reduce top-level statements in parallel.
    #[arg(short, long)]
    parallel: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DialectArg {
    Mysql,
    Oracle,
}

impl DialectArg {
    fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::Mysql => &MySqlDialect,
            Self::Oracle => &OracleDialect,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the syntax tree of a script.
    Parse {
        /// Script to read (stdin if not specified).
        file: Option<PathBuf>,
    },

    /// Print diagnostics only; fails if any is an error.
    Check {
        /// Script to read (stdin if not specified).
        file: Option<PathBuf>,
    },

    /// List grammar rules and how each is reduced.
    Rules {
        /// Only list rules with a dedicated reduction.
        #[arg(long)]
        custom_only: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = BuildOptions {
        dialect: cli.dialect.dialect(),
        parallel: cli.parallel,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let code = match cli.command {
        Commands::Parse { file } => {
            let sql = commands::read_input(file.as_deref(), std::io::stdin())?;
            commands::parse(&sql, &options, cli.format, &mut out)?;
            ExitCode::SUCCESS
        }
        Commands::Check { file } => {
            let sql = commands::read_input(file.as_deref(), std::io::stdin())?;
            if commands::check(&sql, &options, &mut out)? {
                info!("no errors");
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Rules { custom_only } => {
            commands::rules(custom_only, cli.format, &mut out)?;
            ExitCode::SUCCESS
        }
    };
    out.flush()?;
    Ok(code)
}
