//! debug-macros CLI
//!
//! Expands debug macros and flag imports in modules handed over as JSON

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "CLI tool needs to print to stdout/stderr"
)]

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod check_config;
mod expand;

#[derive(Parser)]
#[command(name = "debug-macros")]
#[command(about = "Expand debug macros and flag imports", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log more (-v for debug, -vv for trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a module
    Expand {
        /// Module tree serialized as JSON
        module: PathBuf,

        /// Macro configuration (TOML)
        #[arg(long, short)]
        config: PathBuf,

        /// Output representation
        #[arg(long, value_enum, default_value_t = OutputFormat::Js)]
        format: OutputFormat,

        /// Write here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Validate a configuration file and summarize it
    CheckConfig {
        /// Macro configuration (TOML)
        config: PathBuf,
    },
}

/// How the expanded module is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JavaScript source
    Js,
    /// Module tree as JSON
    Json,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Expand {
            module,
            config,
            format,
            output,
        } => {
            expand::expand(&module, &config, format, output.as_deref())?;
        }
        Commands::CheckConfig { config } => {
            check_config::check_config(&config)?;
        }
    }

    Ok(())
}
