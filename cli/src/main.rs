//! Hashgen CLI
//!
//! Validate hash unit configurations, evaluate header vectors and inspect
//! the programmed matrix.

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{check_configs, dump_matrix, eval_phv};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "hashgen")]
#[command(about = "Programmable hash generation unit model", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log more (-v debug, -vv trace); RUST_LOG applies when absent
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration files
    Check {
        #[arg(value_name = "CONFIG", required = true)]
        configs: Vec<PathBuf>,
    },
    /// Evaluate one header vector and print lanes, groups and views
    Eval {
        /// JSON configuration
        #[arg(short, long, value_name = "CONFIG")]
        config: PathBuf,

        /// Container values, one per line
        #[arg(long, value_name = "FILE")]
        phv: Option<PathBuf>,

        /// Container values (hex with 0x or decimal), appended after --phv
        #[arg(value_name = "VALUE")]
        values: Vec<String>,
    },
    /// Print the non-zero matrix cells as `lane slot mask`
    Matrix {
        /// JSON configuration
        #[arg(short, long, value_name = "CONFIG")]
        config: PathBuf,
    },
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Check { configs } => check_configs(configs)?,
        Commands::Eval {
            config,
            phv,
            values,
        } => eval_phv(config, phv.as_deref(), values)?,
        Commands::Matrix { config } => dump_matrix(config)?,
    }

    Ok(())
}
