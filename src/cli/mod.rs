//! Command-line parsing for the correlation report bot.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "xaubot", version, about = "XAU/USD vs DXY correlation report bot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the Telegram bot and poll for commands.
    Run(RunArgs),
    /// Generate one report locally and print its path (no bot token needed).
    Report(ReportArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Directory for generated reports (overrides REPORT_DIR).
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Directory for the generated report (overrides REPORT_DIR).
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,
}
