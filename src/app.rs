//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initialises logging
//! - parses CLI arguments
//! - loads configuration from the environment
//! - starts the bot or runs a one-shot report

use clap::Parser;

use crate::cli::{Command, ReportArgs, RunArgs};
use crate::config::BotConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `xaubot` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();

    // We want a bare `xaubot` to behave like `xaubot run`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Report(args) => handle_report(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let mut config = BotConfig::from_env();
    if let Some(dir) = args.report_dir {
        config.report_dir = dir;
    }
    crate::bot::run(&config)
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = BotConfig::from_env();
    let dir = args.report_dir.unwrap_or(config.report_dir);

    let run = pipeline::run_report(&dir)?;
    println!("Report: {}", run.path.display());
    println!("Rows: {}", run.rows);
    println!("Correlation: {:.4}", run.correlation);
    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Rewrite argv so `xaubot` defaults to `xaubot run`.
///
/// Rules:
/// - `xaubot`                     -> `xaubot run`
/// - `xaubot --report-dir X`      -> `xaubot run --report-dir X`
/// - `xaubot --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "report");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_run() {
        assert_eq!(rewrite_args(args(&["xaubot"])), args(&["xaubot", "run"]));
    }

    #[test]
    fn leading_flag_is_treated_as_run_flag() {
        assert_eq!(
            rewrite_args(args(&["xaubot", "--report-dir", "/tmp"])),
            args(&["xaubot", "run", "--report-dir", "/tmp"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["xaubot", "report"])),
            args(&["xaubot", "report"])
        );
        assert_eq!(
            rewrite_args(args(&["xaubot", "--help"])),
            args(&["xaubot", "--help"])
        );
    }
}
