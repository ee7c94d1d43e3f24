//! diseasedx command-line entry point.
//!
//! # Responsibility
//! - Offline dataset conversion (CSV to JSON document or SQLite).
//! - Local queries against a built dataset, printed as JSON.

mod args;
mod commands;

use args::Cli;
use clap::Parser;
use diseasedx_core::{default_log_level, init_logging, LoggingConfig};
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = start_logging(&cli) {
        eprintln!("warning: logging disabled: {err}");
    }

    match commands::run(&cli, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_failed module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(cli: &Cli) -> Result<(), String> {
    let config = match &cli.log_dir {
        Some(dir) => {
            let level = cli
                .log_level
                .clone()
                .unwrap_or_else(|| default_log_level().to_string());
            Some(LoggingConfig::new(level, dir.clone()))
        }
        None => LoggingConfig::from_env(),
    };
    match config {
        Some(config) => init_logging(&config),
        None => Ok(()),
    }
}
