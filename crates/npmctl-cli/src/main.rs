//! npmctl - manage Nginx Proxy Manager proxy hosts from the command line
//!
//! Each invocation resolves settings, authenticates once, performs a single
//! API call and prints the result. Errors go to stderr prefixed with `Error:`
//! and the process exits non-zero.
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::debug;

mod args;
mod commands;
mod display;
mod error;
mod settings;

use crate::args::Args;
use crate::error::CliError;
use crate::settings::{FileSettings, Settings};

/// Initializes logging to stderr.
///
/// `RUST_LOG` overrides the default filter, which is `warn`, or `debug` for
/// this tool's own crates when `--verbose` is given.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,npmctl=debug,npmctl_client=debug"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

async fn run(args: Args) -> Result<String> {
    let file = FileSettings::load(args.global.config.as_deref())?;
    let settings = Settings::from_env(&args.global, &file);
    debug!(
        "Using API at {} (timeout {}s)",
        settings.api_url, settings.timeout_seconds
    );

    Ok(commands::run(&args.command, &settings).await?)
}

/// Message of a clap parse error, without clap's `error:` lead and usage tail.
fn usage_error_message(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let message = rendered.strip_prefix("error: ").unwrap_or(&rendered);
    message
        .split("\n\n")
        .next()
        .unwrap_or_default()
        .trim_end()
        .to_string()
}

fn report(message: &impl std::fmt::Display) -> ExitCode {
    eprintln!("{} {message}", "Error:".bright_red());
    ExitCode::FAILURE
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return report(&usage_error_message(&e)),
    };
    init_logging(args.global.verbose);

    match run(args).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            if let Some(cli_error) = e.downcast_ref::<CliError>() {
                debug!(
                    "{:?} error at stage {:?}",
                    cli_error.kind(),
                    cli_error.stage()
                );
            }
            report(&e)
        }
    }
}
