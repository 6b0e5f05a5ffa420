//! CLI module graph and command dispatch.

pub mod chart;
pub mod check;
pub mod command;
pub mod diagnostic;
pub mod export;
pub mod output;
pub mod paths;
pub mod queries;
pub mod render;
pub mod show;
pub mod watch;

use std::process::ExitCode;

use command::{Cli, Commands};
use output::OutputConfig;

use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Configure output, resolve configuration, start logging, and run the
/// selected command.
pub fn run(cli: &Cli) -> ExitCode {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose, cli.color));

    let fallback = paths::default_config();
    let mut config = match Config::resolve(cli.config.as_deref(), &fallback) {
        Ok(config) => config,
        Err(e) => {
            report_config_error(cli, &fallback, &e);
            return ExitCode::FAILURE;
        }
    };

    config.logging.raise_verbosity(cli.verbose);
    if let Err(e) = config.init_logging() {
        output::warning(&format!("Logging disabled: {e}"));
    }

    match dispatch(cli, &config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: &Cli, config: &Config) -> Result<ExitCode> {
    match cli.command() {
        Commands::Show => show::execute(config),
        Commands::Export(args) => export::execute(config, &args),
        Commands::Watch => watch::execute(config),
        Commands::Check => check::execute(config),
        Commands::Queries(args) => {
            queries::execute(config, &args)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn report_config_error(cli: &Cli, fallback: &std::path::Path, err: &Error) {
    if let Error::Config(ConfigError::Parse(parse)) = err {
        let path = cli.config.as_deref().unwrap_or(fallback);
        if !output::is_json() {
            if let Some(rendered) = diagnostic::render_parse_error(path, parse) {
                eprintln!("{rendered}");
                return;
            }
        }
    }
    output::error(&format!("Failed to load config: {err}"));
}
