//! Command-line interface definitions.
//!
//! Defines the CLI structure for the crm-dashboard application using `clap`.
//! Running without a subcommand renders the dashboard once.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::adapter::outbound::export::ExportFormat;
use crate::adapter::outbound::sql::Dialect;

/// Read-only KPI dashboard over a CRM database
#[derive(Parser, Debug)]
#[command(name = "crm-dashboard")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file [default: ~/.crm-dashboard/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The selected subcommand, `show` when none was given.
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Show)
    }
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render KPI tiles, charts, and the detail report once
    Show,

    /// Write the report to a spreadsheet or CSV file
    Export(ExportArgs),

    /// Interactive dashboard with refresh and export actions
    Watch,

    /// Test database connectivity
    Check,

    /// List the SQL query catalog
    Queries(QueriesArgs),
}

/// Arguments for `crm-dashboard export`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Output file [default: crm_report.<format>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format; inferred from the output extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

/// Export format as accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

/// Arguments for `crm-dashboard queries`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct QueriesArgs {
    /// Show SQL for this dialect instead of the configured backend's
    #[arg(long, value_enum)]
    pub dialect: Option<DialectArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DialectArg {
    Postgres,
    Sqlite,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Postgres => Dialect::Postgres,
            DialectArg::Sqlite => Dialect::Sqlite,
        }
    }
}
