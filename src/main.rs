use std::process::ExitCode;

use clap::Parser;
use crm_dashboard::adapter::inbound::cli::{self, command::Cli};

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    cli::run(&cli)
}
