//! Handler for `check`: a connectivity probe.

use std::process::ExitCode;

use serde_json::json;

use super::output;
use crate::adapter::outbound::sql::DieselCrmSource;
use crate::config::Config;
use crate::error::Result;
use crate::port::outbound::source::CrmSource;

/// Execute `check` by running the cheapest catalog query.
pub fn execute(config: &Config) -> Result<ExitCode> {
    let source = DieselCrmSource::connect(&config.database)?;
    let database = config.database.display_url();

    let pb = output::spinner("Checking database connection");
    let result = source.total_leads();

    if output::is_json() {
        pb.finish_and_clear();
        output::json_output(json!({
            "command": "check",
            "database": database,
            "dialect": source.dialect().as_str(),
            "ok": result.is_ok(),
            "total_leads": result.as_ref().ok(),
            "error": result.as_ref().err().map(ToString::to_string),
        }));
        return Ok(if result.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    match result {
        Ok(total) => {
            output::spinner_success(&pb, "Database reachable");
            output::field("Database", &database);
            output::field("Backend", output::highlight(source.dialect().as_str()));
            output::field("Leads", total);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            output::spinner_fail(&pb, "Database check failed");
            output::field("Database", &database);
            output::field("Error", &e);
            Ok(ExitCode::FAILURE)
        }
    }
}
