//! Handler for `show`, the default command.

use std::process::ExitCode;
use std::sync::Arc;

use super::{output, render};
use crate::adapter::outbound::sql::DieselCrmSource;
use crate::application::dashboard::Dashboard;
use crate::application::pipeline::DashboardView;
use crate::config::Config;
use crate::error::Result;

/// Notice shown whenever a render cycle has no data.
pub const UNAVAILABLE: &str = "Could not load dashboard data.";

/// Build the dashboard service for `config`.
pub fn open_dashboard(config: &Config) -> Result<Dashboard> {
    let source = DieselCrmSource::connect(&config.database)?;
    Ok(Dashboard::new(Arc::new(source), config.dashboard.cache_ttl()))
}

/// Load the current view behind a spinner. Prints the generic notice and
/// returns `None` when data is unavailable.
pub fn load_view(dashboard: &Dashboard) -> Option<Arc<DashboardView>> {
    let pb = output::spinner("Loading dashboard data");
    match dashboard.load() {
        Some(view) => {
            pb.finish_and_clear();
            Some(view)
        }
        None => {
            output::spinner_fail(&pb, UNAVAILABLE);
            output::hint("details were written to the log");
            None
        }
    }
}

/// Execute `show`: one render cycle.
pub fn execute(config: &Config) -> Result<ExitCode> {
    let dashboard = open_dashboard(config)?;
    let Some(view) = load_view(&dashboard) else {
        return Ok(ExitCode::FAILURE);
    };

    if !output::is_json() {
        output::header(env!("CARGO_PKG_VERSION"));
    }
    render::render_view(&view, &config.dashboard);
    Ok(ExitCode::SUCCESS)
}
