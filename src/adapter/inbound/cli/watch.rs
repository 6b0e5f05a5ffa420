//! Handler for `watch`: an interactive refresh loop.

use std::path::PathBuf;
use std::process::ExitCode;

use dialoguer::{theme::ColorfulTheme, Input, Select};

use super::export::{report_written, write_export};
use super::show::{load_view, open_dashboard};
use super::{output, render};
use crate::adapter::outbound::export::ExportFormat;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Actions offered after each render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Redraw,
    Refresh,
    Export,
    Quit,
}

impl Action {
    const ALL: [Action; 4] = [Action::Redraw, Action::Refresh, Action::Export, Action::Quit];

    const fn label(self) -> &'static str {
        match self {
            Self::Redraw => "Redraw",
            Self::Refresh => "Refresh data",
            Self::Export => "Export report",
            Self::Quit => "Quit",
        }
    }
}

/// Execute `watch`.
///
/// Cached data is reused across redraws until the TTL lapses or the user
/// asks for a refresh. A failed load offers the same menu so the user can
/// retry.
pub fn execute(config: &Config) -> Result<ExitCode> {
    if output::is_json() {
        return Err(ConfigError::InvalidValue {
            field: "json",
            reason: "`crm-dashboard watch` is interactive; use `show --json` instead".into(),
        }
        .into());
    }

    let dashboard = open_dashboard(config)?;
    let theme = ColorfulTheme::default();
    let labels: Vec<&str> = Action::ALL.iter().map(|action| action.label()).collect();

    loop {
        let view = load_view(&dashboard);
        if let Some(view) = &view {
            output::header(env!("CARGO_PKG_VERSION"));
            render::render_view(view, &config.dashboard);
            output::note(&format!(
                "generated at {}",
                view.snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        println!();

        let choice = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[choice] {
            Action::Redraw => {}
            Action::Refresh => dashboard.refresh(),
            Action::Export => {
                let Some(view) = view else {
                    output::warning("Nothing to export until data loads");
                    continue;
                };
                let path: String = Input::with_theme(&theme)
                    .with_prompt("Save report as")
                    .default(ExportFormat::Xlsx.default_file_name())
                    .interact_text()?;
                let path = PathBuf::from(path);
                let format: ExportFormat = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(|ext| ext.parse().ok())
                    .unwrap_or_default();

                match write_export(&view, &config.dashboard, format, &path) {
                    Ok(artifact) => report_written(&path, &artifact),
                    Err(e) => output::error(&format!("Export failed: {e}")),
                }
            }
            Action::Quit => return Ok(ExitCode::SUCCESS),
        }
    }
}
