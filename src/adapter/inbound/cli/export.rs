//! Handler for `export`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde_json::json;

use super::command::ExportArgs;
use super::output;
use super::show::{load_view, open_dashboard};
use crate::adapter::outbound::export::{build_artifact, ExportArtifact, ExportFormat};
use crate::application::pipeline::DashboardView;
use crate::application::presentation::kpi_tiles;
use crate::config::{Config, DashboardConfig};
use crate::error::Result;

/// Pick the format: explicit flag, then the output extension, then XLSX.
#[must_use]
pub fn resolve_format(args: &ExportArgs) -> ExportFormat {
    if let Some(format) = args.format {
        return format.into();
    }
    args.output
        .as_deref()
        .and_then(Path::extension)
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
        .unwrap_or_default()
}

/// Build `format` from `view` and write it to `path`.
pub fn write_export(
    view: &DashboardView,
    config: &DashboardConfig,
    format: ExportFormat,
    path: &Path,
) -> Result<ExportArtifact> {
    let tiles = kpi_tiles(&view.snapshot, &config.currency_symbol);
    let artifact = build_artifact(format, view, &tiles)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &artifact.bytes)?;
    Ok(artifact)
}

/// Report a finished export.
pub fn report_written(path: &Path, artifact: &ExportArtifact) {
    if output::is_json() {
        output::json_output(json!({
            "command": "export",
            "path": path.display().to_string(),
            "mime": artifact.mime,
            "bytes": artifact.bytes.len(),
        }));
        return;
    }
    output::action_done("Exported", &path.display().to_string());
}

/// Execute `export`.
pub fn execute(config: &Config, args: &ExportArgs) -> Result<ExitCode> {
    let format = resolve_format(args);
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format.default_file_name()));

    let dashboard = open_dashboard(config)?;
    let Some(view) = load_view(&dashboard) else {
        return Ok(ExitCode::FAILURE);
    };

    let artifact = write_export(&view, &config.dashboard, format, &path)?;
    report_written(&path, &artifact);
    Ok(ExitCode::SUCCESS)
}
