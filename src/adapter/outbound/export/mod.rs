//! Spreadsheet and CSV rendering of the current dashboard view.
//!
//! Artifacts are built fresh on every request from the view handed in and
//! returned as complete in-memory buffers.

mod delimited;
mod workbook;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::application::pipeline::DashboardView;
use crate::application::presentation::KpiTile;
use crate::error::{Error, Result};

pub use delimited::{build_csv, CSV_MIME};
pub use workbook::{build_workbook, REPORT_SHEET, SUMMARY_SHEET, XLSX_MIME};

/// Output format of an export request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }

    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Xlsx => XLSX_MIME,
            Self::Csv => CSV_MIME,
        }
    }

    /// Default download name, `crm_report.<ext>`.
    #[must_use]
    pub fn default_file_name(self) -> String {
        format!("crm_report.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            other => Err(Error::Export(format!("unknown export format '{other}'"))),
        }
    }
}

/// A downloadable export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Render `view` in `format`. XLSX carries the KPI summary sheet; CSV holds
/// the detail report only.
pub fn build_artifact(
    format: ExportFormat,
    view: &DashboardView,
    tiles: &[KpiTile],
) -> Result<ExportArtifact> {
    let bytes = match format {
        ExportFormat::Xlsx => build_workbook(tiles, &view.report)?,
        ExportFormat::Csv => build_csv(&view.report)?,
    };

    Ok(ExportArtifact {
        file_name: format.default_file_name(),
        mime: format.mime(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert_eq!("excel".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert_eq!(" csv ".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn default_names_use_the_extension() {
        assert_eq!(ExportFormat::Xlsx.default_file_name(), "crm_report.xlsx");
        assert_eq!(ExportFormat::Csv.mime(), "text/csv");
        assert_eq!(
            ExportFormat::Xlsx.mime(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }
}
