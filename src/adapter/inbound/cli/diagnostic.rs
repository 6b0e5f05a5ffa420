//! Miette-based diagnostics for configuration errors.
//!
//! A TOML parse failure is shown against the offending file with the bad
//! span labelled.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(crm_dashboard::config))]
pub struct ConfigDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// The configuration file content.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    /// Build a diagnostic from a TOML parse error, if it carries a span.
    #[must_use]
    pub fn from_toml(path: &Path, content: String, err: &toml::de::Error) -> Option<Self> {
        let span = err.span()?;
        Some(Self {
            message: format!("invalid configuration: {}", err.message()),
            src: NamedSource::new(path.display().to_string(), content),
            span: (span.start, span.end.saturating_sub(span.start)).into(),
            help: Some("see the [database], [logging] and [dashboard] sections".into()),
        })
    }
}

/// Render a parse error of the config file at `path` as a miette report.
///
/// Falls back to `None` when the file cannot be re-read or the error has no
/// location.
#[must_use]
pub fn render_parse_error(path: &Path, err: &toml::de::Error) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let diagnostic = ConfigDiagnostic::from_toml(path, content, err)?;
    Some(format!("{:?}", miette::Report::new(diagnostic)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_point_at_the_file() {
        let content = "[database]\nport = \"not a number\"\n".to_string();
        let err = toml::from_str::<crate::config::Config>(&content).unwrap_err();

        let diagnostic =
            ConfigDiagnostic::from_toml(Path::new("config.toml"), content.clone(), &err).unwrap();

        assert!(diagnostic.message.starts_with("invalid configuration"));
        assert!(diagnostic.span.offset() >= content.find("port").unwrap());
    }
}
