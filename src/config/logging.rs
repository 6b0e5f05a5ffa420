//! Logging configuration and initialization.
//!
//! Events go to two sinks: the console (stderr, so stdout stays clean for
//! dashboard and JSON output) and an append-only log file. Both record
//! timestamp, level, target, and source location.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Deserialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::Result;

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
    /// Append-only log file; `None` logs to the console only.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Lower the level for each `-v`: one gives `debug`, two or more `trace`.
    pub fn raise_verbosity(&mut self, verbose: u8) {
        match verbose {
            0 => {}
            1 => self.level = "debug".into(),
            _ => self.level = "trace".into(),
        }
    }

    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// A subscriber that is already installed is left in place.
    pub fn init(&self) -> Result<()> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        let file = self.file.as_deref().map(open_append).transpose()?;
        let registry = tracing_subscriber::registry().with(filter);

        let installed = match self.format.as_str() {
            "json" => {
                let console = fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_file(true)
                    .with_line_number(true);
                let persistent = file.map(|file| {
                    fmt::layer()
                        .json()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_file(true)
                        .with_line_number(true)
                });
                registry.with(console).with(persistent).try_init()
            }
            _ => {
                let console = fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_file(true)
                    .with_line_number(true);
                let persistent = file.map(|file| {
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_file(true)
                        .with_line_number(true)
                });
                registry.with(console).with(persistent).try_init()
            }
        };

        if installed.is_err() {
            tracing::debug!("tracing subscriber already installed");
        }
        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
            file: Some(PathBuf::from("crm_app.log")),
        }
    }
}
