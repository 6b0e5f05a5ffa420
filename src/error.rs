use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("unsupported database backend '{scheme}' (enable the `{feature}` feature)")]
    UnsupportedBackend {
        scheme: String,
        feature: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The database could not be reached or refused the connection.
    #[error("connection error: {0}")]
    Connection(String),

    /// A catalog query failed to execute or returned an unexpected shape.
    #[error("query '{query}' failed: {source}")]
    Query {
        query: &'static str,
        #[source]
        source: diesel::result::Error,
    },

    #[error("export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the failure happened before any query could run.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
