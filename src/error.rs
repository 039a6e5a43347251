use thiserror::Error;

/// Error type returned by injected period filters
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for manifest filtering
#[derive(Error, Debug)]
pub enum FilterError {
    /// A standard I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest JSON could not be parsed or written
    #[error("Manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be parsed
    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// The configuration could not be serialized
    #[error("Config write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The manifest has no periods to filter
    #[error("Manifest has no periods")]
    EmptyManifest,

    /// The injected period filter failed; later periods were not processed
    #[error("Period filter failed for period {period}: {source}")]
    PeriodFilter {
        period: String,
        #[source]
        source: BoxError,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FilterError>;
