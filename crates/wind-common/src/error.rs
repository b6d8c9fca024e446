//! Error types for the turbine wind map.

use thiserror::Error;

/// Result type alias using WindMapError.
pub type WindMapResult<T> = Result<T, WindMapError>;

/// Primary error type for map generation.
#[derive(Debug, Error)]
pub enum WindMapError {
    // === Upstream Errors ===
    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("No forecast available: {0}")]
    NoForecastAvailable(String),

    // === Input Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // === Output Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Failed to parse data: {0}")]
    ParseError(String),
}

impl WindMapError {
    /// Whether this error aborts the whole map-generation pass.
    ///
    /// Everything else costs at most one representative point.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            WindMapError::InvalidConfiguration(_) | WindMapError::IoError(_)
        )
    }

    /// Short machine-readable code, used as a log field and metric label.
    pub fn code(&self) -> &'static str {
        match self {
            WindMapError::DataSourceUnavailable(_) => "data_source_unavailable",
            WindMapError::NoForecastAvailable(_) => "no_forecast_available",
            WindMapError::InvalidConfiguration(_) => "invalid_configuration",
            WindMapError::InvalidInput(_) => "invalid_input",
            WindMapError::RenderError(_) => "render_error",
            WindMapError::IoError(_) => "io_error",
            WindMapError::ParseError(_) => "parse_error",
        }
    }
}

impl From<std::io::Error> for WindMapError {
    fn from(err: std::io::Error) -> Self {
        WindMapError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for WindMapError {
    fn from(err: serde_json::Error) -> Self {
        WindMapError::ParseError(format!("JSON error: {}", err))
    }
}
