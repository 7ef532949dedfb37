use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Error type covering the different failure cases that can occur while
/// fetching inventory, shaping rows, or emitting reports.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Wrapper for IO failures such as writing report files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when an API payload does not decode as the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when the inventory API cannot be reached or rejects a request.
    /// Aborts the current operation; row-level skips never use this variant.
    #[error("inventory source unavailable: {0}")]
    Source(String),

    /// Raised at startup when a required environment variable is absent.
    #[error("missing required configuration value {0}")]
    Config(&'static str),

    /// Raised when a birth date does not follow the `YYYY-MM-DD` calendar
    /// format. Consumers degrade the affected cell instead of aborting.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl From<ureq::Error> for ExportError {
    fn from(error: ureq::Error) -> Self {
        ExportError::Source(error.to_string())
    }
}
