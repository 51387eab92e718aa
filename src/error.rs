//! Error types.
//!
//! Domain errors (`DataLoadError`, `CoordinateParseError`) are typed so callers
//! can match on them. `AppError` is what the binary reports: a message plus the
//! process exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for input, configuration and dataset load failures.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for terminal / runtime failures.
pub const EXIT_RUNTIME: u8 = 4;

/// Fatal failure while loading the forecast table.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to open forecast CSV '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read forecast CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: `{0}`")]
    MissingColumn(&'static str),

    #[error("line {line}: {message}")]
    MalformedRow { line: usize, message: String },

    #[error("forecast CSV contains no data rows")]
    Empty,
}

/// A `Coordinates` field that does not decompose into a (lat, lon) pair.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateParseError {
    #[error("expected `lat, lon` but found no comma in '{0}'")]
    MissingComma(String),

    #[error("expected exactly two components in '{0}'")]
    TooManyComponents(String),

    #[error("invalid {axis} component '{token}'")]
    InvalidNumber { axis: &'static str, token: String },

    #[error("coordinate ({lat}, {lon}) is outside the valid lat/lon range")]
    OutOfRange { lat: f64, lon: f64 },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<DataLoadError> for AppError {
    fn from(err: DataLoadError) -> Self {
        AppError::new(EXIT_INPUT, format!("Failed to load forecast data: {err}"))
    }
}
