//! Error types and handling for the PDF link cleaner
//! Author: kartik4905

use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Custom result type for link cleaning operations
pub type Result<T> = StdResult<T, Error>;

/// Core error type for link cleaning operations
#[derive(Error, Debug)]
#[non_exhaustive]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Cannot open document '{}': {source}", path.display())]
    OpenError {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("Cannot write document '{}': {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid URI pattern '{pattern}': {source}")]
    PatternError {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("Thread pool error: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// True for failures that happen before any document is touched.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::ConfigError(_) | Error::ValidationError(_) | Error::PatternError { .. }
        )
    }
}
