//! Error types for the kuitti-core library.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for the kuitti library.
#[derive(Error, Debug)]
pub enum KuittiError {
    /// Receipt extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Structured-data cache error.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Report rendering error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// Neither the raw receipt nor its structured-data file exists.
    #[error("data file not found for {date}: neither {} nor {} exists", raw.display(), cache.display())]
    DataFileNotFound {
        date: NaiveDate,
        raw: PathBuf,
        cache: PathBuf,
    },

    /// A subtotal or the grand total does not fit in a decimal.
    #[error("total of {0} overflows")]
    TotalOverflow(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning receipt text into items.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A price or quantity token is not a valid number.
    #[error("malformed number in {field}: {value:?}")]
    MalformedNumber { field: String, value: String },
}

impl ExtractionError {
    pub(crate) fn malformed(field: &str, value: &str) -> Self {
        Self::MalformedNumber {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Errors related to the structured-data cache file.
#[derive(Error, Debug)]
pub enum CacheError {
    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row decoded but does not describe a valid item.
    #[error("invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

/// Errors related to rendering the output document.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Building or serializing the PDF failed.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the rendered document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the kuitti library.
pub type Result<T> = std::result::Result<T, KuittiError>;
