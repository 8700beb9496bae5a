//! Ratings Processor Library
//!
//! A Rust library for aggregating per-movie rating events from segmented
//! text files into a single seasonal Excel summary report.
//!
//! This library provides tools for:
//! - Loading movie metadata from a legacy-encoded delimited reference file
//! - Streaming rating files and grouping lines into per-movie blocks
//! - Accumulating rating histograms and observation date ranges per movie
//! - Deriving midpoint dates and season labels from the observed range
//! - Writing the finished rows to an Excel workbook with cell annotations
//! - Comprehensive error handling and recovery

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod movie_catalog;
        pub mod rating_stream;
        pub mod report_writer;
        pub mod row_builder;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{MovieAggregate, MovieMetadata, RatingEvent, ReportRow, Season};
pub use app::services::movie_catalog::MovieCatalog;
pub use config::Config;

/// Result type alias for the ratings processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for ratings processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed record error
    #[error("Record format error: {message}")]
    RecordFormat { message: String },

    /// Date parsing error
    #[error("Date parsing error: {message}")]
    DateParse {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Report workbook writing error
    #[error("Report writing error: {message}")]
    ReportWrite {
        message: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a malformed record error
    pub fn record_format(message: impl Into<String>) -> Self {
        Self::RecordFormat {
            message: message.into(),
        }
    }

    /// Create a date parsing error
    pub fn date_parse(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateParse {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a report writing error
    pub fn report_write(message: impl Into<String>, source: rust_xlsxwriter::XlsxError) -> Self {
        Self::ReportWrite {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateParse {
            message: "Date parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        Self::ReportWrite {
            message: "Workbook operation failed".to_string(),
            source: error,
        }
    }
}
