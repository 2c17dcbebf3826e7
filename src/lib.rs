//! Incident Aggregator Library
//!
//! A Rust library for re-aggregating raw emergency-incident CSV uploads
//! into the grouped summary rows consumed by the ResQVision dashboards.
//!
//! This library provides tools for:
//! - Parsing incident CSV uploads with header-based column resolution
//! - Deriving canonical month buckets and distance buckets per record
//! - Grouping records by structured key tuples and reducing each group
//!   to a count or a mean response time
//! - Filtering aggregated rows the way the dashboard export path does
//! - Writing chart data files as pretty JSON or CSV
//! - Diagnostic counting for every excluded row, never silent drops

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod chart_specs;
        pub mod dashboard_data;
        pub mod export_writer;
        pub mod incident_csv_parser;
        pub mod metrics;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{AggregatedRow, DistanceBucket, IncidentRecord, Metric, MonthBucket};
pub use config::Config;

/// Result type alias for the incident aggregator
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for incident aggregation operations.
///
/// Per-row problems (bad timestamps, non-numeric fields, missing key
/// fields) are never represented here; they are counted in parse and
/// aggregation statistics and recovered locally. These variants cover
/// structural problems with the payload, configuration, or sinks.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV payload could not be read
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// JSON serialization or deserialization error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Upload exceeds the configured row ceiling
    #[error("Row limit exceeded: upload has at least {rows} data rows, limit is {limit}")]
    RowLimitExceeded { rows: usize, limit: usize },

    /// Chart name not present in the catalogue
    #[error("Unknown chart: '{name}'")]
    UnknownChart { name: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error from a simple message
    pub fn io_error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Io {
            source: std::io::Error::other(message.clone()),
            message,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a row limit exceeded error
    pub fn row_limit_exceeded(rows: usize, limit: usize) -> Self {
        Self::RowLimitExceeded { rows, limit }
    }

    /// Create an unknown chart error
    pub fn unknown_chart(name: impl Into<String>) -> Self {
        Self::UnknownChart { name: name.into() }
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

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
