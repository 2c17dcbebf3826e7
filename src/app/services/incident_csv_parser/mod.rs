//! CSV parser for raw emergency-incident uploads
//!
//! This module provides a parser for comma-separated incident data with a
//! header row, producing typed [`IncidentRecord`](crate::IncidentRecord)
//! values ready for aggregation. Column resolution is by header name, so
//! uploads may carry any column order and any subset of the known schema.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Core parsing orchestration and payload handling
//! - [`column_mapping`] - Header analysis and column categorization
//! - [`record_parser`] - Individual CSV record processing
//! - [`field_parsers`] - Utility functions for field parsing and validation
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use incident_aggregator::app::services::incident_csv_parser::IncidentCsvParser;
//!
//! # fn example() -> incident_aggregator::Result<()> {
//! let parser = IncidentCsvParser::new();
//! let result = parser.parse_str("Timestamp,Region_Type\n2020-01-04 10:00:00,Urban\n")?;
//!
//! println!(
//!     "Parsed {} records from {} data rows",
//!     result.stats.records_parsed, result.stats.total_records
//! );
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod parser;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::ColumnMapping;
pub use parser::IncidentCsvParser;
pub use stats::{ParseResult, ParseStats};
