//! Grouping and reduction for incident records
//!
//! This module provides the pure aggregation pipeline that turns parsed
//! incident records into the grouped summary rows the dashboards render.
//! It is a stateless, synchronous transform: for a fixed input sequence
//! and grouping specification the output is identical on every run, in a
//! canonical order (lexicographic by key tuple).
//!
//! # Architecture
//!
//! The module is organized into logical components:
//! - [`aggregator`] - Grouping specification and the aggregation run
//! - [`key`] - Structured grouping keys and field selectors
//! - [`binner`] - Distance bucketing ahead of grouping
//! - [`filter`] - Row filtering for the dashboard export path
//! - [`stats`] - Aggregation statistics and result structures
//!
//! # Grouping discipline
//!
//! Keys are structured tuples of field values, never delimiter-joined
//! strings, so a categorical value containing a separator character can
//! never collide with another group. A record missing any selected key
//! field is excluded from the run and counted, never silently dropped.
//!
//! # Example Usage
//!
//! ```rust
//! use incident_aggregator::app::services::aggregator::{GroupingSpec, KeyField, aggregate};
//!
//! # fn example(records: Vec<incident_aggregator::IncidentRecord>) -> incident_aggregator::Result<()> {
//! let spec = GroupingSpec::counts(vec![
//!     KeyField::IncidentType,
//!     KeyField::RegionType,
//!     KeyField::MonthYear,
//! ]);
//!
//! let result = aggregate(&records, &spec)?;
//! println!("{} groups from {} records", result.rows.len(), result.stats.total_input);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod binner;
pub mod filter;
pub mod key;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use aggregator::{GroupingSpec, Reduction, aggregate};
pub use binner::{bucket_km, bucket_optional_km, bucket_raw};
pub use filter::RowFilter;
pub use key::{GroupKey, KeyField};
pub use stats::{AggregationResult, AggregationStats};
