//! Parsing statistics and result structures for incident CSV processing
//!
//! This module provides types for tracking parsing success rates and
//! surfacing excluded-row diagnostics to callers, so that no malformed
//! row is ever dropped without trace.

use crate::app::models::IncidentRecord;

/// Parsing result with incident records and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Successfully parsed incident records
    pub records: Vec<IncidentRecord>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of data rows encountered
    pub total_records: usize,

    /// Number of records successfully parsed
    pub records_parsed: usize,

    /// Number of rows skipped (empty rows plus failures)
    pub records_skipped: usize,

    /// Rows dropped because the timestamp was absent or unparseable
    pub invalid_timestamps: usize,

    /// Numeric field values that failed to parse (the record itself
    /// survives with the field unset)
    pub invalid_numeric_values: usize,

    /// List of parsing errors for debugging
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_records: 0,
            records_parsed: 0,
            records_skipped: 0,
            invalid_timestamps: 0,
            invalid_numeric_values: 0,
            errors: Vec::new(),
        }
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            100.0
        } else {
            (self.records_parsed as f64 / self.total_records as f64) * 100.0
        }
    }

    /// Check if parsing was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }

    /// Get summary of parsing statistics for reporting
    pub fn summary(&self) -> String {
        format!(
            "Parse summary: {} rows -> {} records ({:.1}% success) | \
             skipped: {} | invalid timestamps: {} | invalid numeric values: {}",
            self.total_records,
            self.records_parsed,
            self.success_rate(),
            self.records_skipped,
            self.invalid_timestamps,
            self.invalid_numeric_values
        )
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
