//! Aggregation statistics and result structures
//!
//! Tracks how many records an aggregation run included and why the rest
//! were excluded, so that no record is ever dropped without trace.

use crate::app::models::AggregatedRow;

/// Statistics for one aggregation run
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AggregationStats {
    /// Total number of input records
    pub total_input: usize,

    /// Records that contributed to a group
    pub included: usize,

    /// Records excluded because a selected key field was missing
    pub missing_key_fields: usize,

    /// Records excluded in mean mode because the numeric field was
    /// missing or not usable
    pub missing_numeric_values: usize,

    /// Number of output rows (one per distinct key tuple)
    pub groups_emitted: usize,
}

impl AggregationStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_input: 0,
            included: 0,
            missing_key_fields: 0,
            missing_numeric_values: 0,
            groups_emitted: 0,
        }
    }

    /// Fraction of input records that were included, as a percentage
    pub fn inclusion_rate(&self) -> f64 {
        if self.total_input == 0 {
            100.0
        } else {
            (self.included as f64 / self.total_input as f64) * 100.0
        }
    }

    /// Get summary of aggregation statistics for reporting
    pub fn summary(&self) -> String {
        format!(
            "Aggregation summary: {} records -> {} groups ({:.1}% included) | \
             missing key fields: {} | missing values: {}",
            self.total_input,
            self.groups_emitted,
            self.inclusion_rate(),
            self.missing_key_fields,
            self.missing_numeric_values
        )
    }
}

impl Default for AggregationStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one aggregation run
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// Output rows in canonical key order
    pub rows: Vec<AggregatedRow>,

    /// Run statistics and exclusion diagnostics
    pub stats: AggregationStats,
}

impl AggregationResult {
    /// Number of output rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the run produced no groups (a valid state, not an error)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
