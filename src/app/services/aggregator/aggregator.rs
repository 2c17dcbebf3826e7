//! Grouping specification and the aggregation run
//!
//! Implements the core transform: partition records by a structured key
//! tuple, reduce each group to a count or a mean response time, and emit
//! one row per group in canonical key order.

use std::collections::BTreeMap;
use tracing::debug;

use super::key::{GroupKey, KeyField};
use super::stats::{AggregationResult, AggregationStats};
use crate::app::models::{AggregatedRow, IncidentRecord, Metric};
use crate::{Error, Result};

/// Reduction applied to each group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Group size: one per record, or the record's explicit weight for
    /// pre-aggregated inputs
    Count,
    /// Arithmetic mean of the response-time field. Records without a
    /// usable response time contribute to neither sum nor cardinality.
    MeanResponseTime,
}

/// Specification of one aggregation run: an ordered list of key-field
/// selectors plus the reduction mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingSpec {
    /// Key fields, in output column order
    pub key_fields: Vec<KeyField>,

    /// Reduction applied per group
    pub reduction: Reduction,
}

impl GroupingSpec {
    /// Create a grouping specification
    pub fn new(key_fields: Vec<KeyField>, reduction: Reduction) -> Self {
        Self {
            key_fields,
            reduction,
        }
    }

    /// Count records per group
    pub fn counts(key_fields: Vec<KeyField>) -> Self {
        Self::new(key_fields, Reduction::Count)
    }

    /// Average response time per group
    pub fn mean_response_time(key_fields: Vec<KeyField>) -> Self {
        Self::new(key_fields, Reduction::MeanResponseTime)
    }
}

/// Per-group accumulator state
enum Accumulator {
    Count(u64),
    Mean { sum: f64, cardinality: u64 },
}

/// Run an aggregation over fully materialized records.
///
/// This is a pure function of its inputs: no internal state, no side
/// effects beyond tracing. Records missing a selected key field, and
/// (in mean mode) records without a usable response time, are excluded
/// and counted in the statistics. The output carries exactly one row per
/// distinct key tuple among included records, sorted lexicographically
/// by the tuple.
pub fn aggregate(records: &[IncidentRecord], spec: &GroupingSpec) -> Result<AggregationResult> {
    if spec.key_fields.is_empty() {
        return Err(Error::data_validation(
            "Grouping specification must select at least one key field",
        ));
    }

    let mut stats = AggregationStats::new();
    stats.total_input = records.len();

    let mut groups: BTreeMap<GroupKey, Accumulator> = BTreeMap::new();

    for record in records {
        let Some(key) = GroupKey::for_record(&spec.key_fields, record) else {
            stats.missing_key_fields += 1;
            continue;
        };

        match spec.reduction {
            Reduction::Count => {
                stats.included += 1;
                match groups
                    .entry(key)
                    .or_insert(Accumulator::Count(0))
                {
                    Accumulator::Count(total) => *total += record.count_weight(),
                    Accumulator::Mean { .. } => unreachable!("count run holds count accumulators"),
                }
            }
            Reduction::MeanResponseTime => match record.response_time_min {
                Some(minutes) if minutes.is_finite() => {
                    stats.included += 1;
                    match groups.entry(key).or_insert(Accumulator::Mean {
                        sum: 0.0,
                        cardinality: 0,
                    }) {
                        Accumulator::Mean { sum, cardinality } => {
                            *sum += minutes;
                            *cardinality += 1;
                        }
                        Accumulator::Count(_) => {
                            unreachable!("mean run holds mean accumulators")
                        }
                    }
                }
                _ => {
                    // no usable value: the record joins neither sum nor
                    // cardinality, and never forms an empty group
                    stats.missing_numeric_values += 1;
                }
            },
        }
    }

    let rows: Vec<AggregatedRow> = groups
        .into_iter()
        .map(|(key, accumulator)| build_row(spec, key, accumulator))
        .collect();

    stats.groups_emitted = rows.len();
    debug!(
        "Aggregated {} records into {} groups ({} excluded for missing keys, {} for missing values)",
        stats.included, stats.groups_emitted, stats.missing_key_fields, stats.missing_numeric_values
    );

    Ok(AggregationResult { rows, stats })
}

/// Materialize one output row from a finished accumulator
fn build_row(spec: &GroupingSpec, key: GroupKey, accumulator: Accumulator) -> AggregatedRow {
    let fields = spec
        .key_fields
        .iter()
        .zip(key.values)
        .map(|(field, value)| (field.column_name().to_string(), value))
        .collect();

    let metric = match accumulator {
        Accumulator::Count(total) => Metric::Count(total),
        Accumulator::Mean { sum, cardinality } => {
            // cardinality is at least 1: groups only form from records
            // that contributed a value
            Metric::AvgResponseTime(sum / cardinality as f64)
        }
    };

    AggregatedRow::new(fields, metric)
}
