//! Row filtering for the dashboard export path
//!
//! The dashboards filter already-aggregated rows before rendering or
//! exporting: membership checks on categorical key columns plus an
//! inclusive month range. A row missing a filtered column is excluded,
//! matching the client-side behavior. An empty result is a valid "no
//! data" state, not an error.

use super::key::KeyField;
use crate::app::models::{AggregatedRow, MonthBucket};
use crate::constants::columns;
use std::collections::{BTreeMap, BTreeSet};

/// Filter over aggregated rows
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    /// Allowed values per output column; a column absent from the map is
    /// unconstrained
    allowed: BTreeMap<String, BTreeSet<String>>,

    /// Inclusive month-bucket range
    month_range: Option<(MonthBucket, MonthBucket)>,
}

impl RowFilter {
    /// Create an unconstrained filter (matches every row)
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain a key field to a set of allowed values.
    ///
    /// An empty value list leaves the field unconstrained, so optional
    /// CLI arguments compose without special cases.
    pub fn with_allowed_values<I, S>(mut self, field: KeyField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.allowed.insert(field.column_name().to_string(), values);
        }
        self
    }

    /// Constrain rows to an inclusive month range
    pub fn with_month_range(mut self, from: MonthBucket, to: MonthBucket) -> Self {
        self.month_range = Some((from, to));
        self
    }

    /// Whether this filter admits every row
    pub fn is_unconstrained(&self) -> bool {
        self.allowed.is_empty() && self.month_range.is_none()
    }

    /// Check a single row against the filter
    pub fn matches(&self, row: &AggregatedRow) -> bool {
        for (column, allowed) in &self.allowed {
            match row.field(column) {
                Some(value) => {
                    if !allowed.contains(&value.to_string()) {
                        return false;
                    }
                }
                // filtering on a column the row does not carry excludes it
                None => return false,
            }
        }

        if let Some((from, to)) = &self.month_range {
            let Some(value) = row.field(columns::MONTH_YEAR) else {
                return false;
            };
            let Ok(month) = value.to_string().parse::<MonthBucket>() else {
                return false;
            };
            if month < *from || month > *to {
                return false;
            }
        }

        true
    }

    /// Apply the filter, producing a fresh row collection
    pub fn apply(&self, rows: &[AggregatedRow]) -> Vec<AggregatedRow> {
        rows.iter().filter(|row| self.matches(row)).cloned().collect()
    }
}
