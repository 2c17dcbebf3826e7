//! Column mapping and categorization for incident upload headers
//!
//! This module analyzes the CSV header row to resolve column names to
//! indices and to separate recognized schema columns from extras that
//! ride along in an upload.

use crate::constants::KNOWN_COLUMNS;
use csv::StringRecord;
use std::collections::HashMap;

/// Column mapping for a parsed upload header
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Column name to index mapping
    pub name_to_index: HashMap<String, usize>,

    /// Recognized schema columns present in the upload, in header order
    pub known_columns: Vec<String>,

    /// Columns outside the known schema; ignored during record parsing
    pub extra_columns: Vec<String>,
}

impl ColumnMapping {
    /// Analyze a header row to resolve and categorize columns.
    ///
    /// Duplicate column names resolve to the last occurrence, matching
    /// how the dashboard's client-side parser treated repeated headers.
    pub fn analyze(headers: &StringRecord) -> Self {
        let mut name_to_index = HashMap::new();
        let mut known_columns = Vec::new();
        let mut extra_columns = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            let column_name = header.trim().to_string();
            if column_name.is_empty() {
                continue;
            }

            if KNOWN_COLUMNS.contains(&column_name.as_str()) {
                if !known_columns.contains(&column_name) {
                    known_columns.push(column_name.clone());
                }
            } else if !extra_columns.contains(&column_name) {
                extra_columns.push(column_name.clone());
            }

            name_to_index.insert(column_name, index);
        }

        ColumnMapping {
            name_to_index,
            known_columns,
            extra_columns,
        }
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    /// Check if a column exists in the mapping
    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    /// Get statistics about the column mapping: total, known, extra
    pub fn stats(&self) -> (usize, usize, usize) {
        (
            self.name_to_index.len(),
            self.known_columns.len(),
            self.extra_columns.len(),
        )
    }
}
