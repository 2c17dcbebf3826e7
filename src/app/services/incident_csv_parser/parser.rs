//! Core incident CSV parser implementation
//!
//! This module provides the main parser orchestration, handling payload
//! reading, header analysis, and per-row coordination between parsing
//! components.

use std::path::Path;
use tracing::{debug, info};

use super::column_mapping::ColumnMapping;
use super::record_parser::parse_incident_record;
use super::stats::{ParseResult, ParseStats};
use crate::constants::DEFAULT_MAX_ROWS;
use crate::{Config, Error, Result};

/// CSV parser for raw incident uploads
///
/// The parser focuses on essential functionality:
/// - Header-based column resolution, order independent
/// - Month bucket derivation with validated timestamps
/// - Counted diagnostics for every excluded row or malformed value
/// - A row ceiling so oversized uploads fail fast instead of degrading
///
/// Parsing is restartable: the same payload always yields the same
/// records and statistics, since no external state is consulted.
#[derive(Debug, Clone)]
pub struct IncidentCsvParser {
    max_rows: usize,
}

impl IncidentCsvParser {
    /// Create a parser with the default row ceiling
    pub fn new() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
        }
    }

    /// Create a parser with a custom row ceiling
    pub fn with_max_rows(max_rows: usize) -> Self {
        Self { max_rows }
    }

    /// Create a parser from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_rows: config.ingest.max_rows,
        }
    }

    /// Parse an incident CSV file and return records with statistics
    pub fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        info!("Parsing incident CSV file: {}", file_path.display());

        if !file_path.exists() {
            return Err(Error::file_not_found(file_path.display().to_string()));
        }

        let content = std::fs::read_to_string(file_path).map_err(|e| {
            Error::io(
                format!("Failed to read file {}", file_path.display()),
                e,
            )
        })?;

        self.parse_str(&content)
    }

    /// Parse an incident CSV payload.
    ///
    /// An empty payload yields an empty record sequence with zeroed
    /// statistics, not an error. Rows that cannot be parsed are skipped
    /// and counted; only structural problems (an unreadable header, an
    /// upload beyond the row ceiling) abort the run.
    pub fn parse_str(&self, content: &str) -> Result<ParseResult> {
        let mut stats = ParseStats::new();
        let mut records = Vec::new();

        if content.trim().is_empty() {
            debug!("Empty payload, producing no records");
            return Ok(ParseResult { records, stats });
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::csv_parsing("Failed to read CSV header row", Some(e)))?
            .clone();

        let column_mapping = ColumnMapping::analyze(&headers);
        let (total_cols, known_cols, extra_cols) = column_mapping.stats();
        debug!(
            "Column mapping: {} total, {} known, {} ignored",
            total_cols, known_cols, extra_cols
        );

        for result in csv_reader.records() {
            stats.total_records += 1;

            if stats.total_records > self.max_rows {
                return Err(Error::row_limit_exceeded(stats.total_records, self.max_rows));
            }

            match result {
                Ok(record) => {
                    // Rows of nothing but separators carry no data
                    if record.iter().all(|field| field.trim().is_empty()) {
                        stats.records_skipped += 1;
                        continue;
                    }

                    match parse_incident_record(&record, &column_mapping, &mut stats) {
                        Ok(incident) => {
                            records.push(incident);
                            stats.records_parsed += 1;
                        }
                        Err(e) => {
                            stats.records_skipped += 1;
                            stats.invalid_timestamps += 1;
                            stats
                                .errors
                                .push(format!("Record {}: {}", stats.total_records, e));
                            debug!("Skipped record {}: {}", stats.total_records, e);
                        }
                    }
                }
                Err(e) => {
                    stats.records_skipped += 1;
                    stats.errors.push(format!(
                        "CSV parse error at record {}: {}",
                        stats.total_records, e
                    ));
                }
            }
        }

        info!(
            "Parsed {} incident records from {} data rows",
            stats.records_parsed, stats.total_records
        );

        Ok(ParseResult { records, stats })
    }
}

impl Default for IncidentCsvParser {
    fn default() -> Self {
        Self::new()
    }
}
