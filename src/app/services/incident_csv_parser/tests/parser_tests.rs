//! Tests for the main incident CSV parser functionality

use super::*;
use crate::app::models::{IncidentType, RegionType};
use crate::app::services::incident_csv_parser::IncidentCsvParser;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_full_upload_counts_and_diagnostics() {
    let parser = IncidentCsvParser::new();
    let result = parser.parse_str(&create_full_upload()).unwrap();

    assert_eq!(result.stats.total_records, 4);
    assert_eq!(result.stats.records_parsed, 3);
    assert_eq!(result.stats.records_skipped, 1);
    assert_eq!(result.stats.invalid_timestamps, 1);
    // "n/a" response time: record kept, field unset, diagnostic counted
    assert_eq!(result.stats.invalid_numeric_values, 1);
    assert_eq!(result.stats.errors.len(), 1);

    assert_eq!(result.records.len(), 3);
    let last = &result.records[2];
    assert_eq!(last.month.to_string(), "2020-02");
    assert_eq!(last.response_time_min, None);
    assert_eq!(last.incident_type, Some(IncidentType::CardiacArrest));
}

#[test]
fn test_minimal_upload_column_subset() {
    let parser = IncidentCsvParser::new();
    let result = parser.parse_str(&create_minimal_upload()).unwrap();

    assert_eq!(result.stats.records_parsed, 3);
    for record in &result.records {
        assert!(record.region.is_some());
        assert!(record.incident_type.is_some());
        // columns absent from the upload stay unset without diagnostics
        assert!(record.response_time_min.is_none());
        assert!(record.distance_km.is_none());
    }
    assert_eq!(result.stats.invalid_numeric_values, 0);
}

#[test]
fn test_extra_columns_are_ignored() {
    let parser = IncidentCsvParser::new();
    let result = parser
        .parse_str(&create_upload_with_extra_columns())
        .unwrap();

    assert_eq!(result.stats.records_parsed, 2);
    assert_eq!(result.records[0].region, Some(RegionType::Urban));
    assert_eq!(result.records[1].region, Some(RegionType::Rural));
}

#[test]
fn test_empty_payload_yields_empty_sequence() {
    let parser = IncidentCsvParser::new();

    for payload in ["", "   ", "\n\n"] {
        let result = parser.parse_str(payload).unwrap();
        assert!(result.records.is_empty());
        assert_eq!(result.stats.total_records, 0);
        assert!(result.stats.errors.is_empty());
    }
}

#[test]
fn test_header_only_payload() {
    let parser = IncidentCsvParser::new();
    let result = parser.parse_str("Timestamp,Region_Type\n").unwrap();

    assert!(result.records.is_empty());
    assert_eq!(result.stats.total_records, 0);
}

#[test]
fn test_blank_data_lines_are_skipped() {
    let payload = "Timestamp,Region_Type\n2020-01-04 10:00:00,Urban\n,,\n2020-01-05 10:00:00,Rural\n";
    let parser = IncidentCsvParser::new();
    let result = parser.parse_str(payload).unwrap();

    assert_eq!(result.stats.records_parsed, 2);
    assert_eq!(result.stats.records_skipped, 1);
    // a separator-only row is not a parse failure
    assert!(result.stats.errors.is_empty());
}

#[test]
fn test_reparsing_is_deterministic() {
    let payload = create_full_upload();
    let parser = IncidentCsvParser::new();

    let first = parser.parse_str(&payload).unwrap();
    let second = parser.parse_str(&payload).unwrap();

    assert_eq!(first.records, second.records);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_row_ceiling_fails_fast() {
    let mut payload = String::from("Timestamp,Region_Type\n");
    for day in 1..=9 {
        payload.push_str(&format!("2020-01-{:02} 10:00:00,Urban\n", day));
    }

    let parser = IncidentCsvParser::with_max_rows(5);
    let result = parser.parse_str(&payload);

    match result {
        Err(crate::Error::RowLimitExceeded { limit, .. }) => assert_eq!(limit, 5),
        other => panic!("expected RowLimitExceeded, got {:?}", other),
    }
}

#[test]
fn test_parse_file_round_trip() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", create_minimal_upload()).unwrap();

    let parser = IncidentCsvParser::new();
    let result = parser.parse_file(temp_file.path()).unwrap();

    assert_eq!(result.stats.records_parsed, 3);
}

#[test]
fn test_parse_file_missing_path() {
    let parser = IncidentCsvParser::new();
    let result = parser.parse_file(std::path::Path::new("/nonexistent/upload.csv"));

    assert!(matches!(result, Err(crate::Error::FileNotFound { .. })));
}
