//! Tests for row serialization and file export

use super::*;
use crate::app::services::export_writer::{
    ExportFormat, export_rows_to_file, rows_to_csv_string, rows_to_json_string, write_rows,
};

#[test]
fn test_json_export_schema() {
    let json = rows_to_json_string(&count_rows(), false).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["Region_Type"], "Urban");
    assert_eq!(parsed[0]["Count"], 2);
    assert_eq!(parsed[1]["Incident_Type"], "Medical");
}

#[test]
fn test_pretty_json_is_indented() {
    let compact = rows_to_json_string(&count_rows(), false).unwrap();
    let pretty = rows_to_json_string(&count_rows(), true).unwrap();

    assert!(!compact.contains('\n'));
    assert!(pretty.contains("\n  "));

    let from_compact: serde_json::Value = serde_json::from_str(&compact).unwrap();
    let from_pretty: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(from_compact, from_pretty);
}

#[test]
fn test_csv_export_header_from_first_row() {
    let csv = rows_to_csv_string(&count_rows()).unwrap();
    let mut lines = csv.lines();

    assert_eq!(
        lines.next().unwrap(),
        "Region_Type,Incident_Type,MonthYear,Count"
    );
    assert_eq!(lines.next().unwrap(), "Urban,Fire,2020-01,2");
    assert_eq!(lines.next().unwrap(), "Urban,Medical,2020-01,1");
    assert_eq!(lines.next(), None);
}

#[test]
fn test_csv_export_mean_and_integer_key() {
    let csv = rows_to_csv_string(&mean_row()).unwrap();
    let mut lines = csv.lines();

    assert_eq!(lines.next().unwrap(), "Number_of_Injuries,MonthYear,Avg_Response_Time");
    assert_eq!(lines.next().unwrap(), "3,2021-06,14.5");
}

#[test]
fn test_empty_rows_serialize_to_empty_outputs() {
    assert_eq!(rows_to_csv_string(&[]).unwrap(), "");
    assert_eq!(rows_to_json_string(&[], false).unwrap(), "[]");
}

#[test]
fn test_write_rows_appends_trailing_newline() {
    let mut sink = Vec::new();
    write_rows(&mut sink, &count_rows(), ExportFormat::Json, false).unwrap();

    let output = String::from_utf8(sink).unwrap();
    assert!(output.ends_with('\n'));
    assert!(!output.ends_with("\n\n"));
}

#[test]
fn test_export_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("incident_trends.json");

    export_rows_to_file(&path, &count_rows(), ExportFormat::Json, true).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}
