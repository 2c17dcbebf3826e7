//! Integration tests for data source selection and chart export
//!
//! Verifies that an upload session and the static fallback files are
//! interchangeable sources of chart rows, and that the export path
//! (filter + serialize) matches the dashboard behavior.

use incident_aggregator::Config;
use incident_aggregator::app::services::aggregator::{KeyField, RowFilter};
use incident_aggregator::app::services::chart_specs::{CHART_CATALOGUE, find_chart};
use incident_aggregator::app::services::dashboard_data::{
    DashboardDataService, SessionState, rows_from_json,
};
use incident_aggregator::app::services::export_writer::{
    ExportFormat, export_rows_to_file, rows_to_csv_string, rows_to_json_string,
};
use std::io::Write;
use tempfile::TempDir;

fn sample_upload() -> String {
    [
        "Timestamp,Region_Type,Incident_Type,Incident_Severity,Emergency_Level,Ambulance_Availability,Number_of_Injuries,Road_Type,Distance_to_Incident,Weather_Condition,Traffic_Congestion,Response_Time",
        "2019-12-28 23:10:00,Urban,Fire,High,Critical,Yes,2,Highway,3.4,Clear,High,12.5",
        "2020-01-04 10:15:00,Urban,Fire,High,Critical,Yes,2,Highway,3.0,Clear,High,17.5",
        "2020-01-17 22:40:00,Rural,Accident,Medium,Major,No,1,Street,11.0,Rainy,Low,21.0",
        "2020-03-02 08:05:00,Suburban,Cardiac Arrest,High,Critical,Yes,1,Avenue,0.9,Foggy,Moderate,9.0",
    ]
    .join("\n")
}

fn write_upload(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("incidents.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{}", sample_upload()).unwrap();
    path
}

#[test]
fn test_upload_and_static_fallback_are_interchangeable() {
    let dir = TempDir::new().unwrap();
    let upload_path = write_upload(&dir);
    let data_dir = dir.path().join("data");
    let config = Config::default().with_data_dir(&data_dir);

    // aggregate the upload and persist every chart file
    let upload_session = SessionState::client_upload(&upload_path, &data_dir);
    let upload_service = DashboardDataService::load(upload_session, &config).unwrap();

    for chart in CHART_CATALOGUE {
        let rows = upload_service.chart_rows(chart).unwrap();
        export_rows_to_file(
            &data_dir.join(chart.file_name()),
            &rows,
            ExportFormat::Json,
            true,
        )
        .unwrap();
    }

    // a fallback session reading those files yields identical rows
    let fallback_session = SessionState::static_fallback(&data_dir);
    let fallback_service = DashboardDataService::load(fallback_session, &config).unwrap();

    for chart in CHART_CATALOGUE {
        let from_upload = upload_service.chart_rows(chart).unwrap();
        let from_files = fallback_service.chart_rows(chart).unwrap();
        assert_eq!(from_upload, from_files, "chart {} differs", chart.name);
    }
}

#[test]
fn test_round_trip_through_serialized_json() {
    let dir = TempDir::new().unwrap();
    let upload_path = write_upload(&dir);
    let config = Config::default().with_data_dir(dir.path());

    let session = SessionState::client_upload(&upload_path, dir.path());
    let service = DashboardDataService::load(session, &config).unwrap();

    let chart = find_chart("incident_trends").unwrap();
    let rows = service.chart_rows(chart).unwrap();

    let serialized = rows_to_json_string(&rows, true).unwrap();
    let reloaded = rows_from_json(&serialized, chart).unwrap();

    assert_eq!(rows, reloaded);
}

#[test]
fn test_filtered_export_matches_dashboard_semantics() {
    let dir = TempDir::new().unwrap();
    let upload_path = write_upload(&dir);
    let config = Config::default().with_data_dir(dir.path());

    let session = SessionState::client_upload(&upload_path, dir.path());
    let service = DashboardDataService::load(session, &config).unwrap();

    let chart = find_chart("incident_trends").unwrap();
    let rows = service.chart_rows(chart).unwrap();

    let filter = RowFilter::new()
        .with_allowed_values(KeyField::RegionType, ["Urban", "Rural"])
        .with_month_range("2020-01".parse().unwrap(), "2020-12".parse().unwrap());
    let filtered = filter.apply(&rows);

    // the 2019-12 Urban row and the Suburban row fall away
    assert_eq!(filtered.len(), 2);
    let months: Vec<String> = filtered
        .iter()
        .map(|row| row.field("MonthYear").unwrap().to_string())
        .collect();
    assert!(months.iter().all(|month| month.starts_with("2020-01")));

    let csv = rows_to_csv_string(&filtered).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Region_Type,Incident_Type,MonthYear,Count"
    );
    assert_eq!(lines.count(), 2);
}

#[test]
fn test_fallback_session_with_missing_files_errors() {
    let dir = TempDir::new().unwrap();
    let config = Config::default().with_data_dir(dir.path());

    let session = SessionState::static_fallback(dir.path());
    let service = DashboardDataService::load(session, &config).unwrap();

    let chart = find_chart("incident_trends").unwrap();
    let result = service.chart_rows(chart);

    assert!(matches!(
        result,
        Err(incident_aggregator::Error::FileNotFound { .. })
    ));
}

#[test]
fn test_fully_filtered_chart_exports_as_no_data() {
    let dir = TempDir::new().unwrap();
    let upload_path = write_upload(&dir);
    let config = Config::default().with_data_dir(dir.path());

    let session = SessionState::client_upload(&upload_path, dir.path());
    let service = DashboardDataService::load(session, &config).unwrap();

    let chart = find_chart("incident_trends").unwrap();
    let rows = service.chart_rows(chart).unwrap();

    let filter = RowFilter::new().with_allowed_values(KeyField::RegionType, ["Coastal"]);
    let filtered = filter.apply(&rows);

    assert!(filtered.is_empty());
    assert_eq!(rows_to_json_string(&filtered, false).unwrap(), "[]");
    assert_eq!(rows_to_csv_string(&filtered).unwrap(), "");
}
