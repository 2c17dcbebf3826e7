//! Tests for the export-path row filter

use super::*;
use crate::app::services::aggregator::{GroupingSpec, KeyField, RowFilter, aggregate};

fn sample_rows() -> Vec<crate::AggregatedRow> {
    let records = vec![
        typed_record("2019-12", "Urban", "Fire"),
        typed_record("2020-01", "Urban", "Fire"),
        typed_record("2020-02", "Rural", "Accident"),
        typed_record("2020-06", "Suburban", "Other"),
        typed_record("2021-01", "Urban", "Accident"),
    ];
    let spec = GroupingSpec::counts(vec![
        KeyField::RegionType,
        KeyField::IncidentType,
        KeyField::MonthYear,
    ]);
    aggregate(&records, &spec).unwrap().rows
}

#[test]
fn test_unconstrained_filter_matches_everything() {
    let rows = sample_rows();
    let filter = RowFilter::new();

    assert!(filter.is_unconstrained());
    assert_eq!(filter.apply(&rows).len(), rows.len());
}

#[test]
fn test_membership_filter() {
    let rows = sample_rows();
    let filter = RowFilter::new().with_allowed_values(KeyField::RegionType, ["Urban"]);

    let kept = filter.apply(&rows);
    assert_eq!(kept.len(), 3);
    assert!(
        kept.iter()
            .all(|row| row.field("Region_Type").unwrap().to_string() == "Urban")
    );
}

#[test]
fn test_month_range_is_inclusive() {
    let rows = sample_rows();
    let filter = RowFilter::new()
        .with_month_range("2020-01".parse().unwrap(), "2020-06".parse().unwrap());

    let kept = filter.apply(&rows);
    let months: Vec<String> = kept
        .iter()
        .map(|row| row.field("MonthYear").unwrap().to_string())
        .collect();
    // canonical row order is by (Region_Type, Incident_Type, MonthYear)
    assert_eq!(months, vec!["2020-02", "2020-06", "2020-01"]);
}

#[test]
fn test_combined_filters() {
    let rows = sample_rows();
    let filter = RowFilter::new()
        .with_allowed_values(KeyField::RegionType, ["Urban", "Rural"])
        .with_allowed_values(KeyField::IncidentType, ["Accident"])
        .with_month_range("2020-01".parse().unwrap(), "2020-12".parse().unwrap());

    let kept = filter.apply(&rows);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].field("Region_Type").unwrap().to_string(), "Rural");
}

#[test]
fn test_empty_result_is_valid() {
    let rows = sample_rows();
    let filter = RowFilter::new().with_allowed_values(KeyField::RegionType, ["Coastal"]);

    assert!(filter.apply(&rows).is_empty());
}

#[test]
fn test_empty_value_list_leaves_field_unconstrained() {
    let rows = sample_rows();
    let filter = RowFilter::new().with_allowed_values(KeyField::RegionType, Vec::<String>::new());

    assert!(filter.is_unconstrained());
    assert_eq!(filter.apply(&rows).len(), rows.len());
}

#[test]
fn test_filter_on_absent_column_excludes_rows() {
    let rows = sample_rows();
    let filter = RowFilter::new().with_allowed_values(KeyField::EmergencyLevel, ["Critical"]);

    // the sample rows carry no Emergency_Level column
    assert!(filter.apply(&rows).is_empty());
}
