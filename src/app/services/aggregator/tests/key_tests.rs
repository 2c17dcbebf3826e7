//! Tests for key-field selectors and structured group keys

use super::*;
use crate::app::models::FieldValue;
use crate::app::services::aggregator::{GroupKey, KeyField};

#[test]
fn test_key_field_round_trip_by_column_name() {
    for field in KeyField::ALL {
        let parsed: KeyField = field.column_name().parse().unwrap();
        assert_eq!(parsed, field);
    }
}

#[test]
fn test_unknown_key_field_is_rejected() {
    let result = "Postal_Code".parse::<KeyField>();
    assert!(result.is_err());
}

#[test]
fn test_extract_month_is_always_present() {
    let record = record_for("2022-09");
    assert_eq!(
        KeyField::MonthYear.extract(&record),
        Some(FieldValue::text("2022-09"))
    );
}

#[test]
fn test_extract_missing_field_is_none() {
    let record = record_for("2022-09");
    assert_eq!(KeyField::RegionType.extract(&record), None);
    assert_eq!(KeyField::RoadType.extract(&record), None);
    assert_eq!(KeyField::NumberOfInjuries.extract(&record), None);
}

#[test]
fn test_group_key_requires_every_field() {
    let record = typed_record("2022-09", "Urban", "Fire");

    let complete = GroupKey::for_record(
        &[KeyField::RegionType, KeyField::IncidentType, KeyField::MonthYear],
        &record,
    );
    assert_eq!(
        complete.unwrap().values,
        vec![
            FieldValue::text("Urban"),
            FieldValue::text("Fire"),
            FieldValue::text("2022-09"),
        ]
    );

    let incomplete = GroupKey::for_record(
        &[KeyField::RegionType, KeyField::EmergencyLevel],
        &record,
    );
    assert!(incomplete.is_none());
}

#[test]
fn test_structured_keys_do_not_collide_on_separators() {
    // with string-concatenated keys, ("a-b", "c") and ("a", "b-c")
    // would both flatten to "a-b-c"
    let mut first = record_for("2022-09");
    first.road_type = Some("a-b".to_string());
    first.weather = Some("c".to_string());

    let mut second = record_for("2022-09");
    second.road_type = Some("a".to_string());
    second.weather = Some("b-c".to_string());

    let fields = [KeyField::RoadType, KeyField::WeatherCondition];
    let first_key = GroupKey::for_record(&fields, &first).unwrap();
    let second_key = GroupKey::for_record(&fields, &second).unwrap();

    assert_ne!(first_key, second_key);
}

#[test]
fn test_group_key_ordering_is_tuple_lexicographic() {
    let a = GroupKey {
        values: vec![FieldValue::text("Rural"), FieldValue::text("2020-02")],
    };
    let b = GroupKey {
        values: vec![FieldValue::text("Rural"), FieldValue::text("2020-10")],
    };
    let c = GroupKey {
        values: vec![FieldValue::text("Urban"), FieldValue::text("2019-01")],
    };

    assert!(a < b);
    assert!(b < c);
}
