//! Individual CSV record parsing for incident uploads
//!
//! This module converts one CSV data row into a typed
//! [`IncidentRecord`], deriving the canonical month bucket from the
//! timestamp column and counting malformed numeric values.

use csv::StringRecord;
use tracing::debug;

use super::column_mapping::ColumnMapping;
use super::field_parsers::{
    ParsedField, get_optional_field, get_required_field, parse_optional_number,
};
use super::stats::ParseStats;
use crate::app::models::{
    EmergencyLevel, IncidentRecord, IncidentType, MonthBucket, RegionType, Severity,
    TrafficCongestion,
};
use crate::constants::columns;
use crate::{Error, Result};

/// Parse a single incident record from CSV data.
///
/// The timestamp is the only required field: a row whose timestamp is
/// absent or unparseable cannot be assigned a month bucket and is
/// rejected (the caller counts it as a parse failure). All other fields
/// are optional; malformed numeric values are recorded in `stats` and
/// left unset rather than failing the row.
pub fn parse_incident_record(
    record: &StringRecord,
    mapping: &ColumnMapping,
    stats: &mut ParseStats,
) -> Result<IncidentRecord> {
    let raw_timestamp = get_required_field(record, mapping, columns::TIMESTAMP)?;
    let month = MonthBucket::from_timestamp(raw_timestamp).ok_or_else(|| {
        Error::data_validation(format!(
            "Invalid timestamp '{}' (expected 'YYYY-MM-DD HH:MM:SS' or 'YYYY-MM-DD')",
            raw_timestamp
        ))
    })?;

    let mut incident = IncidentRecord::for_month(month);

    incident.region =
        get_optional_field(record, mapping, columns::REGION_TYPE).map(RegionType::from);
    incident.incident_type =
        get_optional_field(record, mapping, columns::INCIDENT_TYPE).map(IncidentType::from);
    incident.severity =
        get_optional_field(record, mapping, columns::INCIDENT_SEVERITY).map(Severity::from);
    incident.emergency_level =
        get_optional_field(record, mapping, columns::EMERGENCY_LEVEL).map(EmergencyLevel::from);
    incident.traffic = get_optional_field(record, mapping, columns::TRAFFIC_CONGESTION)
        .map(TrafficCongestion::from);

    incident.ambulance_availability =
        get_optional_field(record, mapping, columns::AMBULANCE_AVAILABILITY)
            .map(|s| s.to_string());
    incident.road_type =
        get_optional_field(record, mapping, columns::ROAD_TYPE).map(|s| s.to_string());
    incident.weather =
        get_optional_field(record, mapping, columns::WEATHER_CONDITION).map(|s| s.to_string());

    incident.injuries =
        parse_numeric(record, mapping, columns::NUMBER_OF_INJURIES, stats);
    incident.distance_km =
        parse_numeric(record, mapping, columns::DISTANCE_TO_INCIDENT, stats);
    incident.response_time_min =
        parse_numeric(record, mapping, columns::RESPONSE_TIME, stats);
    incident.weight = parse_numeric(record, mapping, columns::COUNT, stats);

    Ok(incident)
}

/// Parse an optional numeric field, counting malformed values as
/// diagnostics instead of failing the row
fn parse_numeric<T: std::str::FromStr>(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
    stats: &mut ParseStats,
) -> Option<T> {
    match parse_optional_number::<T>(record, mapping, field_name) {
        ParsedField::Value(value) => Some(value),
        ParsedField::Absent => None,
        ParsedField::Invalid => {
            stats.invalid_numeric_values += 1;
            debug!(
                "Failed to parse '{}' = '{}' as a number",
                field_name,
                get_optional_field(record, mapping, field_name).unwrap_or_default()
            );
            None
        }
    }
}
