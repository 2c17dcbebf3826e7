//! Structured grouping keys for incident aggregation
//!
//! A grouping key is an ordered tuple of field values extracted from a
//! record by [`KeyField`] selectors. The tuple form replaces the
//! delimiter-joined string keys of the original dashboard code, which
//! were ambiguous whenever a field value contained the delimiter.

use super::binner::bucket_optional_km;
use crate::app::models::{FieldValue, IncidentRecord};
use crate::constants::columns;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Field selector used to build grouping keys.
///
/// `MonthYear` and `DistanceBin` select derived attributes; the rest
/// select record fields directly. Selectors are named by their output
/// column so CLI arguments, chart specs, and data files agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyField {
    RegionType,
    IncidentType,
    IncidentSeverity,
    EmergencyLevel,
    AmbulanceAvailability,
    NumberOfInjuries,
    RoadType,
    DistanceBin,
    WeatherCondition,
    TrafficCongestion,
    MonthYear,
}

impl KeyField {
    /// Every selectable key field
    pub const ALL: [KeyField; 11] = [
        KeyField::RegionType,
        KeyField::IncidentType,
        KeyField::IncidentSeverity,
        KeyField::EmergencyLevel,
        KeyField::AmbulanceAvailability,
        KeyField::NumberOfInjuries,
        KeyField::RoadType,
        KeyField::DistanceBin,
        KeyField::WeatherCondition,
        KeyField::TrafficCongestion,
        KeyField::MonthYear,
    ];

    /// Output column name for this selector
    pub fn column_name(&self) -> &'static str {
        match self {
            KeyField::RegionType => columns::REGION_TYPE,
            KeyField::IncidentType => columns::INCIDENT_TYPE,
            KeyField::IncidentSeverity => columns::INCIDENT_SEVERITY,
            KeyField::EmergencyLevel => columns::EMERGENCY_LEVEL,
            KeyField::AmbulanceAvailability => columns::AMBULANCE_AVAILABILITY,
            KeyField::NumberOfInjuries => columns::NUMBER_OF_INJURIES,
            KeyField::RoadType => columns::ROAD_TYPE,
            KeyField::DistanceBin => columns::DISTANCE_BIN,
            KeyField::WeatherCondition => columns::WEATHER_CONDITION,
            KeyField::TrafficCongestion => columns::TRAFFIC_CONGESTION,
            KeyField::MonthYear => columns::MONTH_YEAR,
        }
    }

    /// Extract this selector's value from a record.
    ///
    /// Returns `None` when the record lacks the field, which excludes
    /// the record from the aggregation. The two derived selectors are
    /// total: every record has a month bucket, and the distance binner
    /// maps missing distances to the "Unknown" bucket.
    pub fn extract(&self, record: &IncidentRecord) -> Option<FieldValue> {
        match self {
            KeyField::RegionType => record.region.as_ref().map(|v| FieldValue::text(v.as_label())),
            KeyField::IncidentType => record
                .incident_type
                .as_ref()
                .map(|v| FieldValue::text(v.as_label())),
            KeyField::IncidentSeverity => record
                .severity
                .as_ref()
                .map(|v| FieldValue::text(v.as_label())),
            KeyField::EmergencyLevel => record
                .emergency_level
                .as_ref()
                .map(|v| FieldValue::text(v.as_label())),
            KeyField::AmbulanceAvailability => record
                .ambulance_availability
                .as_deref()
                .map(FieldValue::text),
            KeyField::NumberOfInjuries => record.injuries.map(|n| FieldValue::Int(n as i64)),
            KeyField::RoadType => record.road_type.as_deref().map(FieldValue::text),
            KeyField::DistanceBin => Some(FieldValue::text(
                bucket_optional_km(record.distance_km).label(),
            )),
            KeyField::WeatherCondition => record.weather.as_deref().map(FieldValue::text),
            KeyField::TrafficCongestion => record
                .traffic
                .as_ref()
                .map(|v| FieldValue::text(v.as_label())),
            KeyField::MonthYear => Some(FieldValue::text(record.month.to_string())),
        }
    }
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for KeyField {
    type Err = Error;

    /// Parse a selector from its output column name
    fn from_str(s: &str) -> Result<Self> {
        KeyField::ALL
            .iter()
            .find(|field| field.column_name() == s.trim())
            .copied()
            .ok_or_else(|| {
                let available: Vec<&str> =
                    KeyField::ALL.iter().map(|f| f.column_name()).collect();
                Error::data_validation(format!(
                    "Unknown key field '{}'. Available fields: {}",
                    s,
                    available.join(", ")
                ))
            })
    }
}

/// One group's key: the selected field values in selector order.
///
/// Equality and hashing are value-wise over the tuple; the derived
/// ordering gives aggregation output its canonical sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub values: Vec<FieldValue>,
}

impl GroupKey {
    /// Build the key for a record, or `None` if any selected field is
    /// missing (the record cannot be assigned a group)
    pub fn for_record(key_fields: &[KeyField], record: &IncidentRecord) -> Option<Self> {
        let mut values = Vec::with_capacity(key_fields.len());
        for field in key_fields {
            values.push(field.extract(record)?);
        }
        Some(GroupKey { values })
    }
}
