//! Data models for emergency-incident aggregation.
//!
//! This module contains the core data structures for representing raw
//! incident observations and aggregated summary rows, following the
//! upload schema used by the ResQVision dashboard data files.

use crate::constants::{DATE_FORMAT, DATETIME_FORMATS, columns};
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Month Bucket
// =============================================================================

/// Calendar month bucket derived from an incident timestamp.
///
/// The canonical display form is `"YYYY-MM"` (always 7 characters for
/// four-digit years), chosen so that lexicographic order of the rendered
/// form matches chronological order. The derived `Ord` on `(year, month)`
/// agrees with that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthBucket {
    year: i32,
    month: u32,
}

impl MonthBucket {
    /// Create a month bucket, validating the month is 1-12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::data_validation(format!(
                "Invalid month {}: must be between 1 and 12",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// Derive a month bucket from a raw timestamp string.
    ///
    /// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, or a bare
    /// `YYYY-MM-DD` date. Returns `None` when no format matches; callers
    /// decide whether that drops the row (the record parser does, with a
    /// counted diagnostic).
    pub fn from_timestamp(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Some(Self {
                    year: dt.year(),
                    month: dt.month(),
                });
            }
        }

        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .ok()
            .map(|date| Self {
                year: date.year(),
                month: date.month(),
            })
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month, 1-indexed
    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthBucket {
    type Err = Error;

    /// Parse the canonical `"YYYY-MM"` form
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            Error::data_validation(format!(
                "Invalid month bucket '{}': expected YYYY-MM",
                s
            ))
        };

        let (year_str, month_str) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;

        MonthBucket::new(year, month)
    }
}

impl Serialize for MonthBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Categorical Fields
// =============================================================================

/// Region classification for an incident.
///
/// Unrecognized labels pass through unchanged so that open-ended
/// vocabularies in uploads still group correctly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegionType {
    Urban,
    Suburban,
    Rural,
    Unrecognized(String),
}

impl RegionType {
    /// Canonical label as it appears in data files
    pub fn as_label(&self) -> &str {
        match self {
            RegionType::Urban => "Urban",
            RegionType::Suburban => "Suburban",
            RegionType::Rural => "Rural",
            RegionType::Unrecognized(label) => label,
        }
    }
}

impl From<&str> for RegionType {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Urban" => RegionType::Urban,
            "Suburban" => RegionType::Suburban,
            "Rural" => RegionType::Rural,
            other => RegionType::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Incident category.
///
/// `Other` is a real category in the source vocabulary; labels outside
/// the vocabulary are carried in `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IncidentType {
    Accident,
    Fire,
    CardiacArrest,
    Other,
    Unrecognized(String),
}

impl IncidentType {
    pub fn as_label(&self) -> &str {
        match self {
            IncidentType::Accident => "Accident",
            IncidentType::Fire => "Fire",
            IncidentType::CardiacArrest => "Cardiac Arrest",
            IncidentType::Other => "Other",
            IncidentType::Unrecognized(label) => label,
        }
    }
}

impl From<&str> for IncidentType {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Accident" => IncidentType::Accident,
            "Fire" => IncidentType::Fire,
            "Cardiac Arrest" => IncidentType::CardiacArrest,
            "Other" => IncidentType::Other,
            other => IncidentType::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Severity classification
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
    Unrecognized(String),
}

impl Severity {
    pub fn as_label(&self) -> &str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Unrecognized(label) => label,
        }
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Low" => Severity::Low,
            "Medium" => Severity::Medium,
            "High" => Severity::High,
            other => Severity::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Emergency level classification
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EmergencyLevel {
    Minor,
    Major,
    Critical,
    Unrecognized(String),
}

impl EmergencyLevel {
    pub fn as_label(&self) -> &str {
        match self {
            EmergencyLevel::Minor => "Minor",
            EmergencyLevel::Major => "Major",
            EmergencyLevel::Critical => "Critical",
            EmergencyLevel::Unrecognized(label) => label,
        }
    }
}

impl From<&str> for EmergencyLevel {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Minor" => EmergencyLevel::Minor,
            "Major" => EmergencyLevel::Major,
            "Critical" => EmergencyLevel::Critical,
            other => EmergencyLevel::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for EmergencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Traffic congestion level
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrafficCongestion {
    Low,
    Moderate,
    High,
    Unrecognized(String),
}

impl TrafficCongestion {
    pub fn as_label(&self) -> &str {
        match self {
            TrafficCongestion::Low => "Low",
            TrafficCongestion::Moderate => "Moderate",
            TrafficCongestion::High => "High",
            TrafficCongestion::Unrecognized(label) => label,
        }
    }
}

impl From<&str> for TrafficCongestion {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Low" => TrafficCongestion::Low,
            "Moderate" => TrafficCongestion::Moderate,
            "High" => TrafficCongestion::High,
            other => TrafficCongestion::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for TrafficCongestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

// =============================================================================
// Distance Bucket
// =============================================================================

/// Discrete distance bucket derived from the continuous distance field.
///
/// Exactly one bucket applies to every record; malformed or missing
/// distances map to [`DistanceBucket::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceBucket {
    /// [0, 2) km
    UnderTwo,
    /// [2, 5) km
    TwoToFive,
    /// [5, 10) km
    FiveToTen,
    /// [10, ∞) km
    TenPlus,
    /// Missing or malformed distance value
    Unknown,
}

impl DistanceBucket {
    /// Label as it appears in the aggregated data files
    pub fn label(&self) -> &'static str {
        match self {
            DistanceBucket::UnderTwo => "0-2 km",
            DistanceBucket::TwoToFive => "2-5 km",
            DistanceBucket::FiveToTen => "5-10 km",
            DistanceBucket::TenPlus => "10+ km",
            DistanceBucket::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DistanceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Incident Record
// =============================================================================

/// One parsed emergency-incident observation.
///
/// Every field except the derived month bucket is optional: uploads for
/// different dashboards carry different column subsets, and each
/// aggregation reads only the fields it needs. Rows whose timestamp
/// cannot be parsed never become records (the parser drops them with a
/// counted diagnostic), so `month` is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRecord {
    /// Month bucket derived from the timestamp column
    pub month: MonthBucket,

    /// Region classification
    pub region: Option<RegionType>,

    /// Incident category
    pub incident_type: Option<IncidentType>,

    /// Severity classification
    pub severity: Option<Severity>,

    /// Emergency level
    pub emergency_level: Option<EmergencyLevel>,

    /// Ambulance availability marker, kept as the raw boolean-like string
    pub ambulance_availability: Option<String>,

    /// Number of injuries reported
    pub injuries: Option<u32>,

    /// Road classification
    pub road_type: Option<String>,

    /// Distance to the incident in kilometers
    pub distance_km: Option<f64>,

    /// Weather condition label
    pub weather: Option<String>,

    /// Traffic congestion level
    pub traffic: Option<TrafficCongestion>,

    /// Response time in minutes
    pub response_time_min: Option<f64>,

    /// Explicit per-record weight for pre-aggregated inputs; counts
    /// default to 1 per record when absent
    pub weight: Option<u64>,
}

impl IncidentRecord {
    /// Create an empty record for the given month, all other fields unset
    pub fn for_month(month: MonthBucket) -> Self {
        Self {
            month,
            region: None,
            incident_type: None,
            severity: None,
            emergency_level: None,
            ambulance_availability: None,
            injuries: None,
            road_type: None,
            distance_km: None,
            weather: None,
            traffic: None,
            response_time_min: None,
            weight: None,
        }
    }

    /// Count weight of this record: the explicit weight when present,
    /// otherwise 1
    pub fn count_weight(&self) -> u64 {
        self.weight.unwrap_or(1)
    }
}

// =============================================================================
// Aggregated Output
// =============================================================================

/// A single grouping-key value.
///
/// Key values are either exact text labels or integers (the injury
/// count); the derived ordering gives aggregated output its canonical
/// lexicographic-by-tuple sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    /// Convenience constructor for text values
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Render as a JSON value (number or string)
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Int(n) => serde_json::Value::from(*n),
            FieldValue::Text(s) => serde_json::Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Int(n) => serializer.serialize_i64(*n),
            FieldValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Reduced value of one aggregated group
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// Number of matched records (or sum of explicit weights)
    Count(u64),
    /// Arithmetic mean of the response-time field
    AvgResponseTime(f64),
}

impl Metric {
    /// Output column name for this metric
    pub fn column_name(&self) -> &'static str {
        match self {
            Metric::Count(_) => columns::COUNT,
            Metric::AvgResponseTime(_) => columns::AVG_RESPONSE_TIME,
        }
    }

    /// Render as a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Metric::Count(n) => serde_json::Value::from(*n),
            Metric::AvgResponseTime(v) => serde_json::Value::from(*v),
        }
    }
}

/// One output row of an aggregation run: the grouping-key fields in
/// selector order plus the reduced metric.
///
/// Rows are created fresh on every run and never mutated. Serialization
/// produces the flat-object schema of the dashboard data files, with key
/// fields in selector order followed by the metric column.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    /// Grouping-key columns as (column name, value) pairs, in selector order
    pub fields: Vec<(String, FieldValue)>,

    /// Reduced value for this group
    pub metric: Metric,
}

impl AggregatedRow {
    /// Create a new aggregated row
    pub fn new(fields: Vec<(String, FieldValue)>, metric: Metric) -> Self {
        Self { fields, metric }
    }

    /// Look up a key-field value by column name
    pub fn field(&self, column: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// All output column names in order: key fields then the metric
    pub fn column_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.iter().map(|(name, _)| name.as_str()).collect();
        names.push(self.metric.column_name());
        names
    }

    /// Render as a flat JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for (name, value) in &self.fields {
            object.insert(name.clone(), value.to_json());
        }
        object.insert(self.metric.column_name().to_string(), self.metric.to_json());
        serde_json::Value::Object(object)
    }
}

impl Serialize for AggregatedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        match self.metric {
            Metric::Count(n) => map.serialize_entry(self.metric.column_name(), &n)?,
            Metric::AvgResponseTime(v) => map.serialize_entry(self.metric.column_name(), &v)?,
        }
        map.end()
    }
}
