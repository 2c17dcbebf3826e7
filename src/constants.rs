//! Shared constants for incident data processing.
//!
//! Centralizes column names, timestamp formats, distance-bin boundaries,
//! and processing defaults so parsing and aggregation stay in agreement
//! about the upload schema.

/// Column names used by the incident CSV upload format and the aggregated
/// output schema.
///
/// The upload header names fields exactly as the dashboard data files do;
/// resolution is by name, never by position.
pub mod columns {
    /// Incident timestamp, source of the derived month bucket
    pub const TIMESTAMP: &str = "Timestamp";

    /// Region classification (Urban / Suburban / Rural)
    pub const REGION_TYPE: &str = "Region_Type";

    /// Incident category (Accident / Fire / Cardiac Arrest / Other)
    pub const INCIDENT_TYPE: &str = "Incident_Type";

    /// Severity classification (Low / Medium / High)
    pub const INCIDENT_SEVERITY: &str = "Incident_Severity";

    /// Emergency level (Minor / Major / Critical)
    pub const EMERGENCY_LEVEL: &str = "Emergency_Level";

    /// Boolean-like ambulance availability marker
    pub const AMBULANCE_AVAILABILITY: &str = "Ambulance_Availability";

    /// Number of injuries reported for the incident
    pub const NUMBER_OF_INJURIES: &str = "Number_of_Injuries";

    /// Free-form road classification
    pub const ROAD_TYPE: &str = "Road_Type";

    /// Distance from dispatch point to incident in kilometers
    pub const DISTANCE_TO_INCIDENT: &str = "Distance_to_Incident";

    /// Free-form weather condition label
    pub const WEATHER_CONDITION: &str = "Weather_Condition";

    /// Traffic congestion level (Low / Moderate / High)
    pub const TRAFFIC_CONGESTION: &str = "Traffic_Congestion";

    /// Response time in minutes
    pub const RESPONSE_TIME: &str = "Response_Time";

    /// Optional per-record weight for pre-aggregated inputs
    pub const COUNT: &str = "Count";

    /// Derived month bucket column in aggregated output ("YYYY-MM")
    pub const MONTH_YEAR: &str = "MonthYear";

    /// Derived distance bucket column in aggregated output
    pub const DISTANCE_BIN: &str = "Distance_Bin";

    /// Mean response time column in aggregated output
    pub const AVG_RESPONSE_TIME: &str = "Avg_Response_Time";
}

/// Columns the record parser recognizes in an upload header.
///
/// Columns outside this set are ignored (and reported in the column
/// mapping statistics) rather than rejected.
pub const KNOWN_COLUMNS: &[&str] = &[
    columns::TIMESTAMP,
    columns::REGION_TYPE,
    columns::INCIDENT_TYPE,
    columns::INCIDENT_SEVERITY,
    columns::EMERGENCY_LEVEL,
    columns::AMBULANCE_AVAILABILITY,
    columns::NUMBER_OF_INJURIES,
    columns::ROAD_TYPE,
    columns::DISTANCE_TO_INCIDENT,
    columns::WEATHER_CONDITION,
    columns::TRAFFIC_CONGESTION,
    columns::RESPONSE_TIME,
    columns::COUNT,
];

// =============================================================================
// Timestamp Handling
// =============================================================================

/// Datetime formats accepted for the `Timestamp` column, tried in order
pub const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Date-only fallback format for the `Timestamp` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Distance Binning
// =============================================================================

/// Upper edges (exclusive) of the bounded distance buckets, in kilometers.
///
/// Values at or beyond the last edge fall into the open-ended "10+ km"
/// bucket. Buckets are half-open on the lower end: [0,2), [2,5), [5,10).
pub const DISTANCE_BIN_EDGES_KM: [f64; 3] = [2.0, 5.0, 10.0];

// =============================================================================
// Processing Defaults
// =============================================================================

/// Default ceiling on data rows accepted from a single upload.
///
/// Uploads beyond this size fail fast with a reported diagnostic instead
/// of degrading interactively.
pub const DEFAULT_MAX_ROWS: usize = 500_000;

/// Default directory for chart data files (static fallback set and
/// freshly written output)
pub const DEFAULT_DATA_DIR: &str = "data";

/// File stem of the headline metrics summary data file
pub const METRICS_SUMMARY_FILE_STEM: &str = "metrics_summary";

/// Configuration directory name under the platform config root
pub const CONFIG_DIR_NAME: &str = "incident-aggregator";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Ambulance availability markers treated as "available" when computing
/// the availability rate, compared case-insensitively
pub const AVAILABLE_MARKERS: &[&str] = &["yes", "true", "available", "y", "1"];
