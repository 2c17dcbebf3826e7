//! Test fixtures for aggregation testing
//!
//! Provides record builders shared across the aggregator test modules.

use crate::app::models::{IncidentRecord, IncidentType, MonthBucket, RegionType};

mod filter_tests;
mod key_tests;

/// Empty record for the given "YYYY-MM" month
pub fn record_for(month: &str) -> IncidentRecord {
    let month: MonthBucket = month.parse().unwrap();
    IncidentRecord::for_month(month)
}

/// Record with region and incident type set
pub fn typed_record(month: &str, region: &str, incident_type: &str) -> IncidentRecord {
    let mut record = record_for(month);
    record.region = Some(RegionType::from(region));
    record.incident_type = Some(IncidentType::from(incident_type));
    record
}

/// Record with region, incident type, and response time
pub fn timed_record(
    month: &str,
    region: &str,
    incident_type: &str,
    response_minutes: f64,
) -> IncidentRecord {
    let mut record = typed_record(month, region, incident_type);
    record.response_time_min = Some(response_minutes);
    record
}
