//! Headline metrics for the dashboard home page
//!
//! Computes the summary figures served as `metrics_summary.json`: how
//! many emergencies the dataset covers, the overall average response
//! time, the most common incident type, and the high-severity and
//! ambulance-availability shares.

use crate::app::models::{IncidentRecord, Severity};
use crate::constants::AVAILABLE_MARKERS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Home-page summary metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Number of incident records in the dataset
    pub unique_emergencies: usize,

    /// Mean response time in minutes over records carrying a usable
    /// value, rounded to two decimals; 0.0 when no record has one
    pub avg_response_time_min: f64,

    /// Most frequent incident type label; ties break to the
    /// lexicographically smallest label so the figure is deterministic
    pub most_common_incident: Option<String>,

    /// Share of severity-carrying records classified High, in percent
    pub percent_high_severity: f64,

    /// Share of availability-carrying records marked available, in percent
    pub ambulance_availability_rate: f64,
}

impl MetricsSummary {
    /// Compute summary metrics over a record collection
    pub fn compute(records: &[IncidentRecord]) -> Self {
        Self {
            unique_emergencies: records.len(),
            avg_response_time_min: round2(mean_response_time(records)),
            most_common_incident: most_common_incident(records),
            percent_high_severity: round2(percent_high_severity(records)),
            ambulance_availability_rate: round2(availability_rate(records)),
        }
    }
}

fn mean_response_time(records: &[IncidentRecord]) -> f64 {
    let mut sum = 0.0;
    let mut cardinality = 0u64;
    for minutes in records.iter().filter_map(|r| r.response_time_min) {
        if minutes.is_finite() {
            sum += minutes;
            cardinality += 1;
        }
    }

    if cardinality == 0 {
        0.0
    } else {
        sum / cardinality as f64
    }
}

fn most_common_incident(records: &[IncidentRecord]) -> Option<String> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for incident_type in records.iter().filter_map(|r| r.incident_type.as_ref()) {
        *counts.entry(incident_type.as_label()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by_key(|(label, count)| (*count, std::cmp::Reverse(*label)))
        .map(|(label, _)| label.to_string())
}

fn percent_high_severity(records: &[IncidentRecord]) -> f64 {
    let mut total = 0u64;
    let mut high = 0u64;
    for severity in records.iter().filter_map(|r| r.severity.as_ref()) {
        total += 1;
        if *severity == Severity::High {
            high += 1;
        }
    }

    if total == 0 {
        0.0
    } else {
        (high as f64 / total as f64) * 100.0
    }
}

fn availability_rate(records: &[IncidentRecord]) -> f64 {
    let mut total = 0u64;
    let mut available = 0u64;
    for marker in records.iter().filter_map(|r| r.ambulance_availability.as_deref()) {
        total += 1;
        if AVAILABLE_MARKERS
            .iter()
            .any(|candidate| marker.eq_ignore_ascii_case(candidate))
        {
            available += 1;
        }
    }

    if total == 0 {
        0.0
    } else {
        (available as f64 / total as f64) * 100.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{IncidentType, MonthBucket};

    fn record() -> IncidentRecord {
        IncidentRecord::for_month(MonthBucket::new(2020, 1).unwrap())
    }

    #[test]
    fn test_empty_dataset() {
        let summary = MetricsSummary::compute(&[]);
        assert_eq!(summary.unique_emergencies, 0);
        assert_eq!(summary.avg_response_time_min, 0.0);
        assert_eq!(summary.most_common_incident, None);
        assert_eq!(summary.percent_high_severity, 0.0);
        assert_eq!(summary.ambulance_availability_rate, 0.0);
    }

    #[test]
    fn test_summary_figures() {
        let mut records = Vec::new();

        for (incident, severity, available, minutes) in [
            (IncidentType::Fire, Severity::High, "Yes", 10.0),
            (IncidentType::Fire, Severity::Low, "No", 20.0),
            (IncidentType::Accident, Severity::High, "Yes", 30.335),
            (IncidentType::Fire, Severity::Medium, "Yes", 15.0),
        ] {
            let mut r = record();
            r.incident_type = Some(incident);
            r.severity = Some(severity);
            r.ambulance_availability = Some(available.to_string());
            r.response_time_min = Some(minutes);
            records.push(r);
        }

        let summary = MetricsSummary::compute(&records);
        assert_eq!(summary.unique_emergencies, 4);
        assert_eq!(summary.avg_response_time_min, 18.83);
        assert_eq!(summary.most_common_incident.as_deref(), Some("Fire"));
        assert_eq!(summary.percent_high_severity, 50.0);
        assert_eq!(summary.ambulance_availability_rate, 75.0);
    }

    #[test]
    fn test_most_common_incident_tie_breaks_deterministically() {
        let mut records = Vec::new();
        for incident in [IncidentType::Fire, IncidentType::Accident] {
            let mut r = record();
            r.incident_type = Some(incident);
            records.push(r);
        }

        let summary = MetricsSummary::compute(&records);
        assert_eq!(summary.most_common_incident.as_deref(), Some("Accident"));
    }

    #[test]
    fn test_unusable_response_times_are_ignored() {
        let mut with_value = record();
        with_value.response_time_min = Some(12.0);
        let mut with_nan = record();
        with_nan.response_time_min = Some(f64::NAN);
        let without = record();

        let summary = MetricsSummary::compute(&[with_value, with_nan, without]);
        assert_eq!(summary.avg_response_time_min, 12.0);
    }
}
