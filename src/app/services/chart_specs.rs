//! Chart catalogue for the dashboard data files
//!
//! Each dashboard chart consumes one named grouped summary. A
//! [`ChartSpec`] pairs the chart's data file stem with the grouping key
//! and reduction that produce it, so re-aggregating an upload yields
//! files interchangeable with the static fallback set.

use crate::app::models::IncidentRecord;
use crate::app::services::aggregator::{
    AggregationResult, GroupingSpec, KeyField, Reduction, aggregate,
};
use crate::{Error, Result};

/// One chart's aggregation recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    /// Chart name, also the data file stem
    pub name: &'static str,

    /// Grouping key fields, in output column order
    pub key_fields: &'static [KeyField],

    /// Reduction applied per group
    pub reduction: Reduction,
}

impl ChartSpec {
    /// Grouping specification for an aggregation run
    pub fn grouping_spec(&self) -> GroupingSpec {
        GroupingSpec::new(self.key_fields.to_vec(), self.reduction)
    }

    /// Data file name for this chart
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name)
    }

    /// Aggregate records into this chart's rows
    pub fn run(&self, records: &[IncidentRecord]) -> Result<AggregationResult> {
        aggregate(records, &self.grouping_spec())
    }
}

/// Every chart the dashboards render, in the order the batch processor
/// writes them.
///
/// `incident_trends` shares its grouping with the bar chart counts; the
/// view layer re-rolls both along different axes, so each keeps its own
/// data file.
pub const CHART_CATALOGUE: &[ChartSpec] = &[
    ChartSpec {
        name: "incident_type_counts_monthly",
        key_fields: &[
            KeyField::IncidentType,
            KeyField::RegionType,
            KeyField::MonthYear,
        ],
        reduction: Reduction::Count,
    },
    ChartSpec {
        name: "severity_counts_monthly",
        key_fields: &[
            KeyField::IncidentSeverity,
            KeyField::RegionType,
            KeyField::MonthYear,
        ],
        reduction: Reduction::Count,
    },
    ChartSpec {
        name: "incident_trends",
        key_fields: &[
            KeyField::RegionType,
            KeyField::IncidentType,
            KeyField::MonthYear,
        ],
        reduction: Reduction::Count,
    },
    ChartSpec {
        name: "ambulance_response",
        key_fields: &[
            KeyField::AmbulanceAvailability,
            KeyField::RegionType,
            KeyField::EmergencyLevel,
            KeyField::MonthYear,
        ],
        reduction: Reduction::MeanResponseTime,
    },
    ChartSpec {
        name: "injuries_response",
        key_fields: &[
            KeyField::RegionType,
            KeyField::EmergencyLevel,
            KeyField::NumberOfInjuries,
            KeyField::MonthYear,
        ],
        reduction: Reduction::MeanResponseTime,
    },
    ChartSpec {
        name: "response_heatmap",
        key_fields: &[
            KeyField::RoadType,
            KeyField::DistanceBin,
            KeyField::RegionType,
            KeyField::EmergencyLevel,
            KeyField::MonthYear,
        ],
        reduction: Reduction::MeanResponseTime,
    },
    ChartSpec {
        name: "weather_heatmap",
        key_fields: &[
            KeyField::WeatherCondition,
            KeyField::RoadType,
            KeyField::RegionType,
            KeyField::TrafficCongestion,
            KeyField::MonthYear,
        ],
        reduction: Reduction::MeanResponseTime,
    },
];

/// Look up a chart by name
pub fn find_chart(name: &str) -> Result<&'static ChartSpec> {
    CHART_CATALOGUE
        .iter()
        .find(|chart| chart.name == name)
        .ok_or_else(|| Error::unknown_chart(name))
}

/// Names of every chart in the catalogue
pub fn chart_names() -> Vec<&'static str> {
    CHART_CATALOGUE.iter().map(|chart| chart.name).collect()
}
