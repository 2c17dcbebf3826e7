//! Test fixtures for export writer testing

use crate::app::models::{AggregatedRow, FieldValue, Metric};

// Test modules
mod writer_tests;

/// Two count rows in the incident-trends schema
pub fn count_rows() -> Vec<AggregatedRow> {
    vec![
        AggregatedRow::new(
            vec![
                ("Region_Type".to_string(), FieldValue::text("Urban")),
                ("Incident_Type".to_string(), FieldValue::text("Fire")),
                ("MonthYear".to_string(), FieldValue::text("2020-01")),
            ],
            Metric::Count(2),
        ),
        AggregatedRow::new(
            vec![
                ("Region_Type".to_string(), FieldValue::text("Urban")),
                ("Incident_Type".to_string(), FieldValue::text("Medical")),
                ("MonthYear".to_string(), FieldValue::text("2020-01")),
            ],
            Metric::Count(1),
        ),
    ]
}

/// One mean row carrying an integer key value
pub fn mean_row() -> Vec<AggregatedRow> {
    vec![AggregatedRow::new(
        vec![
            ("Number_of_Injuries".to_string(), FieldValue::Int(3)),
            ("MonthYear".to_string(), FieldValue::text("2021-06")),
        ],
        Metric::AvgResponseTime(14.5),
    )]
}
