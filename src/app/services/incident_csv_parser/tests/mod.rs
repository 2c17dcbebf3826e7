//! Test fixtures for incident CSV parser testing
//!
//! Provides shared upload payloads used across the parser test modules.

// Test modules
mod parser_tests;

/// Full-schema upload with a mix of clean and problematic rows:
/// - row 3 has an unparseable timestamp (dropped with a diagnostic)
/// - row 4 has a non-numeric response time (field unset, record kept)
pub fn create_full_upload() -> String {
    [
        "Timestamp,Region_Type,Incident_Type,Incident_Severity,Emergency_Level,Ambulance_Availability,Number_of_Injuries,Road_Type,Distance_to_Incident,Weather_Condition,Traffic_Congestion,Response_Time",
        "2020-01-04 10:15:00,Urban,Fire,High,Critical,Yes,2,Highway,3.4,Clear,High,12.5",
        "2020-01-17 22:40:00,Rural,Accident,Medium,Major,No,1,Street,11.0,Rainy,Low,21.0",
        "not-a-timestamp,Urban,Fire,Low,Minor,Yes,0,Street,1.0,Clear,Low,8.0",
        "2020-02-02 08:05:00,Suburban,Cardiac Arrest,High,Critical,Yes,1,Avenue,0.9,Foggy,Moderate,n/a",
    ]
    .join("\n")
}

/// Minimal upload carrying only the columns the incident-trends chart needs
pub fn create_minimal_upload() -> String {
    [
        "Timestamp,Region_Type,Incident_Type",
        "2019-04-17 09:00:00,Urban,Fire",
        "2019-04-20 14:30:00,Urban,Fire",
        "2019-05-01 16:45:00,Rural,Accident",
    ]
    .join("\n")
}

/// Upload whose header carries unknown columns alongside known ones
pub fn create_upload_with_extra_columns() -> String {
    [
        "Incident_ID,Timestamp,Region_Type,Operator_Notes",
        "A-1,2021-06-10 11:00:00,Urban,arrived late",
        "A-2,2021-06-11 12:00:00,Rural,",
    ]
    .join("\n")
}
