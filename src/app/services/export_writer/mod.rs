//! Export sink for aggregated rows
//!
//! Serializes already-computed rows for download or for the chart data
//! files: pretty-printed JSON (the format the static fallback set uses)
//! or comma-separated text whose header derives from the keys of the
//! first row.

pub mod writer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use writer::{
    ExportFormat, export_rows_to_file, rows_to_csv_string, rows_to_json_string, write_rows,
};
