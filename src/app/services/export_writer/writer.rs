//! Serialization of aggregated rows to the export formats

use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::app::models::AggregatedRow;
use crate::{Error, Result};

/// Supported export serializations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Array of flat objects, matching the chart data files
    Json,
    /// Comma-separated text with a header row
    Csv,
}

/// Serialize rows as a JSON array of flat objects
pub fn rows_to_json_string(rows: &[AggregatedRow], pretty: bool) -> Result<String> {
    let serialized = if pretty {
        serde_json::to_string_pretty(rows)
    } else {
        serde_json::to_string(rows)
    };

    serialized.map_err(|e| Error::json("Failed to serialize aggregated rows", e))
}

/// Serialize rows as comma-separated text.
///
/// The header row derives from the column names of the first row; an
/// empty row collection serializes to an empty string, matching the
/// dashboard's CSV download of a fully filtered-out chart.
pub fn rows_to_csv_string(rows: &[AggregatedRow]) -> Result<String> {
    let Some(first) = rows.first() else {
        return Ok(String::new());
    };

    let header = first.column_names();
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&header)
        .map_err(|e| Error::csv_parsing("Failed to write CSV header", Some(e)))?;

    for row in rows {
        let mut record = Vec::with_capacity(header.len());
        for (_, value) in &row.fields {
            record.push(value.to_string());
        }
        record.push(match row.metric {
            crate::app::models::Metric::Count(n) => n.to_string(),
            crate::app::models::Metric::AvgResponseTime(v) => v.to_string(),
        });

        writer
            .write_record(&record)
            .map_err(|e| Error::csv_parsing("Failed to write CSV row", Some(e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::io_error(format!("Failed to flush CSV writer: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| Error::io_error(format!("CSV output was not valid UTF-8: {}", e)))
}

/// Write rows to any sink in the requested format
pub fn write_rows<W: Write>(
    writer: &mut W,
    rows: &[AggregatedRow],
    format: ExportFormat,
    pretty_json: bool,
) -> Result<()> {
    let serialized = match format {
        ExportFormat::Json => rows_to_json_string(rows, pretty_json)?,
        ExportFormat::Csv => rows_to_csv_string(rows)?,
    };

    writer
        .write_all(serialized.as_bytes())
        .map_err(|e| Error::io("Failed to write export output", e))?;

    // exports end with a newline so files concatenate and diff cleanly
    if !serialized.ends_with('\n') {
        writer
            .write_all(b"\n")
            .map_err(|e| Error::io("Failed to write export output", e))?;
    }

    Ok(())
}

/// Write rows to a file, creating parent directories as needed
pub fn export_rows_to_file(
    path: &Path,
    rows: &[AggregatedRow],
    format: ExportFormat,
    pretty_json: bool,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(format!("Failed to create directory {}", parent.display()), e)
            })?;
        }
    }

    let mut file = std::fs::File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

    write_rows(&mut file, rows, format, pretty_json)?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
