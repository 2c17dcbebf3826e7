//! Data source selection for dashboard chart rows
//!
//! The original dashboard remembered "uploaded data mode" in ambient
//! browser-local storage. Here that choice is an explicit, injected
//! [`SessionState`]: either a client upload to re-aggregate or the
//! static fallback files written by a previous processing run. The
//! aggregation core stays pure and oblivious to the choice, and both
//! sources yield rows with the identical schema, so consumers treat
//! them interchangeably.

use std::path::PathBuf;
use tracing::{debug, info};

use crate::app::models::{AggregatedRow, FieldValue, IncidentRecord, Metric};
use crate::app::services::aggregator::Reduction;
use crate::app::services::chart_specs::ChartSpec;
use crate::app::services::incident_csv_parser::{IncidentCsvParser, ParseStats};
use crate::{Config, Error, Result};

/// Where chart rows come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Re-aggregate a raw incident CSV upload
    ClientUpload,
    /// Read the pre-computed chart data files
    StaticFallback,
}

/// Explicit session state deciding the data source
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Active data source mode
    pub mode: DataMode,

    /// Upload payload path, required in upload mode
    pub upload_path: Option<PathBuf>,

    /// Directory holding the pre-computed chart data files
    pub data_dir: PathBuf,
}

impl SessionState {
    /// Session backed by a client upload
    pub fn client_upload(upload_path: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            mode: DataMode::ClientUpload,
            upload_path: Some(upload_path.into()),
            data_dir: data_dir.into(),
        }
    }

    /// Session backed by the static fallback files
    pub fn static_fallback(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            mode: DataMode::StaticFallback,
            upload_path: None,
            data_dir: data_dir.into(),
        }
    }
}

/// Chart-row provider for one session.
///
/// In upload mode the payload is parsed once at construction and every
/// chart aggregates over the same record collection; in fallback mode
/// each chart reads its own data file on demand.
#[derive(Debug)]
pub struct DashboardDataService {
    session: SessionState,
    records: Option<Vec<IncidentRecord>>,
    parse_stats: Option<ParseStats>,
}

impl DashboardDataService {
    /// Create the service, parsing the upload when the session calls
    /// for one
    pub fn load(session: SessionState, config: &Config) -> Result<Self> {
        match session.mode {
            DataMode::ClientUpload => {
                let upload_path = session.upload_path.clone().ok_or_else(|| {
                    Error::configuration("Upload mode requires an upload path")
                })?;

                let parser = IncidentCsvParser::from_config(config);
                let result = parser.parse_file(&upload_path)?;
                info!(
                    "Session in upload mode: {} records from {}",
                    result.records.len(),
                    upload_path.display()
                );

                Ok(Self {
                    session,
                    records: Some(result.records),
                    parse_stats: Some(result.stats),
                })
            }
            DataMode::StaticFallback => {
                debug!(
                    "Session in static fallback mode, data dir {}",
                    session.data_dir.display()
                );
                Ok(Self {
                    session,
                    records: None,
                    parse_stats: None,
                })
            }
        }
    }

    /// Parsed upload records, when in upload mode
    pub fn records(&self) -> Option<&[IncidentRecord]> {
        self.records.as_deref()
    }

    /// Upload parse diagnostics, when in upload mode
    pub fn parse_stats(&self) -> Option<&ParseStats> {
        self.parse_stats.as_ref()
    }

    /// Active session state
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Produce one chart's rows from the session's data source
    pub fn chart_rows(&self, chart: &ChartSpec) -> Result<Vec<AggregatedRow>> {
        match &self.records {
            Some(records) => Ok(chart.run(records)?.rows),
            None => self.load_static_chart(chart),
        }
    }

    /// Read and re-materialize a pre-computed chart data file
    fn load_static_chart(&self, chart: &ChartSpec) -> Result<Vec<AggregatedRow>> {
        let path = self.session.data_dir.join(chart.file_name());
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

        rows_from_json(&content, chart)
    }
}

/// Parse a chart data file into aggregated rows.
///
/// The static files are arrays of flat objects carrying one field per
/// grouping key plus the metric column; anything else is a schema
/// mismatch surfaced as a validation error.
pub fn rows_from_json(content: &str, chart: &ChartSpec) -> Result<Vec<AggregatedRow>> {
    let objects: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_str(content).map_err(|e| {
            Error::json(format!("Chart file for '{}' is not a row array", chart.name), e)
        })?;

    let mut rows = Vec::with_capacity(objects.len());
    for (index, object) in objects.iter().enumerate() {
        let mut fields = Vec::with_capacity(chart.key_fields.len());
        for key_field in chart.key_fields {
            let column = key_field.column_name();
            let value = object.get(column).ok_or_else(|| {
                Error::data_validation(format!(
                    "Chart '{}' row {} is missing column '{}'",
                    chart.name, index, column
                ))
            })?;
            fields.push((column.to_string(), field_value_from_json(chart, index, column, value)?));
        }

        let metric = metric_from_json(chart, index, object)?;
        rows.push(AggregatedRow::new(fields, metric));
    }

    Ok(rows)
}

fn field_value_from_json(
    chart: &ChartSpec,
    index: usize,
    column: &str,
    value: &serde_json::Value,
) -> Result<FieldValue> {
    if let Some(text) = value.as_str() {
        return Ok(FieldValue::text(text));
    }
    if let Some(number) = value.as_i64() {
        return Ok(FieldValue::Int(number));
    }

    Err(Error::data_validation(format!(
        "Chart '{}' row {} has unsupported value {} in column '{}'",
        chart.name, index, value, column
    )))
}

fn metric_from_json(
    chart: &ChartSpec,
    index: usize,
    object: &serde_json::Map<String, serde_json::Value>,
) -> Result<Metric> {
    let missing = |column: &str| {
        Error::data_validation(format!(
            "Chart '{}' row {} is missing metric column '{}'",
            chart.name, index, column
        ))
    };

    match chart.reduction {
        Reduction::Count => {
            let column = crate::constants::columns::COUNT;
            let count = object
                .get(column)
                .and_then(|value| value.as_u64())
                .ok_or_else(|| missing(column))?;
            Ok(Metric::Count(count))
        }
        Reduction::MeanResponseTime => {
            let column = crate::constants::columns::AVG_RESPONSE_TIME;
            let mean = object
                .get(column)
                .and_then(|value| value.as_f64())
                .ok_or_else(|| missing(column))?;
            Ok(Metric::AvgResponseTime(mean))
        }
    }
}
