//! Command-line argument definitions for the incident aggregator
//!
//! This module defines the CLI interface using the clap derive API:
//! the batch processing command, the filtered chart export, and the
//! headline metrics summary.

use crate::app::services::chart_specs;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the incident aggregator
///
/// Re-aggregates raw emergency-incident CSV data into the grouped chart
/// data files the ResQVision dashboards consume.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "incident-aggregator",
    version,
    about = "Re-aggregate emergency-incident CSV data into dashboard chart files",
    long_about = "A deterministic aggregation pipeline for emergency-incident data. \
                  Parses a raw incident CSV upload, groups records by region, incident \
                  type, severity, month and more, and writes the same grouped summary \
                  files the dashboards otherwise serve statically."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the incident aggregator
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Re-aggregate a raw incident CSV into chart data files (main command)
    Process(ProcessArgs),
    /// Export one chart's rows with dashboard-style filters applied
    Export(ExportArgs),
    /// Report headline metrics for a raw incident CSV
    Summary(SummaryArgs),
}

/// Arguments for the process command (batch re-aggregation)
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input path to the raw incident CSV
    ///
    /// Comma-separated text with a header row naming fields such as
    /// Timestamp, Region_Type, Incident_Type, Response_Time.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Input path to the raw incident CSV"
    )]
    pub input_path: PathBuf,

    /// Output directory for generated chart data files
    ///
    /// Will be created if it doesn't exist. Generated files are named
    /// like incident_trends.json, response_heatmap.json, etc.
    /// If not specified, defaults to the configured data directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output directory for generated chart data files"
    )]
    pub output_path: Option<PathBuf>,

    /// Specific charts to generate (comma-separated list)
    ///
    /// If not specified, generates every chart in the catalogue.
    #[arg(
        long = "charts",
        value_name = "LIST",
        help = "Comma-separated list of charts to generate"
    )]
    pub charts: Option<ChartList>,

    /// Output format for chart data files
    #[arg(
        long = "format",
        value_enum,
        default_value = "json",
        help = "Output format for chart data files"
    )]
    pub output_format: OutputFormat,

    /// Write compact JSON instead of pretty-printed
    #[arg(long = "compact", help = "Write compact JSON instead of pretty-printed")]
    pub compact: bool,

    /// Ceiling on data rows accepted from the upload
    ///
    /// Oversized uploads fail fast with a diagnostic instead of
    /// degrading interactively.
    #[arg(
        long = "max-rows",
        value_name = "COUNT",
        help = "Ceiling on data rows accepted from the upload"
    )]
    pub max_rows: Option<usize>,

    /// Path to configuration file (JSON format)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the export command (filtered chart download)
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Chart to export
    #[arg(value_name = "CHART", help = "Chart name from the catalogue")]
    pub chart: String,

    /// Raw incident CSV to re-aggregate before exporting
    ///
    /// When omitted, rows come from the pre-computed chart data files
    /// in the data directory (the static fallback source).
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Raw incident CSV to re-aggregate (default: static chart files)"
    )]
    pub input_path: Option<PathBuf>,

    /// Directory holding pre-computed chart data files
    #[arg(
        long = "data-dir",
        value_name = "PATH",
        help = "Directory holding pre-computed chart data files"
    )]
    pub data_dir: Option<PathBuf>,

    /// Output file for exported rows
    ///
    /// If not specified, outputs to stdout.
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        help = "Output file for exported rows (default: stdout)"
    )]
    pub output_file: Option<PathBuf>,

    /// Output format for exported rows
    #[arg(
        long = "format",
        value_enum,
        default_value = "json",
        help = "Output format for exported rows"
    )]
    pub output_format: OutputFormat,

    /// Keep only these region types (comma-separated list)
    #[arg(long = "regions", value_name = "LIST", help = "Keep only these region types")]
    pub regions: Option<ValueList>,

    /// Keep only these incident types (comma-separated list)
    #[arg(
        long = "incident-types",
        value_name = "LIST",
        help = "Keep only these incident types"
    )]
    pub incident_types: Option<ValueList>,

    /// Keep only these emergency levels (comma-separated list)
    #[arg(long = "levels", value_name = "LIST", help = "Keep only these emergency levels")]
    pub levels: Option<ValueList>,

    /// Keep only these traffic congestion levels (comma-separated list)
    #[arg(
        long = "traffic",
        value_name = "LIST",
        help = "Keep only these traffic congestion levels"
    )]
    pub traffic: Option<ValueList>,

    /// Start of the inclusive month range (YYYY-MM)
    #[arg(
        long = "from",
        value_name = "MONTH",
        help = "Start of the inclusive month range (YYYY-MM)",
        requires = "month_to"
    )]
    pub month_from: Option<String>,

    /// End of the inclusive month range (YYYY-MM)
    #[arg(
        long = "to",
        value_name = "MONTH",
        help = "End of the inclusive month range (YYYY-MM)",
        requires = "month_from"
    )]
    pub month_to: Option<String>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long = "compact", help = "Write compact JSON instead of pretty-printed")]
    pub compact: bool,

    /// Path to configuration file (JSON format)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the summary command (headline metrics)
#[derive(Debug, Clone, Parser)]
pub struct SummaryArgs {
    /// Input path to the raw incident CSV
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Input path to the raw incident CSV"
    )]
    pub input_path: PathBuf,

    /// Output format for the metrics report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the metrics report"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format, matching the chart data files
    Json,
    /// CSV format for data analysis
    Csv,
}

/// Wrapper for parsing comma-separated chart lists
#[derive(Debug, Clone)]
pub struct ChartList {
    pub charts: Vec<String>,
}

impl FromStr for ChartList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let charts: Vec<String> = s
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if charts.is_empty() {
            return Err(Error::data_validation("Chart list cannot be empty"));
        }

        // Validate each chart name against the catalogue
        for chart in &charts {
            chart_specs::find_chart(chart)?;
        }

        Ok(ChartList { charts })
    }
}

/// Wrapper for parsing comma-separated filter value lists.
///
/// Values are not validated against a vocabulary: categorical fields are
/// open-ended, and an unmatched value simply filters everything out.
#[derive(Debug, Clone)]
pub struct ValueList {
    pub values: Vec<String>,
}

impl FromStr for ValueList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let values: Vec<String> = s
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if values.is_empty() {
            return Err(Error::data_validation("Filter value list cannot be empty"));
        }

        Ok(ValueList { values })
    }
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                self.input_path.display()
            )));
        }

        if self.input_path.is_dir() {
            return Err(Error::configuration(format!(
                "Input path is a directory, expected a CSV file: {}",
                self.input_path.display()
            )));
        }

        if self.output_format == OutputFormat::Human {
            return Err(Error::configuration(
                "Chart data files are machine-readable; use --format json or csv",
            ));
        }

        if self.max_rows == Some(0) {
            return Err(Error::configuration(
                "Row limit must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl ExportArgs {
    /// Validate the export command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        chart_specs::find_chart(&self.chart)?;

        if let Some(input_path) = &self.input_path {
            if !input_path.exists() {
                return Err(Error::configuration(format!(
                    "Input path does not exist: {}",
                    input_path.display()
                )));
            }
        }

        if self.output_format == OutputFormat::Human {
            return Err(Error::configuration(
                "Chart exports are machine-readable; use --format json or csv",
            ));
        }

        if let (Some(from), Some(to)) = (&self.month_from, &self.month_to) {
            let from: crate::MonthBucket = from.parse()?;
            let to: crate::MonthBucket = to.parse()?;
            if from > to {
                return Err(Error::configuration(format!(
                    "Month range start {} is after end {}",
                    from, to
                )));
            }
        }

        Ok(())
    }
}

impl SummaryArgs {
    /// Validate the summary command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                self.input_path.display()
            )));
        }

        Ok(())
    }
}

/// Map a verbosity count and quiet flag to a tracing level name
pub fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }

    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
