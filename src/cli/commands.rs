//! Command implementations for the incident aggregator CLI
//!
//! This module contains the main command execution logic, progress
//! reporting, and the final human-readable reports.

use crate::app::services::aggregator::{KeyField, RowFilter};
use crate::app::services::chart_specs::{self, CHART_CATALOGUE, ChartSpec};
use crate::app::services::dashboard_data::{DashboardDataService, SessionState};
use crate::app::services::export_writer::{self, ExportFormat};
use crate::cli::args::{
    Args, Commands, ExportArgs, OutputFormat, ProcessArgs, SummaryArgs, log_level,
};
use crate::{Config, Error, Result};
use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Main command runner for the incident aggregator
pub async fn run(args: Args) -> Result<()> {
    let command = args
        .command
        .ok_or_else(|| Error::configuration("No command specified"))?;

    match command {
        Commands::Process(cmd) => {
            setup_logging(cmd.verbose, cmd.quiet)?;
            cmd.validate()?;
            run_process(cmd).await
        }
        Commands::Export(cmd) => {
            setup_logging(cmd.verbose, cmd.quiet)?;
            cmd.validate()?;
            run_export(cmd).await
        }
        Commands::Summary(cmd) => {
            setup_logging(cmd.verbose, cmd.quiet)?;
            cmd.validate()?;
            run_summary(cmd).await
        }
    }
}

/// Set up structured logging based on CLI verbosity flags
fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let level = log_level(verbose, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("incident_aggregator={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", level);
    Ok(())
}

/// Load configuration and apply process-command overrides
fn load_process_configuration(args: &ProcessArgs) -> Result<Config> {
    let mut config = Config::load_layered(args.config_file.as_deref())?;

    if let Some(output_path) = &args.output_path {
        config.data_dir = output_path.clone();
    }
    if let Some(max_rows) = args.max_rows {
        config.ingest.max_rows = max_rows;
    }
    if args.compact {
        config.export.pretty_json = false;
    }

    config.validate()?;
    Ok(config)
}

/// Run the batch re-aggregation command
async fn run_process(args: ProcessArgs) -> Result<()> {
    let start_time = Instant::now();
    let config = load_process_configuration(&args)?;

    info!("Processing upload {}", args.input_path.display());

    let session = SessionState::client_upload(&args.input_path, &config.data_dir);
    let service = DashboardDataService::load(session, &config)?;

    let charts: Vec<&ChartSpec> = match &args.charts {
        Some(list) => list
            .charts
            .iter()
            .map(|name| chart_specs::find_chart(name))
            .collect::<Result<Vec<_>>>()?,
        None => CHART_CATALOGUE.iter().collect(),
    };

    let format = export_format(args.output_format)?;
    let extension = match format {
        ExportFormat::Json => "json",
        ExportFormat::Csv => "csv",
    };

    let progress_bar = if !args.quiet {
        let pb = ProgressBar::new(charts.len() as u64 + 1);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Aggregating...");
        Some(pb)
    } else {
        None
    };

    let mut chart_reports = Vec::new();
    for (i, chart) in charts.iter().enumerate() {
        if let Some(pb) = &progress_bar {
            pb.set_position(i as u64);
            pb.set_message(format!("Aggregating {}", chart.name));
        }

        let rows = service.chart_rows(chart)?;
        let path = config
            .data_dir
            .join(format!("{}.{}", chart.name, extension));
        export_writer::export_rows_to_file(&path, &rows, format, config.export.pretty_json)?;

        info!("Completed {}: {} groups", chart.name, rows.len());
        chart_reports.push((chart.name, rows.len()));
    }

    // headline metrics ride along with the chart files
    if let Some(pb) = &progress_bar {
        pb.set_position(charts.len() as u64);
        pb.set_message("Computing metrics summary");
    }
    let records = service
        .records()
        .ok_or_else(|| Error::configuration("Upload session produced no records"))?;
    write_metrics_summary(records, &config)?;

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Processing complete");
    }

    if !args.quiet {
        print_process_report(&args, &service, &chart_reports, start_time.elapsed());
    }

    Ok(())
}

/// Run the filtered chart export command
async fn run_export(args: ExportArgs) -> Result<()> {
    let mut config = Config::load_layered(args.config_file.as_deref())?;
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if args.compact {
        config.export.pretty_json = false;
    }
    config.validate()?;

    let chart = chart_specs::find_chart(&args.chart)?;

    let session = match &args.input_path {
        Some(input_path) => SessionState::client_upload(input_path, &config.data_dir),
        None => SessionState::static_fallback(&config.data_dir),
    };
    let service = DashboardDataService::load(session, &config)?;

    let rows = service.chart_rows(chart)?;
    let filter = build_row_filter(&args)?;
    let filtered = filter.apply(&rows);

    info!(
        "Exporting {}: {} of {} rows after filtering",
        chart.name,
        filtered.len(),
        rows.len()
    );

    let format = export_format(args.output_format)?;
    match &args.output_file {
        Some(path) => {
            export_writer::export_rows_to_file(path, &filtered, format, config.export.pretty_json)?
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            export_writer::write_rows(&mut handle, &filtered, format, config.export.pretty_json)?;
        }
    }

    Ok(())
}

/// Run the headline metrics command
async fn run_summary(args: SummaryArgs) -> Result<()> {
    let config = Config::load_layered(None)?;
    let session = SessionState::client_upload(&args.input_path, &config.data_dir);
    let service = DashboardDataService::load(session, &config)?;

    let records = service
        .records()
        .ok_or_else(|| Error::configuration("Upload session produced no records"))?;

    if let Some(stats) = service.parse_stats() {
        if !stats.is_successful() {
            warn!("{}", stats.summary());
        }
    }

    let summary = crate::app::services::metrics::MetricsSummary::compute(records);

    match args.output_format {
        OutputFormat::Human => {
            println!("{}", "Incident Dataset Summary".bold());
            println!("  Unique emergencies:      {}", summary.unique_emergencies);
            println!(
                "  Avg response time:       {} min",
                summary.avg_response_time_min
            );
            println!(
                "  Most common incident:    {}",
                summary.most_common_incident.as_deref().unwrap_or("n/a")
            );
            println!(
                "  High severity share:     {}%",
                summary.percent_high_severity
            );
            println!(
                "  Ambulance availability:  {}%",
                summary.ambulance_availability_rate
            );
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| Error::json("Failed to serialize metrics summary", e))?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("metric,value");
            println!("unique_emergencies,{}", summary.unique_emergencies);
            println!("avg_response_time_min,{}", summary.avg_response_time_min);
            println!(
                "most_common_incident,{}",
                summary.most_common_incident.as_deref().unwrap_or("")
            );
            println!("percent_high_severity,{}", summary.percent_high_severity);
            println!(
                "ambulance_availability_rate,{}",
                summary.ambulance_availability_rate
            );
        }
    }

    Ok(())
}

/// Map the CLI output format onto an export serialization
fn export_format(format: OutputFormat) -> Result<ExportFormat> {
    match format {
        OutputFormat::Json => Ok(ExportFormat::Json),
        OutputFormat::Csv => Ok(ExportFormat::Csv),
        OutputFormat::Human => Err(Error::configuration(
            "Human format is not a data serialization",
        )),
    }
}

/// Build the export row filter from CLI arguments
fn build_row_filter(args: &ExportArgs) -> Result<RowFilter> {
    let mut filter = RowFilter::new();

    if let Some(regions) = &args.regions {
        filter = filter.with_allowed_values(KeyField::RegionType, regions.values.clone());
    }
    if let Some(incident_types) = &args.incident_types {
        filter = filter.with_allowed_values(KeyField::IncidentType, incident_types.values.clone());
    }
    if let Some(levels) = &args.levels {
        filter = filter.with_allowed_values(KeyField::EmergencyLevel, levels.values.clone());
    }
    if let Some(traffic) = &args.traffic {
        filter = filter.with_allowed_values(KeyField::TrafficCongestion, traffic.values.clone());
    }

    if let (Some(from), Some(to)) = (&args.month_from, &args.month_to) {
        filter = filter.with_month_range(from.parse()?, to.parse()?);
    }

    Ok(filter)
}

/// Compute and write the metrics summary data file
fn write_metrics_summary(
    records: &[crate::IncidentRecord],
    config: &Config,
) -> Result<crate::app::services::metrics::MetricsSummary> {
    use crate::constants::METRICS_SUMMARY_FILE_STEM;

    let summary = crate::app::services::metrics::MetricsSummary::compute(records);
    let path = config
        .data_dir
        .join(format!("{}.json", METRICS_SUMMARY_FILE_STEM));

    let serialized = if config.export.pretty_json {
        serde_json::to_string_pretty(&summary)
    } else {
        serde_json::to_string(&summary)
    }
    .map_err(|e| Error::json("Failed to serialize metrics summary", e))?;

    std::fs::write(&path, serialized + "\n")
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

    info!("Wrote metrics summary to {}", path.display());
    Ok(summary)
}

/// Print the final human report for a processing run
fn print_process_report(
    args: &ProcessArgs,
    service: &DashboardDataService,
    chart_reports: &[(&str, usize)],
    elapsed: std::time::Duration,
) {
    println!();
    println!("{}", "Processing complete".green().bold());
    println!("  Input:   {}", args.input_path.display());

    if let Some(stats) = service.parse_stats() {
        println!(
            "  Parsed:  {} of {} rows ({:.1}% success)",
            stats.records_parsed,
            stats.total_records,
            stats.success_rate()
        );
        if stats.records_skipped > 0 {
            println!(
                "  {} {} rows skipped ({} invalid timestamps)",
                "Note:".yellow(),
                stats.records_skipped,
                stats.invalid_timestamps
            );
        }
        if stats.invalid_numeric_values > 0 {
            println!(
                "  {} {} numeric values could not be parsed",
                "Note:".yellow(),
                stats.invalid_numeric_values
            );
        }
    }

    println!("  Charts:");
    for (name, groups) in chart_reports {
        println!("    {:32} {} groups", name, groups);
    }
    println!("  Elapsed: {}", HumanDuration(elapsed));
}
