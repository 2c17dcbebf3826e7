use clap::Parser;
use incident_aggregator::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(commands::run(args));

    match result {
        Ok(()) => {
            // Success - reports have already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Incident Aggregator - Emergency Incident Data Pipeline");
    println!("======================================================");
    println!();
    println!("Re-aggregate raw emergency-incident CSV data into the grouped chart");
    println!("data files the ResQVision dashboards consume.");
    println!();
    println!("USAGE:");
    println!("    incident-aggregator <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Re-aggregate a raw incident CSV into chart data files (main command)");
    println!("    export      Export one chart's rows with dashboard-style filters applied");
    println!("    summary     Report headline metrics for a raw incident CSV");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Rebuild every chart data file from an upload:");
    println!("    incident-aggregator process --input incidents.csv --output data/");
    println!();
    println!("    # Export the response heatmap for urban critical incidents in 2020:");
    println!("    incident-aggregator export response_heatmap --regions Urban \\");
    println!("                               --levels Critical --from 2020-01 --to 2020-12");
    println!();
    println!("    # Print headline metrics:");
    println!("    incident-aggregator summary --input incidents.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    incident-aggregator <COMMAND> --help");
}
