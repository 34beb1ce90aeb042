use clap::Parser;
use nimrod_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("NIMROD Processor - Catchment Rainfall Time Series Extractor");
    println!("===========================================================");
    println!();
    println!("Convert UK Met Office NIMROD radar rainfall composites into a");
    println!("per-catchment CSV time series of area-averaged rainfall rates.");
    println!();
    println!("USAGE:");
    println!("    nimrod-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    extract     Extract the rainfall time series (main command)");
    println!("    check       Check the configured snapshot files without processing");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Extract using ./nimrod.toml:");
    println!("    nimrod-processor extract");
    println!();
    println!("    # Extract with an explicit configuration and workspace:");
    println!("    nimrod-processor extract --config runs/severn.toml --workspace scratch");
    println!();
    println!("    # Verify all snapshot files exist before a long run:");
    println!("    nimrod-processor check --config runs/severn.toml");
    println!();
    println!("For detailed help on any command, use:");
    println!("    nimrod-processor <COMMAND> --help");
}
