mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::affordability::ClosingCostArgs;
use commands::amortization::{CompareArgs, PaymentArgs, ScheduleArgs};
use commands::analysis::AnalyzeArgs;

/// Fixed-rate mortgage calculator
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Fixed-rate mortgage payment, amortization and term comparison",
    long_about = "A CLI for fixed-rate mortgage calculations with decimal precision. \
                  Computes the monthly payment, a sampled amortization schedule, \
                  the cost of alternative loan terms, closing costs and \
                  affordability ratios."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the fixed monthly payment and total cost
    Payment(PaymentArgs),
    /// Build the amortization schedule
    Schedule(ScheduleArgs),
    /// Compare payment and total interest across loan terms
    Compare(CompareArgs),
    /// Itemise upfront closing costs
    ClosingCosts(ClosingCostArgs),
    /// Run the full mortgage analysis
    Analyze(AnalyzeArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Compare(args) => commands::amortization::run_compare(args),
        Commands::ClosingCosts(args) => commands::affordability::run_closing_costs(args),
        Commands::Analyze(args) => commands::analysis::run_analyze(args),
        Commands::Version => {
            println!("mortgage {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
