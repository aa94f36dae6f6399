mod commands;
mod config;
mod input;
mod output;
mod store;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::evaluation::EvaluateArgs;
use commands::financing::FinancingArgs;
use commands::hidden_costs::{CompareStatesArgs, HiddenCostsArgs};
use commands::numeric::ParseNumberArgs;
use commands::roi::RoiArgs;
use commands::saved::{DeleteArgs, ExportArgs, SaveArgs, ShowArgs};
use config::CliConfig;

/// Property purchase and rental calculations for the German market
#[derive(Parser)]
#[command(
    name = "immo",
    version,
    about = "Property purchase and rental calculations for the German market",
    long_about = "Decimal-precision calculators for buying residential property in Germany: \
                  purchase side costs by federal state, buy-to-let returns with a ten-year \
                  projection, mortgage eligibility scoring and a year-one property evaluation. \
                  Calculations can be exported or saved to a local JSON store."
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
    /// Purchase side costs (transfer tax, notary, land registry, agent)
    HiddenCosts(HiddenCostsArgs),
    /// Rank all sixteen federal states by total purchase cost
    CompareStates(CompareStatesArgs),
    /// Buy-to-let yields, cash flow, grade and ten-year projection
    Roi(RoiArgs),
    /// Five-year projection without amortisation
    RoiLegacy(RoiArgs),
    /// Mortgage eligibility score for a borrower profile
    Financing(FinancingArgs),
    /// Year-one evaluation of a rented flat, including tax effect
    Evaluate(EvaluateArgs),
    /// Export a calculation with its result as a JSON document
    Export(ExportArgs),
    /// Save a calculation to the local store
    Save(SaveArgs),
    /// List saved calculations, newest first
    List,
    /// Show a saved calculation by id or share token
    Show(ShowArgs),
    /// Delete a saved calculation
    Delete(DeleteArgs),
    /// Show how a form field would be read as a number
    ParseNumber(ParseNumberArgs),
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

fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "config error".red().bold(), e);
            process::exit(2);
        }
    };
    if let Err(e) = telemetry::init(&config.telemetry) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::HiddenCosts(args) => commands::hidden_costs::run_hidden_costs(args),
        Commands::CompareStates(args) => commands::hidden_costs::run_compare_states(args),
        Commands::Roi(args) => commands::roi::run_roi(args),
        Commands::RoiLegacy(args) => commands::roi::run_roi_legacy(args),
        Commands::Financing(args) => commands::financing::run_financing(args),
        Commands::Evaluate(args) => commands::evaluation::run_evaluate(args),
        Commands::Export(args) => commands::saved::run_export(args),
        Commands::Save(args) => commands::saved::run_save(args, &config),
        Commands::List => commands::saved::run_list(&config),
        Commands::Show(args) => commands::saved::run_show(args, &config),
        Commands::Delete(args) => commands::saved::run_delete(args, &config),
        Commands::ParseNumber(args) => commands::numeric::run_parse_number(args),
        Commands::Version => {
            println!("immo {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
