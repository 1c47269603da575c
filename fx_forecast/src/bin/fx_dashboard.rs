//! Text dashboard over the precomputed DXY forecasts
//!
//! Usage: cargo run --bin fx_dashboard -- --config dashboard.toml alerts

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fx_forecast::anomaly::AnomalyDetector;
use fx_forecast::diagnosis::{diagnose, Reliability};
use fx_forecast::report::{lookup, summarize_period};
use fx_forecast::{DashboardConfig, DataLoader, Evaluator, ForecastError, SpotClient};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "USD/EUR and DXY forecast dashboard")]
struct Args {
    /// TOML configuration file; defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Accuracy of the model against realized DXY values
    Evaluate,
    /// Forecast days with high dispersion or abrupt variation
    Alerts,
    /// Forecast for a single date
    Lookup {
        #[arg(short, long)]
        date: NaiveDate,
    },
    /// Neutral, positive and negative scenarios for a date
    Scenario {
        #[arg(short, long)]
        date: NaiveDate,
    },
    /// Summary of the forecasts within a date range
    Report {
        #[arg(long, default_value = "2025-09-10")]
        from: NaiveDate,
        #[arg(long, default_value = "2025-09-18")]
        to: NaiveDate,
    },
    /// Hit-rate reliability diagnosis of the monthly outcome log
    Diagnose,
    /// Latest USD/EUR spot rate
    Spot,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("reading configuration {}", path.display()))?,
        None => DashboardConfig::from_env(),
    };
    info!("Running {:?}", args.command);

    match args.command {
        Command::Evaluate => {
            let table = DataLoader::forecast_table(&config.paths.comparison, &config.columns)?;
            let report = Evaluator::new(config.evaluator).evaluate_table(&table)?;
            print!("{}", report);
        }
        Command::Alerts => {
            let table = DataLoader::forecast_table(&config.paths.forecasts, &config.columns)?;
            let report = AnomalyDetector::new(config.detector).detect(&table)?;
            print!("{}", report);
            if !report.is_clean() {
                println!("Flagged days deserve a look at the economic context before acting on them.");
            }
        }
        Command::Lookup { date } => {
            let table = DataLoader::forecast_table(&config.paths.forecasts, &config.columns)?;
            match lookup(&table, date) {
                Some(forecast) => print!("{}", forecast),
                None => println!("No forecast available for {}. Try a business day.", date),
            }
        }
        Command::Scenario { date } => {
            let table = DataLoader::scenario_table(&config.paths.scenarios, &config.columns)?;
            match table.get(date) {
                Some(scenario) => print!("{}", scenario),
                None => println!("No scenario data available for {}.", date),
            }
        }
        Command::Report { from, to } => {
            let table = DataLoader::forecast_table(&config.paths.forecasts, &config.columns)?;
            match summarize_period(&table, from, to) {
                Ok(summary) => print!("{}", summary),
                Err(ForecastError::InsufficientData { .. }) => {
                    println!("No forecasts available between {} and {}.", from, to)
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Diagnose => {
            let log = DataLoader::outcome_log(&config.paths.outcomes, &config.columns)?;
            let diagnosis = diagnose(&log, &config.diagnosis)?;
            print!("{}", diagnosis);
            let advice = match diagnosis.reliability {
                Reliability::High => "The model was precise and stable over the period.",
                Reliability::Moderate => "Useful with supervision; review volatile days.",
                Reliability::Low => "The model needs review before further use.",
            };
            println!("{}", advice);
        }
        Command::Spot => {
            let client = SpotClient::new(config.spot.clone())?;
            println!("{}", client.status());
        }
    }

    Ok(())
}
