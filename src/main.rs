//! Command-line front end for the fleet advisor.
//!
//! `recommend` scores one scenario and prints the recommendation with its
//! market context; `cities` lists the cities covered by the statistics
//! artifact. Both read the artifacts from a directory given on the command
//! line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fleet_advisor::{
    Advisor, ArtifactPaths, FuelType, MarketContext, Recommendation, Scenario, VehicleType,
};

#[derive(Parser, Debug)]
#[command(name = "fleet_advisor")]
#[command(author, version, about = "Fleet expansion decision support", long_about = None)]
struct Cli {
    /// Directory holding the model and processed-data artifacts
    #[arg(long, global = true, default_value = "artifacts")]
    artifacts_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one scenario and print the recommendation
    Recommend(RecommendArgs),

    /// List the cities covered by the statistics artifact
    Cities {
        /// Emit a JSON array instead of one city per line
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct RecommendArgs {
    /// City the vehicle would operate in
    #[arg(long)]
    city: String,

    /// Vehicle body type
    #[arg(long, value_enum)]
    vehicle_type: VehicleType,

    /// Vehicle age in years (1 to 15)
    #[arg(long)]
    vehicle_age: u32,

    /// Fuel type
    #[arg(long, value_enum)]
    fuel_type: FuelType,

    /// Emit the full report as JSON
    #[arg(long)]
    json: bool,
}

/// Everything the `recommend` subcommand prints, as one JSON document.
#[derive(Serialize)]
struct Report<'a> {
    scenario: &'a Scenario,
    recommendation: &'a Recommendation,
    market_context: &'a MarketContext,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let paths = ArtifactPaths::from_dir(&cli.artifacts_dir);
    let advisor = Advisor::load(&paths).with_context(|| {
        format!(
            "failed to load artifacts from {}",
            cli.artifacts_dir.display()
        )
    })?;

    match cli.command {
        Commands::Recommend(args) => run_recommend(&advisor, args),
        Commands::Cities { json } => run_cities(&advisor, json),
    }
}

fn run_recommend(advisor: &Advisor, args: RecommendArgs) -> Result<()> {
    let scenario = Scenario::new(args.city, args.vehicle_type, args.vehicle_age, args.fuel_type)?;
    let recommendation = advisor.recommend(&scenario)?;
    let market_context = advisor.market_context(&scenario.city)?;

    if args.json {
        let report = Report {
            scenario: &scenario,
            recommendation: &recommendation,
            market_context: &market_context,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&scenario, &recommendation, &market_context);
    }
    Ok(())
}

fn print_report(scenario: &Scenario, recommendation: &Recommendation, market: &MarketContext) {
    println!(
        "Predicted trips: {:.1}  (new {} {}, {} years old, in {})",
        recommendation.predicted_trips,
        scenario.fuel_type.as_str().to_lowercase(),
        scenario.vehicle_type.as_str(),
        scenario.vehicle_age,
        scenario.city,
    );
    println!();
    println!("Recommendation: {}", recommendation.action.headline());
    println!("  {}", recommendation.rationale);
    println!();
    println!("Market context for {}:", market.city);
    println!(
        "  average demand per vehicle: {:.1} trips",
        market.average_city_trips
    );
    println!("  competing vehicles:         {}", market.competing_vehicles);
}

fn run_cities(advisor: &Advisor, json: bool) -> Result<()> {
    let cities: Vec<&str> = advisor.cities().collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&cities)?);
    } else {
        for city in cities {
            println!("{city}");
        }
    }
    Ok(())
}
