//! HealthRank CLI — rank, thresholds, assign and curve commands.
//!
//! Commands:
//! - `rank` — exclusive-method rank for one fraction and sample size
//! - `thresholds` — percentile value for each requested fraction
//! - `assign` — percentile bucket of every value, in ascending order
//! - `curve` — distribution curve points for charting
//!
//! Values are passed as arguments and results are printed as JSON. Set
//! `RUST_LOG=debug` to see what the engine is doing.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use healthrank_core::{
    assign_percentiles, compute_thresholds, percentile_curve, rank, unassigned, DataPoint,
    PercentileRequest, RankingConfig,
};

#[derive(Parser)]
#[command(
    name = "healthrank",
    about = "HealthRank CLI — exclusive-method percentiles for health indicator data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the 1-based rank of a percentile in a sample of the given size.
    Rank {
        /// Percentile fraction, strictly between 0 and 1.
        #[arg(long)]
        fraction: f64,

        /// Number of values in the sample.
        #[arg(long)]
        size: usize,
    },
    /// Print the percentile value for each requested fraction.
    Thresholds(DataArgs),
    /// Print every value with the percentile bucket it falls into.
    Assign(DataArgs),
    /// Print the distribution curve as (percent, value) points.
    Curve(DataArgs),
}

#[derive(Args)]
struct DataArgs {
    /// Comma-separated fractions, e.g. 0.25,0.5,0.75. Overrides the config.
    #[arg(long, value_delimiter = ',')]
    fractions: Option<Vec<f64>>,

    /// Path to a TOML ranking config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sample values.
    #[arg(required = true, allow_negative_numbers = true)]
    values: Vec<f64>,
}

impl DataArgs {
    fn request(&self) -> Result<PercentileRequest> {
        if let Some(fractions) = &self.fractions {
            return Ok(PercentileRequest::new(fractions.clone()));
        }
        let config = match &self.config {
            Some(path) => RankingConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RankingConfig::default(),
        };
        Ok(config.request()?)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank { fraction, size } => run_rank(fraction, size),
        Commands::Thresholds(args) => run_thresholds(&args),
        Commands::Assign(args) => run_assign(&args),
        Commands::Curve(args) => run_curve(&args),
    }
}

fn run_rank(fraction: f64, size: usize) -> Result<()> {
    let x = rank(fraction, size)?;
    println!("{x}");
    Ok(())
}

fn run_thresholds(args: &DataArgs) -> Result<()> {
    let request = args.request()?;
    let table = compute_thresholds(&args.values, request.fractions())?;
    println!("{}", serde_json::to_string_pretty(&table.to_pairs())?);
    Ok(())
}

fn run_assign(args: &DataArgs) -> Result<()> {
    let request = args.request()?;
    let mut points: Vec<DataPoint<usize>> = args
        .values
        .iter()
        .enumerate()
        .map(|(i, &v)| DataPoint::new(i, v))
        .collect();
    assign_percentiles(&mut points, Some(&request))?;

    let gap = unassigned(&points).len();
    if gap > 0 {
        info!("{gap} values lie above the largest computed threshold and were not ranked");
    }
    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}

fn run_curve(args: &DataArgs) -> Result<()> {
    let request = args.request()?;
    let curve = percentile_curve(&args.values, &request)?;
    println!("{}", serde_json::to_string_pretty(&curve)?);
    Ok(())
}
