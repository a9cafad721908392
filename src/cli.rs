//! Command-line interface for the boss-rush simulator
//!
//! Headless-only binary: every run takes a JSON scenario file and
//! produces a fight log plus a console summary.

use clap::Parser;
use std::path::PathBuf;

/// Boss-rush combat simulator
#[derive(Parser, Debug)]
#[command(name = "bossrush")]
#[command(about = "Boss-rush action combat simulator")]
#[command(version)]
pub struct Args {
    /// JSON scenario file to run
    #[arg(value_name = "SCENARIO_FILE")]
    pub scenario: PathBuf,

    /// Output path for the fight log (overrides the scenario's)
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Random seed (overrides the scenario's)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum scenario duration in seconds (overrides the scenario's)
    #[arg(long)]
    pub max_duration: Option<f32>,
}

pub fn parse_args() -> Args {
    Args::parse()
}
