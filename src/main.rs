//! BossRush - Action Combat Simulation Prototype
//!
//! Runs one headless boss-fight scenario and prints the result.

use bossrush::cli;
use bossrush::headless::{run_scenario, ScenarioConfig};

fn main() {
    let args = cli::parse_args();

    let mut config = match ScenarioConfig::load_from_file(&args.scenario) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading scenario: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(output) = args.output {
        config.output_path = Some(output.to_string_lossy().into_owned());
    }
    if let Some(seed) = args.seed {
        config.random_seed = Some(seed);
    }
    if let Some(max_duration) = args.max_duration {
        config.max_duration_secs = max_duration;
    }

    println!("Starting headless scenario '{}'...", config.scenario_name);
    println!("  Boss: {}", config.boss);
    println!("  Mobs: {}", config.mobs.len());
    println!("  Max duration: {:.0}s", config.max_duration_secs);

    match run_scenario(config) {
        Ok(result) => {
            println!(
                "Outcome: {} after {:.1}s ({} phases cleared)",
                result.outcome.label(),
                result.duration,
                result.phases_cleared
            );
            for report in &result.reports {
                println!(
                    "  {}: {}/{} hp, dealt {}, took {}",
                    report.name,
                    report.final_hp,
                    report.max_hp,
                    report.damage_dealt,
                    report.damage_taken
                );
            }
        }
        Err(e) => {
            eprintln!("Scenario failed: {}", e);
            std::process::exit(1);
        }
    }
}
