//! Headless mode for agentic testing
//!
//! Runs boss-fight scenarios without any graphical output, suitable for
//! automated testing and balance sweeps.
//!
//! ## Usage
//!
//! ```bash
//! # Run a headless scenario
//! cargo run --release -- --headless scenario.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "boss": "frost_revenant",
//!   "mobs": [{ "kind": "lunger", "x": -150.0, "y": 0.0 }],
//!   "max_duration_secs": 120,
//!   "random_seed": 42
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::{MobSpawn, ScenarioConfig};
pub use runner::{run_scenario, CombatantReport, FightOutcome, FightResult};
