//! BossRush - Action Combat Simulation Prototype
//!
//! A tick-driven combat core for a bullet-hell boss-rush game: skill
//! state machines, status effects, a projectile engine with oriented
//! hit shapes, and multi-phase boss controllers, all runnable headless
//! for automated testing.
//!
//! This library exposes the core modules for testing and reuse.

pub mod boss;
pub mod cli;
pub mod combat;
pub mod headless;
pub mod projectile;

// Re-export commonly used types
pub use boss::{BossBehavior, BossKind, PhaseController, PhaseFlow};
pub use combat::log::{CombatLog, CombatLogEventType};
pub use headless::{run_scenario, FightOutcome, FightResult, ScenarioConfig};
