//! Combat Simulation Core
//!
//! Implements the tick-driven combat model:
//! - Combatant stats, HP, and the seeded RNG
//! - Skill state machines (READY/CASTING/EXECUTING/COOLDOWN)
//! - Status effects and crowd control
//! - Damage mitigation and crits
//! - Actor scripts for the player and trash mobs
//! - Structured combat logging
//!
//! Boss phase flow lives in `crate::boss`, projectiles in
//! `crate::projectile`; both plug into the system ordering defined in
//! `systems`.

use bevy::prelude::*;

pub mod components;
pub mod constants;
pub mod damage;
pub mod events;
pub mod log;
pub mod scripts;
pub mod skill_config;
pub mod skills;
pub mod status;
pub mod systems;

use events::CombatEventsPlugin;
use skill_config::SkillBookPlugin;

/// Registers everything the combat tick needs except the scenario
/// itself: events, the skill book, the log, and the projectile pool.
/// World bounds and the RNG are inserted by the scenario/runner since
/// both are per-run values.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CombatEventsPlugin, SkillBookPlugin))
            .init_resource::<log::CombatLog>()
            .init_resource::<crate::projectile::ProjectilePool>();
    }
}
