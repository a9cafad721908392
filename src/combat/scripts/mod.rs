//! Actor Scripts
//!
//! Deterministic per-tick decision logic for the non-boss combatants:
//! the scripted player used by headless scenarios, and the two mob
//! archetypes. Scripts only set movement intent and request casts; the
//! skill machinery and movement system enforce locks, status effects,
//! and bounds.

pub mod mobs;
pub mod player;

pub use mobs::{spawn_mob, tick_mob_scripts, MobKind, MobScript};
pub use player::{spawn_player, tick_player_script, PlayerScript};
