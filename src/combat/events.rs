//! Combat Events
//!
//! Discrete notifications fired at the moment their condition occurs.
//! Rendering, audio, and score consumers subscribe to these; the
//! simulation itself only emits them (plus the headless runner, which
//! counts phases for its result report). Consumers must not assume any
//! ordering relative to rendering.

use bevy::prelude::*;

use super::skill_config::SkillId;
use super::status::StatusSpec;

/// A boss phase became active (including the first on spawn).
#[derive(Event, Debug, Clone)]
pub struct PhaseStartEvent {
    pub boss: Entity,
    pub phase_index: usize,
    pub phase_name: String,
    pub is_spell_card: bool,
}

/// A phase's HP pool was depleted; the boss is holding for the
/// transition trigger. Fired before any HP/skill swap happens.
#[derive(Event, Debug, Clone)]
pub struct PhaseCompleteEvent {
    pub boss: Entity,
    pub completed_phase_index: usize,
    pub next_phase_index: usize,
}

/// A player projectile connected with an enemy.
#[derive(Event, Debug, Clone)]
pub struct SkillHitEvent {
    pub target: Entity,
    pub damage: i32,
    /// True when the hit interrupted a cast in progress on the target.
    pub did_break: bool,
    pub skill: SkillId,
    pub is_crit: bool,
}

/// An enemy (boss or mob) projectile connected with the player.
#[derive(Event, Debug, Clone)]
pub struct MobSkillHitEvent {
    pub damage: i32,
    pub skill: SkillId,
    /// Stun/slow payload that rode along with the hit, if any.
    pub payload: Option<StatusSpec>,
}

/// A combatant ran out of HP (for bosses: out of final-phase HP).
#[derive(Event, Debug, Clone)]
pub struct CombatantDeathEvent {
    pub victim: Entity,
    pub faction_label: &'static str,
}

/// Registers every combat event on the app.
pub struct CombatEventsPlugin;

impl Plugin for CombatEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PhaseStartEvent>()
            .add_event::<PhaseCompleteEvent>()
            .add_event::<SkillHitEvent>()
            .add_event::<MobSkillHitEvent>()
            .add_event::<CombatantDeathEvent>();
    }
}
