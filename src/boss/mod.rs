//! Boss Module
//!
//! Phase sequencing (`phase`), the data-driven behavior strategies
//! (`behavior`), and the concrete roster (`bosses`).

pub mod behavior;
pub mod bosses;
pub mod phase;

pub use behavior::{BossBehavior, BossBrain, BossKind, BossTickContext, BossTickOutput};
pub use phase::{BossPhase, PhaseController, PhaseFlow, PhaseKind};

use bevy::prelude::*;

use crate::combat::components::{Combatant, Faction};
use crate::combat::skills::{ConcurrencyPolicy, SkillSet};
use crate::combat::status::{StatusEffect, StatusKind, StatusTracker};

/// How many patterns a boss may weave at once.
pub const BOSS_MAX_ACTIVE_CASTS: usize = 2;

/// Spawn a boss at `position`, armed for its first phase.
pub fn spawn_boss(commands: &mut Commands, kind: BossKind, position: Vec2) -> Entity {
    let behavior = kind.behavior();
    let phases = behavior.phases();
    let first = &phases[0];

    let mut combatant = Combatant::new(Faction::Enemy, kind.stats());
    combatant.reset_hp(first.hp);

    let mut statuses = StatusTracker::default();
    if first.is_spell_card() {
        statuses.apply(StatusEffect {
            kind: StatusKind::CcImmune,
            remaining: f32::INFINITY,
            value: 0.0,
            source: None,
        });
    }

    let loadout = behavior.initial_loadout();
    commands
        .spawn((
            Name::new(kind.name()),
            combatant,
            SkillSet::new(
                ConcurrencyPolicy::ParallelWithPriority {
                    max_active: BOSS_MAX_ACTIVE_CASTS,
                },
                loadout,
            ),
            statuses,
            BossBrain::new(kind),
            PhaseController::new(phases),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}
