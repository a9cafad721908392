//! Boss Phase Control
//!
//! A boss is a sequence of phases, each with its own HP pool and skill
//! loadout. Phase index only ever advances. When a phase's HP runs out
//! the boss holds in a transition window (the presentation layer's
//! cutscene slot) before the next phase arms; depleting the final phase
//! defeats the boss.

use bevy::prelude::*;

use crate::combat::components::Combatant;
use crate::combat::constants::PHASE_TRANSITION_DELAY;
use crate::combat::events::{CombatantDeathEvent, PhaseCompleteEvent, PhaseStartEvent};
use crate::combat::log::CombatLog;
use crate::combat::skill_config::SkillBook;
use crate::combat::skills::SkillSet;
use crate::combat::status::{StatusEffect, StatusKind, StatusTracker};

use super::behavior::BossBrain;

/// Whether a phase is a spell card. Spell-card phases are CC-immune so
/// their patterns cannot be chipped out by cast breaks.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PhaseKind {
    Normal,
    SpellCard,
}

/// Static description of one boss phase.
#[derive(Clone, Debug)]
pub struct BossPhase {
    pub name: &'static str,
    pub kind: PhaseKind,
    pub hp: i32,
}

impl BossPhase {
    pub fn is_spell_card(&self) -> bool {
        self.kind == PhaseKind::SpellCard
    }
}

/// Where the boss currently is in its phase sequence.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PhaseFlow {
    Fighting,
    /// Current phase's HP is spent; waiting out the transition window
    /// before the next phase arms.
    Transitioning { elapsed: f32 },
    Defeated,
}

/// Per-boss phase sequencer. The phase index is monotonic.
#[derive(Component, Debug)]
pub struct PhaseController {
    phases: Vec<BossPhase>,
    current: usize,
    pub flow: PhaseFlow,
}

impl PhaseController {
    pub fn new(phases: Vec<BossPhase>) -> Self {
        debug_assert!(!phases.is_empty(), "boss needs at least one phase");
        Self {
            phases,
            current: 0,
            flow: PhaseFlow::Fighting,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_phase(&self) -> &BossPhase {
        &self.phases[self.current]
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    pub fn phase(&self, index: usize) -> Option<&BossPhase> {
        self.phases.get(index)
    }

    pub fn on_final_phase(&self) -> bool {
        self.current + 1 >= self.phases.len()
    }

    /// Phases fully cleared so far (for scenario reports).
    pub fn phases_cleared(&self) -> usize {
        match self.flow {
            PhaseFlow::Fighting => self.current,
            PhaseFlow::Transitioning { .. } => self.current + 1,
            PhaseFlow::Defeated => self.phases.len(),
        }
    }

    /// Advance to the next phase index. Only the transition driver may
    /// call this; the index never moves backwards.
    fn advance(&mut self) {
        self.current += 1;
    }

    pub fn is_fighting(&self) -> bool {
        self.flow == PhaseFlow::Fighting
    }
}

/// Detect phase HP depletion. A non-final phase emits `PhaseComplete`
/// and holds (HP and skills are not touched yet); the final phase
/// defeats the boss.
pub fn update_boss_phases(
    book: Res<SkillBook>,
    mut log: ResMut<CombatLog>,
    mut bosses: Query<(
        Entity,
        &mut Combatant,
        &mut PhaseController,
        &mut SkillSet,
        Option<&Name>,
    )>,
    mut phase_complete: EventWriter<PhaseCompleteEvent>,
    mut deaths: EventWriter<CombatantDeathEvent>,
) {
    for (entity, mut combatant, mut controller, mut skills, name) in bosses.iter_mut() {
        if !controller.is_fighting() || !combatant.is_active || combatant.current_hp > 0 {
            continue;
        }

        let label = name.map(|n| n.as_str()).unwrap_or("Boss").to_string();
        combatant.velocity = Vec2::ZERO;
        let loadout = skills.loadout;
        skills.interrupt_all(|slot| book.cooldown_for(loadout.skill(slot)));

        if controller.on_final_phase() {
            controller.flow = PhaseFlow::Defeated;
            combatant.is_active = false;
            log.log_death(label.clone(), format!("{} has been defeated", label));
            deaths.send(CombatantDeathEvent {
                victim: entity,
                faction_label: "Enemy",
            });
        } else {
            let completed = controller.current_index();
            controller.flow = PhaseFlow::Transitioning { elapsed: 0.0 };
            log.log_phase(
                completed,
                controller.current_phase().name.to_string(),
                format!("{} phase {} complete", label, completed),
            );
            phase_complete.send(PhaseCompleteEvent {
                boss: entity,
                completed_phase_index: completed,
                next_phase_index: completed + 1,
            });
        }
    }
}

/// Drive the transition window and arm the next phase: reset HP to the
/// new pool, swap the loadout, clear status, and re-apply spell-card CC
/// immunity. A missing next phase is a malformed phase table; the boss
/// is force-killed rather than left unkillable.
pub fn drive_phase_transitions(
    time: Res<Time>,
    mut log: ResMut<CombatLog>,
    mut bosses: Query<(
        Entity,
        &mut Combatant,
        &mut PhaseController,
        &mut SkillSet,
        &mut StatusTracker,
        &BossBrain,
        Option<&Name>,
    )>,
    mut phase_start: EventWriter<PhaseStartEvent>,
    mut deaths: EventWriter<CombatantDeathEvent>,
) {
    let dt = time.delta_secs();

    for (entity, mut combatant, mut controller, mut skills, mut statuses, brain, name) in
        bosses.iter_mut()
    {
        let PhaseFlow::Transitioning { elapsed } = controller.flow else {
            continue;
        };
        let elapsed = elapsed + dt;
        if elapsed < PHASE_TRANSITION_DELAY {
            controller.flow = PhaseFlow::Transitioning { elapsed };
            continue;
        }

        let label = name.map(|n| n.as_str()).unwrap_or("Boss").to_string();
        let next = controller.current_index() + 1;

        if controller.phase(next).is_none() {
            warn!(
                "{} has no phase {} to transition into; forcing death",
                label, next
            );
            controller.flow = PhaseFlow::Defeated;
            combatant.is_active = false;
            log.log_death(label.clone(), format!("{} collapsed (no next phase)", label));
            deaths.send(CombatantDeathEvent {
                victim: entity,
                faction_label: "Enemy",
            });
            continue;
        }

        controller.advance();
        let (phase_name, phase_hp, spell_card) = {
            let phase = controller.current_phase();
            (phase.name, phase.hp, phase.is_spell_card())
        };

        combatant.reset_hp(phase_hp);
        skills.assign(brain.behavior.on_phase_change(controller.current_index()));
        statuses.clear();
        if spell_card {
            statuses.apply(StatusEffect {
                kind: StatusKind::CcImmune,
                remaining: f32::INFINITY,
                value: 0.0,
                source: None,
            });
        }
        controller.flow = PhaseFlow::Fighting;

        log.log_phase(
            controller.current_index(),
            phase_name.to_string(),
            format!("{} begins {}", label, phase_name),
        );
        phase_start.send(PhaseStartEvent {
            boss: entity,
            phase_index: controller.current_index(),
            phase_name: phase_name.to_string(),
            is_spell_card: spell_card,
        });
    }
}
