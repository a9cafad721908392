//! Boss Behavior Strategies
//!
//! Each boss is a data-driven strategy behind the `BossBehavior` trait:
//! a phase table, a loadout per phase, and a per-tick decision function
//! returning movement intent plus the slots it wants to cast. The brain
//! never mutates the skill machine directly; requested casts go through
//! priority arbitration and the slot machinery's own gating.

use bevy::prelude::*;
use smallvec::SmallVec;

use crate::combat::components::{Combatant, GameRng};
use crate::combat::skill_config::SkillBook;
use crate::combat::skills::{SkillSet, SkillSlot};
use crate::combat::status::{StatusKind, StatusTracker};

use super::bosses::{EmberSentinel, FrostRevenant};
use super::phase::{BossPhase, PhaseController};
use crate::combat::skills::Loadout;

/// What a boss brain sees each tick.
pub struct BossTickContext<'a> {
    pub time: f32,
    pub dt: f32,
    pub self_pos: Vec2,
    /// Live player position, if the player is still up.
    pub player_pos: Option<Vec2>,
    pub hp_fraction: f32,
    pub phase_index: usize,
    pub rng: &'a mut GameRng,
}

impl BossTickContext<'_> {
    /// Angle from the boss toward the player, falling back to straight
    /// down the arena when there is no target.
    pub fn aim_at_player(&self) -> f32 {
        match self.player_pos {
            Some(player) => (player - self.self_pos).to_angle(),
            None => -std::f32::consts::FRAC_PI_2,
        }
    }
}

/// What a boss brain decided this tick.
#[derive(Default)]
pub struct BossTickOutput {
    /// Slots the brain wants to start casting, before arbitration.
    pub casts: SmallVec<[SkillSlot; 4]>,
    pub velocity: Vec2,
}

/// Strategy interface for one boss. One implementation per boss,
/// selected through `BossKind`.
pub trait BossBehavior: Send + Sync {
    fn phases(&self) -> Vec<BossPhase>;
    fn initial_loadout(&self) -> Loadout;
    fn on_phase_change(&self, phase_index: usize) -> Loadout;
    fn tick(&self, ctx: &mut BossTickContext) -> BossTickOutput;
}

/// The roster. Adding a boss means adding a variant here and a
/// `BossBehavior` impl next to the others.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BossKind {
    FrostRevenant,
    EmberSentinel,
}

impl BossKind {
    pub fn behavior(self) -> Box<dyn BossBehavior> {
        match self {
            BossKind::FrostRevenant => Box::new(FrostRevenant),
            BossKind::EmberSentinel => Box::new(EmberSentinel),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BossKind::FrostRevenant => "Frost Revenant",
            BossKind::EmberSentinel => "Ember Sentinel",
        }
    }

    /// Base stat block. Per-phase HP pools come from the phase table;
    /// the HP here is overwritten on spawn.
    pub fn stats(self) -> crate::combat::components::CombatantStats {
        use crate::combat::components::CombatantStats;
        match self {
            BossKind::FrostRevenant => CombatantStats {
                max_hp: 1,
                attack: 0,
                defense: 40,
                move_speed: 80.0,
                hitbox_radius: 28.0,
                crit_chance: 0.0,
            },
            BossKind::EmberSentinel => CombatantStats {
                max_hp: 1,
                attack: 0,
                defense: 25,
                move_speed: 110.0,
                hitbox_radius: 24.0,
                crit_chance: 0.0,
            },
        }
    }

    pub fn parse(s: &str) -> Option<BossKind> {
        match s.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "frost_revenant" => Some(BossKind::FrostRevenant),
            "ember_sentinel" => Some(BossKind::EmberSentinel),
            _ => None,
        }
    }
}

/// The strategy attached to a boss entity.
#[derive(Component)]
pub struct BossBrain {
    pub kind: BossKind,
    pub behavior: Box<dyn BossBehavior>,
}

impl BossBrain {
    pub fn new(kind: BossKind) -> Self {
        Self {
            kind,
            behavior: kind.behavior(),
        }
    }
}

/// Run each fighting boss's brain: apply its movement intent and feed
/// its cast requests through priority arbitration into the skill slots.
pub fn tick_boss_brains(
    time: Res<Time>,
    book: Res<SkillBook>,
    rng: ResMut<GameRng>,
    mut log: ResMut<crate::combat::log::CombatLog>,
    mut bosses: Query<(
        &Transform,
        &mut Combatant,
        &mut SkillSet,
        &StatusTracker,
        &BossBrain,
        &PhaseController,
        Option<&Name>,
    )>,
    players: Query<(&Transform, &Combatant), Without<BossBrain>>,
) {
    let dt = time.delta_secs();
    let sim_time = log.sim_time;
    let rng = rng.into_inner();

    let player_pos = players
        .iter()
        .find(|(_, c)| c.faction == crate::combat::components::Faction::Player && c.is_alive())
        .map(|(tf, _)| tf.translation.truncate());

    for (transform, mut combatant, mut skills, statuses, brain, controller, name) in
        bosses.iter_mut()
    {
        if !combatant.is_active || !controller.is_fighting() {
            continue;
        }
        // Stunned bosses neither move nor act; the interrupt system has
        // already broken their casts.
        if statuses.has(StatusKind::Stun) {
            continue;
        }

        let mut ctx = BossTickContext {
            time: sim_time,
            dt,
            self_pos: transform.translation.truncate(),
            player_pos,
            hp_fraction: combatant.hp_fraction(),
            phase_index: controller.current_index(),
            rng: &mut *rng,
        };
        let output = brain.behavior.tick(&mut ctx);
        let aim = ctx.aim_at_player();

        combatant.velocity = output.velocity;

        if statuses.has(StatusKind::Silence) {
            continue;
        }

        // Highest configured priority first; the policy cap and slot
        // state decide what is actually admitted.
        let mut requests: SmallVec<[(SkillSlot, i32); 4]> = output
            .casts
            .into_iter()
            .filter_map(|slot| {
                let skill = skills.loadout.skill(slot)?;
                Some((slot, book.get_unchecked(skill).priority))
            })
            .collect();
        requests.sort_by_key(|&(_, priority)| std::cmp::Reverse(priority));

        for (slot, _) in requests {
            let skill = match skills.loadout.skill(slot) {
                Some(skill) => skill,
                None => continue,
            };
            let config = book.get_unchecked(skill);
            if skills.try_start(slot, config.cast_time, Some(aim)) {
                let label = name.map(|n| n.as_str()).unwrap_or("Boss");
                log.log(
                    crate::combat::log::CombatLogEventType::SkillCast,
                    format!("{} begins casting {}", label, config.name),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_phases_and_matching_loadouts() {
        for kind in [BossKind::FrostRevenant, BossKind::EmberSentinel] {
            let behavior = kind.behavior();
            let phases = behavior.phases();
            assert!(phases.len() >= 2, "{} needs multiple phases", kind.name());
            // Final phase is a spell card for both bosses.
            assert!(phases.last().unwrap().is_spell_card());
            for index in 0..phases.len() {
                let loadout = behavior.on_phase_change(index);
                assert!(
                    loadout.slots.iter().any(|s| s.is_some()),
                    "{} phase {} has an empty loadout",
                    kind.name(),
                    index
                );
            }
            assert_eq!(behavior.initial_loadout(), behavior.on_phase_change(0));
        }
    }

    #[test]
    fn parse_accepts_common_spellings() {
        assert_eq!(BossKind::parse("frost_revenant"), Some(BossKind::FrostRevenant));
        assert_eq!(BossKind::parse("Frost Revenant"), Some(BossKind::FrostRevenant));
        assert_eq!(BossKind::parse("ember-sentinel"), Some(BossKind::EmberSentinel));
        assert_eq!(BossKind::parse("onyx_warden"), None);
    }
}
