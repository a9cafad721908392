//! Mob Scripts
//!
//! Two trash-mob archetypes used by scenarios: the lunger closes to
//! melee and slashes, the spitter keeps its distance and lobs slowing
//! acid. Mobs run the same skill machinery as everything else, just
//! with single-skill loadouts and the exclusive policy.

use bevy::prelude::*;

use crate::combat::components::{Combatant, CombatantStats, Faction};
use crate::combat::log::{CombatLog, CombatLogEventType};
use crate::combat::skill_config::{SkillBook, SkillId};
use crate::combat::skills::{ConcurrencyPolicy, Loadout, SkillSet, SkillSlot};
use crate::combat::status::{StatusKind, StatusTracker};

const LUNGE_RANGE: f32 = 70.0;
const SPIT_STANDOFF: f32 = 250.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MobKind {
    Lunger,
    Spitter,
}

impl MobKind {
    pub fn name(self) -> &'static str {
        match self {
            MobKind::Lunger => "Lunger",
            MobKind::Spitter => "Spitter",
        }
    }

    pub fn parse(s: &str) -> Option<MobKind> {
        match s.to_ascii_lowercase().as_str() {
            "lunger" => Some(MobKind::Lunger),
            "spitter" => Some(MobKind::Spitter),
            _ => None,
        }
    }

    pub fn stats(self) -> CombatantStats {
        match self {
            MobKind::Lunger => CombatantStats {
                max_hp: 80,
                attack: 0,
                defense: 10,
                move_speed: 150.0,
                hitbox_radius: 14.0,
                crit_chance: 0.0,
            },
            MobKind::Spitter => CombatantStats {
                max_hp: 50,
                attack: 0,
                defense: 0,
                move_speed: 90.0,
                hitbox_radius: 12.0,
                crit_chance: 0.0,
            },
        }
    }

    pub fn loadout(self) -> Loadout {
        match self {
            MobKind::Lunger => Loadout::new(&[(SkillSlot::Primary, SkillId::LungeSlash)]),
            MobKind::Spitter => Loadout::new(&[(SkillSlot::Primary, SkillId::AcidSpit)]),
        }
    }
}

#[derive(Component, Clone, Copy, Debug)]
pub struct MobScript {
    pub kind: MobKind,
}

pub fn spawn_mob(commands: &mut Commands, kind: MobKind, position: Vec2) -> Entity {
    commands
        .spawn((
            Name::new(kind.name()),
            Combatant::new(Faction::Enemy, kind.stats()),
            SkillSet::new(ConcurrencyPolicy::Exclusive, kind.loadout()),
            StatusTracker::default(),
            MobScript { kind },
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

/// Per-tick mob decisions: approach/standoff movement and one cast
/// request when in position.
pub fn tick_mob_scripts(
    book: Res<SkillBook>,
    mut log: ResMut<CombatLog>,
    mut mobs: Query<(
        &Transform,
        &mut Combatant,
        &mut SkillSet,
        &StatusTracker,
        &MobScript,
        Option<&Name>,
    )>,
    players: Query<(&Transform, &Combatant), Without<MobScript>>,
) {
    let Some(player_pos) = players
        .iter()
        .find(|(_, c)| c.faction == Faction::Player && c.is_active && c.is_alive())
        .map(|(tf, _)| tf.translation.truncate())
    else {
        return;
    };

    for (transform, mut combatant, mut skills, statuses, script, name) in mobs.iter_mut() {
        if !combatant.is_active || !combatant.is_alive() {
            continue;
        }
        if statuses.has(StatusKind::Stun) {
            continue;
        }

        let position = transform.translation.truncate();
        let to_player = player_pos - position;
        let distance = to_player.length();
        let toward = to_player.normalize_or_zero();
        let speed = combatant.stats.move_speed;

        let (velocity, wants_cast) = match script.kind {
            MobKind::Lunger => {
                if distance > LUNGE_RANGE * 0.8 {
                    (toward * speed, distance <= LUNGE_RANGE)
                } else {
                    (Vec2::ZERO, true)
                }
            }
            MobKind::Spitter => {
                // Hold a standoff band, backing off when pressed.
                if distance > SPIT_STANDOFF + 40.0 {
                    (toward * speed, false)
                } else if distance < SPIT_STANDOFF - 40.0 {
                    (-toward * speed, true)
                } else {
                    (Vec2::ZERO, true)
                }
            }
        };
        combatant.velocity = velocity;

        if !wants_cast || statuses.has(StatusKind::Silence) {
            continue;
        }

        let Some(skill) = skills.loadout.skill(SkillSlot::Primary) else {
            continue;
        };
        let config = book.get_unchecked(skill);
        let aim = toward.to_angle();
        if skills.try_start(SkillSlot::Primary, config.cast_time, Some(aim)) {
            let label = name.map(|n| n.as_str()).unwrap_or("Mob");
            log.log(
                CombatLogEventType::SkillCast,
                format!("{} begins casting {}", label, config.name),
            );
        }
    }
}
