//! Scripted Player
//!
//! Stands in for human input in headless runs: weaves along the bottom
//! of the arena and keeps pressure up with auto-shots, switching to the
//! spread volley against groups and the point-blank nova when mobs
//! crowd in. Runs the exclusive skill-lock policy, so it stops moving
//! while a cast or execution is in flight.

use bevy::prelude::*;

use crate::combat::components::{Combatant, CombatantStats, Faction};
use crate::combat::log::{CombatLog, CombatLogEventType};
use crate::combat::skill_config::{SkillBook, SkillId};
use crate::combat::skills::{ConcurrencyPolicy, Loadout, SkillSet, SkillSlot};
use crate::combat::status::{StatusKind, StatusTracker};

const HOLD_LINE_Y: f32 = -200.0;
const NOVA_RANGE: f32 = 140.0;

/// Marker plus weave tuning for the scripted player.
#[derive(Component, Clone, Debug)]
pub struct PlayerScript {
    pub strafe_amplitude: f32,
    pub strafe_rate: f32,
}

impl Default for PlayerScript {
    fn default() -> Self {
        Self {
            strafe_amplitude: 240.0,
            strafe_rate: 0.9,
        }
    }
}

pub fn player_loadout() -> Loadout {
    Loadout::new(&[
        (SkillSlot::Primary, SkillId::AutoShot),
        (SkillSlot::Secondary, SkillId::SpreadShot),
        (SkillSlot::Tertiary, SkillId::NovaPulse),
    ])
}

/// Spawn the scripted player with the standard three-skill loadout.
pub fn spawn_player(commands: &mut Commands, stats: CombatantStats, position: Vec2) -> Entity {
    commands
        .spawn((
            Name::new("Player"),
            Combatant::new(Faction::Player, stats),
            SkillSet::new(ConcurrencyPolicy::Exclusive, player_loadout()),
            StatusTracker::default(),
            PlayerScript::default(),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

/// Per-tick player decisions: weave intent plus one cast request.
pub fn tick_player_script(
    book: Res<SkillBook>,
    mut log: ResMut<CombatLog>,
    mut players: Query<(
        &Transform,
        &mut Combatant,
        &mut SkillSet,
        &StatusTracker,
        &PlayerScript,
    )>,
    enemies: Query<(&Transform, &Combatant), Without<PlayerScript>>,
) {
    let sim_time = log.sim_time;

    for (transform, mut combatant, mut skills, statuses, script) in players.iter_mut() {
        if !combatant.is_active || !combatant.is_alive() {
            continue;
        }
        if statuses.has(StatusKind::Stun) {
            continue;
        }

        let position = transform.translation.truncate();

        let target_x = (sim_time * script.strafe_rate).sin() * script.strafe_amplitude;
        let goal = Vec2::new(target_x, HOLD_LINE_Y);
        combatant.velocity = (goal - position).clamp_length_max(1.0) * combatant.stats.move_speed;

        if statuses.has(StatusKind::Silence) {
            continue;
        }

        // Nearest live enemy is both the aim point and the range gauge.
        let mut nearest: Option<(Vec2, f32)> = None;
        let mut live_enemies = 0;
        for (enemy_tf, enemy) in enemies.iter() {
            if enemy.faction != Faction::Enemy || !enemy.is_active || !enemy.is_alive() {
                continue;
            }
            live_enemies += 1;
            let enemy_pos = enemy_tf.translation.truncate();
            let distance = enemy_pos.distance(position);
            if nearest.is_none_or(|(_, d)| distance < d) {
                nearest = Some((enemy_pos, distance));
            }
        }
        let Some((aim_pos, aim_distance)) = nearest else {
            continue;
        };
        let aim = (aim_pos - position).to_angle();

        let slot = if aim_distance < NOVA_RANGE {
            SkillSlot::Tertiary
        } else if live_enemies >= 2 {
            SkillSlot::Secondary
        } else {
            SkillSlot::Primary
        };

        for candidate in [slot, SkillSlot::Primary] {
            let Some(skill) = skills.loadout.skill(candidate) else {
                continue;
            };
            let config = book.get_unchecked(skill);
            if skills.try_start(candidate, config.cast_time, Some(aim)) {
                log.log(
                    CombatLogEventType::SkillCast,
                    format!("Player begins casting {}", config.name),
                );
                break;
            }
        }
    }
}
