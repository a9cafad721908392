//! Projectile Lifecycle and Collision
//!
//! Projectiles are plain entities: a `Projectile` component plus a
//! `Transform`. They pierce, hitting each target at most once, and are
//! removed only by lifetime, homing-target loss, or the offscreen
//! despawn policy.
//!
//! Despawn policy: a bullet that has never entered the play area keeps
//! a spawn grace period so formations staged off-area can arrive; a
//! bullet that entered and then left must travel a minimum distance
//! past the boundary before it may be culled.

use bevy::prelude::*;
use smallvec::SmallVec;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::combat::components::{Combatant, Faction, GameRng, WorldBounds};
use crate::combat::constants::{CULL_MARGIN, OFFSCREEN_MIN_TRAVEL, OFFSCREEN_SPAWN_GRACE};
use crate::combat::damage::{crit_adjusted_raw, resolve_damage, roll_crit};
use crate::combat::events::{MobSkillHitEvent, SkillHitEvent};
use crate::combat::log::{CombatLog, CombatLogEventType};
use crate::combat::skill_config::{MotionSpec, OnHitEffect, SkillBook, SkillConfig, SkillId};
use crate::combat::skills::SkillSet;
use crate::combat::status::{StatusEffect, StatusSpec, StatusTracker};

use super::motion::{Motion, MotionStep};
use super::pool::ProjectilePool;
use super::shapes::HitShape;

/// A live skill projectile.
#[derive(Component, Debug)]
pub struct Projectile {
    pub skill: SkillId,
    pub faction: Faction,
    pub owner: Entity,
    pub shape: HitShape,
    /// Orientation of the hit shape / travel direction, radians.
    pub angle: f32,
    pub motion: Motion,
    /// Raw damage before crit and mitigation.
    pub damage: i32,
    pub can_crit: bool,
    pub status_payload: Option<StatusSpec>,
    pub on_hit: Option<OnHitEffect>,
    /// Targets already struck; each target is hit at most once.
    pub hit_targets: SmallVec<[Entity; 4]>,
    /// Age in seconds.
    pub elapsed: f32,
    pub max_lifetime: f32,
    /// Whether the bullet has been inside the play area at least once.
    pub entered_bounds: bool,
    /// Distance travelled since last leaving the play area.
    pub exit_travel: f32,
    pool_slot: usize,
}

/// Angles for one volley: either a centered fan of `spread` radians
/// about `aim`, or `count` directions evenly spaced around the circle.
pub fn volley_angles(aim: f32, count: u32, spread: f32, radial: bool) -> SmallVec<[f32; 8]> {
    let mut angles = SmallVec::new();
    if radial {
        for i in 0..count {
            angles.push(aim + i as f32 * TAU / count as f32);
        }
    } else if count <= 1 {
        angles.push(aim);
    } else {
        let step = spread / (count - 1) as f32;
        for i in 0..count {
            angles.push(aim - spread * 0.5 + i as f32 * step);
        }
    }
    angles
}

/// Spawn one volley of projectiles for a skill whose cast just
/// completed. Returns how many were actually spawned; shortfalls mean
/// the pool budget was exhausted and are not an error.
#[allow(clippy::too_many_arguments)]
pub fn spawn_skill_projectiles(
    commands: &mut Commands,
    pool: &mut ProjectilePool,
    skill: SkillId,
    config: &SkillConfig,
    owner: Entity,
    faction: Faction,
    origin: Vec2,
    aim_angle: f32,
    wave_sign: f32,
    homing_target: Option<Entity>,
) -> u32 {
    let Some(spec) = config.projectile else {
        return 0;
    };

    let lifetime = if spec.lifetime > 0.0 {
        spec.lifetime
    } else if spec.speed > 0.0 && spec.range > 0.0 {
        spec.range / spec.speed
    } else {
        // Fixed shapes (lasers) live for the skill's execution window.
        config.execution_time
    };

    let mut spawned = 0;
    for direction in volley_angles(aim_angle, spec.count, spec.spread, spec.radial) {
        let Some(pool_slot) = pool.acquire() else {
            continue;
        };

        let shape = HitShape::from_spec(spec.shape);
        let (position, angle, motion) = match spec.motion {
            MotionSpec::Straight => (
                origin,
                direction,
                Motion::Straight {
                    velocity: spec.speed * Vec2::from_angle(direction),
                },
            ),
            MotionSpec::Homing => match homing_target {
                Some(target) => (
                    origin,
                    direction,
                    Motion::Homing {
                        target,
                        speed: spec.speed,
                    },
                ),
                // No live target to seek: degrade to a straight shot.
                None => (
                    origin,
                    direction,
                    Motion::Straight {
                        velocity: spec.speed * Vec2::from_angle(direction),
                    },
                ),
            },
            MotionSpec::Ring {
                initial_radius,
                expansion_speed,
                rotation_speed,
            } => (
                origin + initial_radius * Vec2::from_angle(direction),
                direction,
                Motion::RingOrbit {
                    center: origin,
                    base_angle: direction,
                    initial_radius,
                    expansion_speed,
                    rotation_speed: rotation_speed * wave_sign,
                },
            ),
            MotionSpec::Fixed => {
                // Lasers extend from the caster: shift the rect center
                // half a length downrange and align local +y with the
                // firing direction.
                if let HitShape::Rect { half_height, .. } = shape {
                    (
                        origin + half_height * Vec2::from_angle(direction),
                        direction - FRAC_PI_2,
                        Motion::Fixed,
                    )
                } else {
                    (origin, direction, Motion::Fixed)
                }
            }
        };

        commands.spawn((
            Projectile {
                skill,
                faction,
                owner,
                shape,
                angle,
                motion,
                damage: config.damage,
                can_crit: config.can_crit,
                status_payload: config.status_payload,
                on_hit: config.on_hit,
                hit_targets: SmallVec::new(),
                elapsed: 0.0,
                max_lifetime: lifetime,
                entered_bounds: false,
                exit_travel: 0.0,
                pool_slot,
            },
            Transform::from_translation(position.extend(0.0)),
        ));
        spawned += 1;
    }
    spawned
}

/// Advance motion and lifetimes, applying the despawn policy.
pub fn advance_projectiles(
    time: Res<Time>,
    bounds: Res<WorldBounds>,
    mut pool: ResMut<ProjectilePool>,
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
    targets: Query<(&Transform, &Combatant), Without<Projectile>>,
) {
    let dt = time.delta_secs();

    for (entity, mut projectile, mut transform) in projectiles.iter_mut() {
        projectile.elapsed += dt;

        let target_pos = match projectile.motion {
            Motion::Homing { target, .. } => match targets.get(target) {
                Ok((tf, combatant)) if combatant.is_active && combatant.is_alive() => {
                    Some(tf.translation.truncate())
                }
                _ => None,
            },
            _ => None,
        };

        let mut position = transform.translation.truncate();
        let previous = position;
        let motion = projectile.motion;
        let elapsed = projectile.elapsed;
        let step = motion.advance(
            &mut position,
            &mut projectile.angle,
            elapsed,
            dt,
            target_pos,
        );

        if step == MotionStep::Expire || projectile.elapsed >= projectile.max_lifetime {
            pool.release(projectile.pool_slot);
            commands.entity(entity).despawn();
            continue;
        }

        if bounds.contains(position) {
            projectile.entered_bounds = true;
            projectile.exit_travel = 0.0;
        } else {
            let protected = if projectile.entered_bounds {
                projectile.exit_travel += position.distance(previous);
                projectile.exit_travel < OFFSCREEN_MIN_TRAVEL
            } else {
                projectile.elapsed < OFFSCREEN_SPAWN_GRACE
            };
            if !protected && bounds.far_outside(position, CULL_MARGIN) {
                pool.release(projectile.pool_slot);
                commands.entity(entity).despawn();
                continue;
            }
        }

        transform.translation = position.extend(0.0);
    }
}

struct PendingHit {
    target: Entity,
    owner: Entity,
    skill: SkillId,
    faction: Faction,
    raw: i32,
    can_crit: bool,
    payload: Option<StatusSpec>,
    on_hit: Option<OnHitEffect>,
}

fn faction_label(faction: Faction) -> &'static str {
    match faction {
        Faction::Player => "Player",
        Faction::Enemy => "Enemy",
    }
}

/// Test every live projectile against opposing combatants and resolve
/// first contact per target: mitigation, crit, cast break, status
/// payload, on-hit effects, events, and log entries.
///
/// Hits are collected first and applied second so the combatant query
/// is only borrowed mutably once per hit.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn projectile_collision(
    book: Res<SkillBook>,
    mut rng: ResMut<GameRng>,
    mut log: ResMut<CombatLog>,
    mut projectiles: Query<(&mut Projectile, &Transform)>,
    mut combatants: Query<
        (
            Entity,
            &mut Combatant,
            &mut SkillSet,
            &mut StatusTracker,
            &Transform,
            Option<&Name>,
        ),
        Without<Projectile>,
    >,
    mut skill_hits: EventWriter<SkillHitEvent>,
    mut mob_hits: EventWriter<MobSkillHitEvent>,
) {
    let mut pending: Vec<PendingHit> = Vec::new();

    for (mut projectile, transform) in projectiles.iter_mut() {
        let position = transform.translation.truncate();
        for (target_entity, combatant, _, _, target_transform, _) in combatants.iter() {
            if combatant.faction == projectile.faction
                || !combatant.is_active
                || !combatant.is_alive()
                || projectile.hit_targets.contains(&target_entity)
            {
                continue;
            }
            let target_pos = target_transform.translation.truncate();
            if projectile.shape.hits_circle(
                position,
                projectile.angle,
                target_pos,
                combatant.stats.hitbox_radius,
            ) {
                projectile.hit_targets.push(target_entity);
                pending.push(PendingHit {
                    target: target_entity,
                    owner: projectile.owner,
                    skill: projectile.skill,
                    faction: projectile.faction,
                    raw: projectile.damage,
                    can_crit: projectile.can_crit,
                    payload: projectile.status_payload,
                    on_hit: projectile.on_hit,
                });
            }
        }
    }

    for hit in pending {
        let owner_crit_chance = combatants
            .get(hit.owner)
            .map(|(_, c, ..)| c.stats.crit_chance)
            .unwrap_or(0.0);
        let is_crit = hit.faction == Faction::Player
            && hit.can_crit
            && roll_crit(owner_crit_chance, &mut rng);
        let raw = crit_adjusted_raw(hit.raw, is_crit);

        let Ok((_, mut target, mut target_skills, mut target_statuses, _, target_name)) =
            combatants.get_mut(hit.target)
        else {
            continue;
        };

        let damage = resolve_damage(raw, target.stats.defense);
        let actual = target.take_damage(damage);
        let killing_blow = !target.is_alive();
        let target_label = target_name
            .map(|n| n.as_str().to_string())
            .unwrap_or_else(|| faction_label(target.faction).to_string());

        let cc_immune = target_statuses.has(crate::combat::status::StatusKind::CcImmune);

        // A hit breaks casts still in their cast window; CC immunity
        // protects spell-card patterns from being chipped out.
        let mut did_break = false;
        if !cc_immune {
            let loadout = target_skills.loadout;
            did_break =
                target_skills.interrupt_all(|slot| book.cooldown_for(loadout.skill(slot)));
        }

        if let Some(payload) = hit.payload {
            if !(payload.kind.blocked_by_cc_immunity() && cc_immune) {
                target_statuses.apply(StatusEffect::from_spec(&payload, Some(hit.owner)));
                log.log(
                    CombatLogEventType::StatusApplied,
                    format!("{} afflicted by {}", target_label, payload.kind.name()),
                );
            }
        }

        let mut owner_label = faction_label(hit.faction).to_string();
        if let Ok((_, mut owner, mut owner_skills, _, _, owner_name)) =
            combatants.get_mut(hit.owner)
        {
            owner.damage_dealt += actual as i64;
            if let Some(name) = owner_name {
                owner_label = name.as_str().to_string();
            }
            if let Some(OnHitEffect::CooldownRefund { slot, amount }) = hit.on_hit {
                let state = owner_skills.slot_mut(slot);
                state.cooldown_remaining = (state.cooldown_remaining - amount).max(0.0);
                state.update_cooldown(0.0);
            }
        }

        let skill_name = book.get_unchecked(hit.skill).name.clone();

        match hit.faction {
            Faction::Player => {
                skill_hits.send(SkillHitEvent {
                    target: hit.target,
                    damage: actual,
                    did_break,
                    skill: hit.skill,
                    is_crit,
                });
            }
            Faction::Enemy => {
                mob_hits.send(MobSkillHitEvent {
                    damage: actual,
                    skill: hit.skill,
                    payload: hit.payload,
                });
            }
        }

        if did_break {
            log.log(
                CombatLogEventType::Break,
                format!("{}'s cast broken by {}", target_label, skill_name),
            );
        }

        let crit_tag = if is_crit { " (crit)" } else { "" };
        let message = format!(
            "{}'s {} hits {} for {}{}",
            owner_label, skill_name, target_label, actual, crit_tag
        );
        log.log_damage(
            owner_label,
            target_label,
            skill_name,
            actual,
            is_crit,
            killing_blow,
            message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_shot_fires_along_aim() {
        let angles = volley_angles(0.7, 1, 0.4, false);
        assert_eq!(angles.len(), 1);
        assert!((angles[0] - 0.7).abs() < 1e-6);
    }

    #[test]
    fn fan_is_centered_on_aim() {
        let angles = volley_angles(0.0, 3, 0.6, false);
        assert_eq!(angles.len(), 3);
        assert!((angles[0] + 0.3).abs() < 1e-6);
        assert!((angles[1]).abs() < 1e-6);
        assert!((angles[2] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn radial_volley_spans_full_circle() {
        let angles = volley_angles(0.0, 8, 0.0, true);
        assert_eq!(angles.len(), 8);
        let step = TAU / 8.0;
        for (i, angle) in angles.iter().enumerate() {
            assert!((angle - i as f32 * step).abs() < 1e-5);
        }
    }
}
