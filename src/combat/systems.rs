//! Combat System Ordering and Core Tick Systems
//!
//! The simulation is strictly single-threaded and ordering-sensitive.
//! Each tick runs in four chained phases:
//!
//! 1. **StatusAndTimers** - sim clock, status expiry, stun interrupts,
//!    cooldown/execution timers
//! 2. **SkillsAndMovement** - actor scripts, cast completion and
//!    projectile spawning, movement
//! 3. **Projectiles** - motion and the despawn policy
//! 4. **Resolution** - collision, damage, deaths, phase flow
//!
//! Both graphical and headless modes use `configure_combat_system_ordering`
//! plus `add_core_combat_systems`.

use bevy::prelude::*;

use crate::boss::behavior::tick_boss_brains;
use crate::boss::phase::{drive_phase_transitions, update_boss_phases, PhaseController};
use crate::projectile::{advance_projectiles, projectile_collision, spawn_skill_projectiles};

use super::components::{Combatant, Faction, GameRng, WorldBounds};
use super::events::CombatantDeathEvent;
use super::log::{CombatLog, CombatLogEventType};
use super::scripts::{tick_mob_scripts, tick_player_script};
use super::skill_config::{MotionSpec, SkillBook};
use super::skills::{ConcurrencyPolicy, SkillSet, SkillSlot};
use super::status::{StatusKind, StatusTracker};

/// System set labels for combat tick ordering.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSystemPhase {
    /// Sim clock, status effects, stun interrupts, skill timers.
    StatusAndTimers,
    /// Scripts, cast resolution, movement.
    SkillsAndMovement,
    /// Projectile motion and despawn policy.
    Projectiles,
    /// Collision, damage, deaths, boss phase flow.
    Resolution,
}

/// Configures the ordering between combat phases. Call once during app
/// setup, before adding combat systems.
pub fn configure_combat_system_ordering(app: &mut App) {
    app.configure_sets(
        Update,
        (
            CombatSystemPhase::StatusAndTimers,
            CombatSystemPhase::SkillsAndMovement,
            CombatSystemPhase::Projectiles,
            CombatSystemPhase::Resolution,
        )
            .chain(),
    );
}

/// Adds the core combat simulation systems. Both graphical and headless
/// modes need these; the run condition gates them to the active state.
pub fn add_core_combat_systems<M>(app: &mut App, run_condition: impl Condition<M> + Clone)
where
    M: 'static,
{
    app.add_systems(
        Update,
        (
            tick_sim_clock,
            update_status_effects,
            apply_stun_interrupts,
            tick_skill_timers,
        )
            .chain()
            .in_set(CombatSystemPhase::StatusAndTimers)
            .run_if(run_condition.clone()),
    );

    app.add_systems(
        Update,
        (
            tick_player_script,
            tick_mob_scripts,
            tick_boss_brains,
            process_casting,
            apply_movement,
        )
            .chain()
            .in_set(CombatSystemPhase::SkillsAndMovement)
            .run_if(run_condition.clone()),
    );

    app.add_systems(
        Update,
        advance_projectiles
            .in_set(CombatSystemPhase::Projectiles)
            .run_if(run_condition.clone()),
    );

    // Flush projectile spawns/despawns before collision runs.
    app.add_systems(
        Update,
        apply_deferred
            .after(CombatSystemPhase::Projectiles)
            .before(CombatSystemPhase::Resolution)
            .run_if(run_condition.clone()),
    );

    app.add_systems(
        Update,
        (
            projectile_collision,
            check_deaths,
            update_boss_phases,
            drive_phase_transitions,
        )
            .chain()
            .in_set(CombatSystemPhase::Resolution)
            .run_if(run_condition),
    );
}

/// Advance the combat log's notion of simulation time.
pub fn tick_sim_clock(time: Res<Time>, mut log: ResMut<CombatLog>) {
    log.sim_time += time.delta_secs();
}

/// Tick status timers and log expiries that gameplay cares about.
pub fn update_status_effects(
    time: Res<Time>,
    mut log: ResMut<CombatLog>,
    mut trackers: Query<(&mut StatusTracker, Option<&Name>)>,
) {
    let dt = time.delta_secs();
    for (mut tracker, name) in trackers.iter_mut() {
        let report = tracker.update(dt);
        if report.stun_expired {
            let label = name.map(|n| n.as_str()).unwrap_or("Combatant");
            log.log(
                CombatLogEventType::StatusExpired,
                format!("{} is no longer stunned", label),
            );
        }
    }
}

/// Stunned combatants stop moving and lose any cast in progress.
pub fn apply_stun_interrupts(
    book: Res<SkillBook>,
    mut log: ResMut<CombatLog>,
    mut combatants: Query<(&mut Combatant, &mut SkillSet, &StatusTracker, Option<&Name>)>,
) {
    for (mut combatant, mut skills, statuses, name) in combatants.iter_mut() {
        if !statuses.has(StatusKind::Stun) {
            continue;
        }
        combatant.velocity = Vec2::ZERO;
        let loadout = skills.loadout;
        if skills.interrupt_all(|slot| book.cooldown_for(loadout.skill(slot))) {
            let label = name.map(|n| n.as_str()).unwrap_or("Combatant");
            log.log(
                CombatLogEventType::Break,
                format!("{}'s cast broken by stun", label),
            );
        }
    }
}

/// Tick cooldown and execution timers on every slot. Execution windows
/// that close send the slot to cooldown at the skill's configured rate.
pub fn tick_skill_timers(
    time: Res<Time>,
    book: Res<SkillBook>,
    mut skill_sets: Query<&mut SkillSet>,
) {
    let dt = time.delta_secs();
    for mut skills in skill_sets.iter_mut() {
        let loadout = skills.loadout;
        for slot in SkillSlot::ALL {
            let state = skills.slot_mut(slot);
            state.update_cooldown(dt);
            if state.update_execution(dt) {
                state.complete(book.cooldown_for(loadout.skill(slot)));
            }
        }
    }
}

/// Tick cast timers; a cast that completes fires its volley and enters
/// its execution window.
pub fn process_casting(
    time: Res<Time>,
    book: Res<SkillBook>,
    mut commands: Commands,
    mut pool: ResMut<crate::projectile::ProjectilePool>,
    rng: ResMut<GameRng>,
    mut casters: Query<(Entity, &Transform, &Combatant, &mut SkillSet)>,
) {
    let dt = time.delta_secs();
    let rng = rng.into_inner();

    // Enemy homing projectiles seek the player.
    let player = casters
        .iter()
        .find(|(_, _, c, _)| c.faction == Faction::Player && c.is_active && c.is_alive())
        .map(|(e, ..)| e);

    for (entity, transform, combatant, mut skills) in casters.iter_mut() {
        if !combatant.is_active || !combatant.is_alive() {
            continue;
        }
        let origin = transform.translation.truncate();
        let loadout = skills.loadout;

        for slot in SkillSlot::ALL {
            let state = skills.slot_mut(slot);
            if !state.update_casting(dt) {
                continue;
            }
            let Some(skill) = loadout.skill(slot) else {
                debug_assert!(false, "casting slot without an assigned skill");
                continue;
            };
            let config = book.get_unchecked(skill);
            let aim = state.target_angle.unwrap_or(0.0);

            // Ring waves alternate spin direction unpredictably so the
            // pattern cannot be strafed on autopilot.
            if matches!(
                config.projectile.map(|p| p.motion),
                Some(MotionSpec::Ring { .. })
            ) {
                state.wave_sign = rng.random_sign();
            }
            let wave_sign = state.wave_sign;
            state.begin_execution(config.execution_time);

            let homing_target = match combatant.faction {
                Faction::Enemy => player,
                Faction::Player => None,
            };
            spawn_skill_projectiles(
                &mut commands,
                &mut pool,
                skill,
                config,
                entity,
                combatant.faction,
                origin,
                aim,
                wave_sign,
                homing_target,
            );
        }
    }
}

/// Apply movement intent: status multiplier, the exclusive skill-lock,
/// and arena bounds clamping.
pub fn apply_movement(
    time: Res<Time>,
    bounds: Res<WorldBounds>,
    mut movers: Query<(&mut Transform, &Combatant, &SkillSet, &StatusTracker)>,
) {
    let dt = time.delta_secs();
    for (mut transform, combatant, skills, statuses) in movers.iter_mut() {
        if !combatant.is_active || !combatant.is_alive() {
            continue;
        }
        // The exclusive policy is a whole-body commitment: no movement
        // while casting or executing.
        if skills.policy == ConcurrencyPolicy::Exclusive && skills.any_busy() {
            continue;
        }
        let multiplier = statuses.move_speed_multiplier();
        if multiplier <= 0.0 {
            continue;
        }
        let position = transform.translation.truncate() + combatant.velocity * multiplier * dt;
        let clamped = bounds.clamp(position);
        transform.translation = clamped.extend(transform.translation.z);
    }
}

/// Deactivate non-boss combatants whose HP reached zero. Boss death is
/// owned by the phase controller.
pub fn check_deaths(
    mut log: ResMut<CombatLog>,
    mut combatants: Query<
        (Entity, &mut Combatant, Option<&Name>),
        Without<PhaseController>,
    >,
    mut deaths: EventWriter<CombatantDeathEvent>,
) {
    for (entity, mut combatant, name) in combatants.iter_mut() {
        if !combatant.is_active || combatant.is_alive() {
            continue;
        }
        combatant.is_active = false;
        combatant.velocity = Vec2::ZERO;
        let label = name.map(|n| n.as_str()).unwrap_or("Combatant").to_string();
        log.log_death(label.clone(), format!("{} has fallen", label));
        deaths.send(CombatantDeathEvent {
            victim: entity,
            faction_label: match combatant.faction {
                Faction::Player => "Player",
                Faction::Enemy => "Enemy",
            },
        });
    }
}
