//! Integration tests for boss phase sequencing
//!
//! These tests verify that:
//! - Depleting a phase holds the boss in a transition window
//! - The next phase arms with fresh HP, loadout, and spell-card immunity
//! - Depleting the final phase defeats the boss
//! - A malformed phase table force-kills instead of leaving the boss
//!   unkillable

use bevy::ecs::world::CommandQueue;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use bossrush::boss::{
    spawn_boss, BossBrain, BossKind, BossPhase, PhaseController, PhaseFlow, PhaseKind,
};
use bossrush::combat::components::{Combatant, Faction, GameRng, WorldBounds};
use bossrush::combat::constants::{PHASE_TRANSITION_DELAY, SIM_DT};
use bossrush::combat::events::{CombatantDeathEvent, PhaseCompleteEvent, PhaseStartEvent};
use bossrush::combat::skills::{ConcurrencyPolicy, Loadout, SkillSet};
use bossrush::combat::status::{StatusKind, StatusTracker};
use bossrush::combat::{systems, CombatPlugin};

// =============================================================================
// Harness
// =============================================================================

fn test_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(TransformPlugin)
        .add_plugins(HierarchyPlugin)
        .add_plugins(CombatPlugin)
        .insert_resource(WorldBounds::from_half_extents(400.0, 300.0))
        .insert_resource(GameRng::from_seed(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            SIM_DT as f64,
        )));
    systems::configure_combat_system_ordering(&mut app);
    systems::add_core_combat_systems(&mut app, || true);
    // First update initializes Time with a zero delta.
    app.update();
    app
}

fn with_commands<R>(app: &mut App, f: impl FnOnce(&mut Commands) -> R) -> R {
    let world = app.world_mut();
    let mut queue = CommandQueue::default();
    let result = {
        let mut commands = Commands::new(&mut queue, world);
        f(&mut commands)
    };
    queue.apply(world);
    result
}

fn drain_events<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut()
        .resource_mut::<Events<E>>()
        .drain()
        .collect()
}

fn set_hp(app: &mut App, entity: Entity, hp: i32) {
    app.world_mut()
        .get_mut::<Combatant>(entity)
        .unwrap()
        .current_hp = hp;
}

fn flow(app: &App, entity: Entity) -> PhaseFlow {
    app.world().get::<PhaseController>(entity).unwrap().flow
}

// Enough updates to cross PHASE_TRANSITION_DELAY, with slack.
fn transition_ticks() -> usize {
    (PHASE_TRANSITION_DELAY / SIM_DT).ceil() as usize + 3
}

// =============================================================================
// Transition Flow Tests
// =============================================================================

#[test]
fn test_phase_depletion_holds_in_transition() {
    let mut app = test_app(11);
    let boss = with_commands(&mut app, |commands| {
        spawn_boss(commands, BossKind::FrostRevenant, Vec2::new(0.0, 160.0))
    });
    drain_events::<PhaseCompleteEvent>(&mut app);

    set_hp(&mut app, boss, 0);
    app.update();

    assert!(matches!(flow(&app, boss), PhaseFlow::Transitioning { .. }));
    let completes = drain_events::<PhaseCompleteEvent>(&mut app);
    assert_eq!(completes.len(), 1);
    assert_eq!(completes[0].completed_phase_index, 0);
    assert_eq!(completes[0].next_phase_index, 1);

    // Mid-window the boss holds: index unchanged, HP not yet reset.
    for _ in 0..30 {
        app.update();
    }
    let controller = app.world().get::<PhaseController>(boss).unwrap();
    assert!(matches!(controller.flow, PhaseFlow::Transitioning { .. }));
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.phases_cleared(), 1);
    assert!(app.world().get::<Combatant>(boss).unwrap().current_hp <= 0);
}

#[test]
fn test_next_phase_arms_after_transition_window() {
    let mut app = test_app(12);
    let boss = with_commands(&mut app, |commands| {
        spawn_boss(commands, BossKind::FrostRevenant, Vec2::new(0.0, 160.0))
    });
    let phase1_hp = {
        let controller = app.world().get::<PhaseController>(boss).unwrap();
        controller.phase(1).unwrap().hp
    };

    set_hp(&mut app, boss, 0);
    // Events only live for two frames; collect them as the window runs.
    let mut starts = Vec::new();
    for _ in 0..transition_ticks() {
        app.update();
        starts.extend(drain_events::<PhaseStartEvent>(&mut app));
    }

    let controller = app.world().get::<PhaseController>(boss).unwrap();
    assert_eq!(controller.flow, PhaseFlow::Fighting);
    assert_eq!(controller.current_index(), 1);

    let combatant = app.world().get::<Combatant>(boss).unwrap();
    assert_eq!(combatant.current_hp, phase1_hp, "fresh HP pool");
    assert_eq!(combatant.stats.max_hp, phase1_hp);

    // Frost Revenant's second phase is a spell card: CC-immune.
    let statuses = app.world().get::<StatusTracker>(boss).unwrap();
    assert!(statuses.has(StatusKind::CcImmune));

    let armed = starts
        .iter()
        .find(|e| e.phase_index == 1)
        .expect("phase 1 start event");
    assert!(armed.is_spell_card);
    assert_eq!(armed.boss, boss);
}

#[test]
fn test_loadout_swaps_on_phase_change() {
    let mut app = test_app(13);
    let boss = with_commands(&mut app, |commands| {
        spawn_boss(commands, BossKind::FrostRevenant, Vec2::new(0.0, 160.0))
    });
    let behavior = BossKind::FrostRevenant.behavior();
    let initial = app.world().get::<SkillSet>(boss).unwrap().loadout;
    assert_eq!(initial, behavior.initial_loadout());

    set_hp(&mut app, boss, 0);
    for _ in 0..transition_ticks() {
        app.update();
    }

    let swapped = app.world().get::<SkillSet>(boss).unwrap().loadout;
    assert_eq!(swapped, behavior.on_phase_change(1));
    assert_ne!(swapped, initial);
}

// =============================================================================
// Defeat Tests
// =============================================================================

#[test]
fn test_final_phase_depletion_defeats_boss() {
    let mut app = test_app(14);
    let boss = with_commands(&mut app, |commands| {
        spawn_boss(commands, BossKind::FrostRevenant, Vec2::new(0.0, 160.0))
    });

    // Clear phase 0 and wait out the transition.
    set_hp(&mut app, boss, 0);
    for _ in 0..transition_ticks() {
        app.update();
    }
    assert_eq!(flow(&app, boss), PhaseFlow::Fighting);
    drain_events::<CombatantDeathEvent>(&mut app);

    // Deplete the final phase.
    set_hp(&mut app, boss, 0);
    app.update();

    assert_eq!(flow(&app, boss), PhaseFlow::Defeated);
    let combatant = app.world().get::<Combatant>(boss).unwrap();
    assert!(!combatant.is_active);

    let deaths = drain_events::<CombatantDeathEvent>(&mut app);
    assert_eq!(deaths.len(), 1);
    assert_eq!(deaths[0].victim, boss);

    let controller = app.world().get::<PhaseController>(boss).unwrap();
    assert_eq!(controller.phases_cleared(), controller.phase_count());
}

#[test]
fn test_missing_next_phase_forces_death() {
    let mut app = test_app(15);

    // A one-phase table whose controller claims a transition is pending:
    // there is no phase 1 to arm.
    let mut controller = PhaseController::new(vec![BossPhase {
        name: "Only Phase",
        kind: PhaseKind::Normal,
        hp: 400,
    }]);
    controller.flow = PhaseFlow::Transitioning {
        elapsed: PHASE_TRANSITION_DELAY,
    };

    let mut combatant = Combatant::new(Faction::Enemy, BossKind::FrostRevenant.stats());
    combatant.reset_hp(400);

    let boss = with_commands(&mut app, |commands| {
        commands
            .spawn((
                Name::new("Malformed"),
                combatant,
                SkillSet::new(
                    ConcurrencyPolicy::ParallelWithPriority { max_active: 2 },
                    Loadout::default(),
                ),
                StatusTracker::default(),
                BossBrain::new(BossKind::FrostRevenant),
                controller,
                Transform::default(),
            ))
            .id()
    });

    app.update();

    assert_eq!(flow(&app, boss), PhaseFlow::Defeated);
    assert!(!app.world().get::<Combatant>(boss).unwrap().is_active);
    let deaths = drain_events::<CombatantDeathEvent>(&mut app);
    assert_eq!(deaths.len(), 1);
    assert_eq!(deaths[0].victim, boss);
}

// =============================================================================
// Spawn State Tests
// =============================================================================

#[test]
fn test_spawned_boss_is_armed_for_first_phase() {
    let mut app = test_app(16);
    let boss = with_commands(&mut app, |commands| {
        spawn_boss(commands, BossKind::FrostRevenant, Vec2::new(0.0, 160.0))
    });

    let controller = app.world().get::<PhaseController>(boss).unwrap();
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.flow, PhaseFlow::Fighting);
    assert_eq!(controller.phase_count(), 2);

    let combatant = app.world().get::<Combatant>(boss).unwrap();
    assert_eq!(combatant.faction, Faction::Enemy);
    assert_eq!(combatant.current_hp, controller.current_phase().hp);

    // Phase 0 is a normal phase: no CC immunity yet.
    let statuses = app.world().get::<StatusTracker>(boss).unwrap();
    assert!(!statuses.has(StatusKind::CcImmune));
}
