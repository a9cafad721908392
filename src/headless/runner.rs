//! Headless scenario execution
//!
//! Runs one boss fight to completion without graphics, on a fixed
//! 60 Hz timestep driven manually so runs are deterministic under a
//! seed. Produces a `FightResult` for programmatic use and writes the
//! combat log to JSON.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::boss::{spawn_boss, PhaseController, PhaseFlow};
use crate::combat::components::{Combatant, Faction, GameRng, WorldBounds};
use crate::combat::constants::SIM_DT;
use crate::combat::events::{PhaseCompleteEvent, PhaseStartEvent};
use crate::combat::log::{CombatLog, CombatLogEventType, FightMetadata};
use crate::combat::scripts::{spawn_mob, spawn_player};
use crate::combat::systems::{self, CombatSystemPhase};
use crate::combat::CombatPlugin;
use crate::projectile::ProjectilePool;

use super::config::ScenarioConfig;

/// How a scenario ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightOutcome {
    BossDefeated,
    PlayerDefeated,
    Timeout,
}

impl FightOutcome {
    pub fn label(self) -> &'static str {
        match self {
            FightOutcome::BossDefeated => "boss_defeated",
            FightOutcome::PlayerDefeated => "player_defeated",
            FightOutcome::Timeout => "timeout",
        }
    }
}

/// Per-combatant statistics at scenario end.
#[derive(Debug, Clone)]
pub struct CombatantReport {
    pub name: String,
    pub faction: Faction,
    pub max_hp: i32,
    pub final_hp: i32,
    pub survived: bool,
    pub damage_dealt: i64,
    pub damage_taken: i64,
}

/// Result of a completed headless scenario.
#[derive(Debug, Clone)]
pub struct FightResult {
    pub outcome: FightOutcome,
    /// Simulation seconds from start to the ending condition.
    pub duration: f32,
    pub phases_cleared: usize,
    pub reports: Vec<CombatantReport>,
    pub random_seed: Option<u64>,
}

/// Resource tracking headless scenario state.
#[derive(Resource)]
pub struct HeadlessState {
    pub max_duration: f32,
    pub elapsed: f32,
    pub output_path: Option<String>,
    pub scenario_name: String,
    pub boss_name: String,
    pub random_seed: Option<u64>,
    pub complete: bool,
    pub result: Option<FightResult>,
}

/// Plugin wiring one scenario into a headless app.
pub struct HeadlessPlugin {
    pub config: ScenarioConfig,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        let boss_kind = self
            .config
            .boss_kind()
            .expect("Invalid scenario configuration");

        app.insert_resource(HeadlessState {
            max_duration: self.config.max_duration_secs,
            elapsed: 0.0,
            output_path: self.config.output_path.clone(),
            scenario_name: self.config.scenario_name.clone(),
            boss_name: boss_kind.name().to_string(),
            random_seed: self.config.random_seed,
            complete: false,
            result: None,
        })
        .insert_resource(WorldBounds::from_half_extents(
            self.config.arena_half_width,
            self.config.arena_half_height,
        ))
        .insert_resource(ProjectilePool::with_capacity(
            self.config.projectile_capacity,
        ))
        .insert_resource(HeadlessScenario {
            config: self.config.clone(),
        });

        systems::configure_combat_system_ordering(app);
        systems::add_core_combat_systems(app, || true);

        app.add_systems(Startup, headless_setup_scenario).add_systems(
            Update,
            (headless_announce_phases, headless_check_end)
                .chain()
                .after(CombatSystemPhase::Resolution),
        );
    }
}

/// The scenario being run, kept around for setup.
#[derive(Resource)]
struct HeadlessScenario {
    config: ScenarioConfig,
}

fn headless_setup_scenario(
    mut commands: Commands,
    scenario: Res<HeadlessScenario>,
    state: Res<HeadlessState>,
    mut log: ResMut<CombatLog>,
    mut phase_start: EventWriter<PhaseStartEvent>,
) {
    let config = &scenario.config;

    log.clear();
    log.log(
        CombatLogEventType::Scenario,
        format!("Scenario '{}' started (headless)", state.scenario_name),
    );

    let rng = match state.random_seed {
        Some(seed) => {
            info!("Using deterministic RNG with seed: {}", seed);
            GameRng::from_seed(seed)
        }
        None => GameRng::from_entropy(),
    };
    commands.insert_resource(rng);

    spawn_player(
        &mut commands,
        config.player,
        Vec2::new(0.0, -config.arena_half_height + 80.0),
    );

    let boss_kind = config.boss_kind().expect("validated at plugin build");
    let boss = spawn_boss(&mut commands, boss_kind, Vec2::new(0.0, 160.0));

    // The opening phase fires its start event like every later one.
    let behavior = boss_kind.behavior();
    let first = &behavior.phases()[0];
    log.log_phase(
        0,
        first.name.to_string(),
        format!("{} begins {}", boss_kind.name(), first.name),
    );
    phase_start.send(PhaseStartEvent {
        boss,
        phase_index: 0,
        phase_name: first.name.to_string(),
        is_spell_card: first.is_spell_card(),
    });

    for (kind, position) in config.mob_spawns() {
        spawn_mob(&mut commands, kind, position);
    }

    info!(
        "Scenario setup complete: {} vs {} (+{} mobs)",
        "Player",
        boss_kind.name(),
        config.mobs.len()
    );
}

/// Surface phase flow to the console; rendering would subscribe to the
/// same events.
fn headless_announce_phases(
    mut starts: EventReader<PhaseStartEvent>,
    mut completes: EventReader<PhaseCompleteEvent>,
) {
    for event in starts.read() {
        info!(
            "Phase {} started: {}{}",
            event.phase_index,
            event.phase_name,
            if event.is_spell_card { " [spell card]" } else { "" }
        );
    }
    for event in completes.read() {
        info!(
            "Phase {} complete, next {}",
            event.completed_phase_index, event.next_phase_index
        );
    }
}

/// Detect the ending condition, build the result, and save the log.
fn headless_check_end(
    time: Res<Time>,
    mut state: ResMut<HeadlessState>,
    mut log: ResMut<CombatLog>,
    pool: Res<ProjectilePool>,
    combatants: Query<(&Combatant, Option<&Name>)>,
    bosses: Query<&PhaseController>,
) {
    if state.complete {
        return;
    }
    state.elapsed += time.delta_secs();

    let boss_defeated =
        !bosses.is_empty() && bosses.iter().all(|c| c.flow == PhaseFlow::Defeated);
    let player_alive = combatants
        .iter()
        .any(|(c, _)| c.faction == Faction::Player && c.is_alive());

    let outcome = if boss_defeated {
        Some(FightOutcome::BossDefeated)
    } else if !player_alive {
        Some(FightOutcome::PlayerDefeated)
    } else if state.elapsed >= state.max_duration {
        Some(FightOutcome::Timeout)
    } else {
        None
    };
    let Some(outcome) = outcome else {
        return;
    };

    let phases_cleared: usize = bosses.iter().map(|c| c.phases_cleared()).sum();
    let reports = combatants
        .iter()
        .map(|(combatant, name)| CombatantReport {
            name: name.map(|n| n.as_str()).unwrap_or("Combatant").to_string(),
            faction: combatant.faction,
            max_hp: combatant.stats.max_hp,
            final_hp: combatant.current_hp,
            survived: combatant.is_alive(),
            damage_dealt: combatant.damage_dealt,
            damage_taken: combatant.damage_taken,
        })
        .collect();

    let result = FightResult {
        outcome,
        duration: state.elapsed,
        phases_cleared,
        reports,
        random_seed: state.random_seed,
    };

    info!(
        "Scenario '{}' over after {:.1}s: {}",
        state.scenario_name,
        state.elapsed,
        outcome.label()
    );
    log.log(
        CombatLogEventType::Scenario,
        format!(
            "Projectile pool peaked at {} live ({} spawns denied)",
            pool.high_water, pool.denied
        ),
    );

    let metadata = FightMetadata {
        scenario_name: state.scenario_name.clone(),
        boss_name: state.boss_name.clone(),
        outcome: outcome.label().to_string(),
        duration_secs: state.elapsed,
        phases_cleared,
        random_seed: state.random_seed,
    };
    match log.save_to_file(&metadata, state.output_path.as_deref()) {
        Ok(filename) => println!("Scenario complete. Log saved to: {}", filename),
        Err(e) => eprintln!("Failed to save combat log: {}", e),
    }

    state.result = Some(result);
    state.complete = true;
}

/// Run a scenario to completion and return its result.
///
/// Drives the app manually on a fixed timestep instead of handing
/// control to a schedule runner, so the caller gets the `FightResult`
/// back and runs are reproducible under a seed.
pub fn run_scenario(config: ScenarioConfig) -> Result<FightResult, String> {
    config.validate()?;

    let max_ticks = (config.max_duration_secs / SIM_DT).ceil() as u64 + 600;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(TransformPlugin)
        .add_plugins(HierarchyPlugin)
        .add_plugins(CombatPlugin)
        .add_plugins(HeadlessPlugin { config })
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            SIM_DT as f64,
        )));

    for _ in 0..max_ticks {
        app.update();
        if app.world().resource::<HeadlessState>().complete {
            break;
        }
    }

    let mut state = app.world_mut().resource_mut::<HeadlessState>();
    state
        .result
        .take()
        .ok_or_else(|| "scenario did not reach an ending condition".to_string())
}
