//! Integration tests for headless scenario execution
//!
//! These tests drive complete boss fights through `run_scenario` and
//! verify that:
//! - Scenarios reach a valid ending condition within their budget
//! - Reports cover every combatant with sane values
//! - Seeded runs are bit-for-bit reproducible
//! - Invalid configurations are rejected before the app is built

use bossrush::boss::BossKind;
use bossrush::combat::components::Faction;
use bossrush::headless::runner::FightOutcome;
use bossrush::headless::{run_scenario, MobSpawn, ScenarioConfig};

fn short_scenario(kind: BossKind, seed: u64, tag: &str) -> ScenarioConfig {
    let mut config = ScenarioConfig::for_boss(kind);
    config.scenario_name = format!("headless_{}", tag);
    config.max_duration_secs = 20.0;
    config.random_seed = Some(seed);
    config.output_path = Some(
        std::env::temp_dir()
            .join(format!("bossrush_{}.json", tag))
            .to_string_lossy()
            .into_owned(),
    );
    config
}

// =============================================================================
// Scenario Execution Tests
// =============================================================================

#[test]
fn test_scenario_reaches_an_ending_condition() {
    let config = short_scenario(BossKind::FrostRevenant, 42, "ending");
    let result = run_scenario(config).expect("scenario should run");

    assert!(matches!(
        result.outcome,
        FightOutcome::BossDefeated | FightOutcome::PlayerDefeated | FightOutcome::Timeout
    ));
    assert!(result.duration > 0.0);
    assert!(result.duration <= 20.0 + 1.0, "duration within budget");
    assert_eq!(result.random_seed, Some(42));
    assert!(result.phases_cleared <= 2);
}

#[test]
fn test_reports_cover_all_combatants() {
    let mut config = short_scenario(BossKind::EmberSentinel, 7, "reports");
    config.mobs = vec![
        MobSpawn {
            kind: "lunger".to_string(),
            x: -150.0,
            y: 0.0,
        },
        MobSpawn {
            kind: "spitter".to_string(),
            x: 150.0,
            y: 0.0,
        },
    ];
    let result = run_scenario(config).expect("scenario should run");

    // Player, boss, and two mobs.
    assert_eq!(result.reports.len(), 4);

    let player = result
        .reports
        .iter()
        .find(|r| r.faction == Faction::Player)
        .expect("player report");
    assert_eq!(player.name, "Player");
    assert!(player.final_hp <= player.max_hp);
    assert_eq!(player.survived, player.final_hp > 0);

    for report in &result.reports {
        assert!(report.max_hp > 0);
        assert!(report.damage_dealt >= 0);
        assert!(report.damage_taken >= 0);
    }
}

#[test]
fn test_scenario_writes_log_file() {
    let config = short_scenario(BossKind::FrostRevenant, 99, "logfile");
    let path = config.output_path.clone().unwrap();
    run_scenario(config).expect("scenario should run");

    let contents = std::fs::read_to_string(&path).expect("log file written");
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["metadata"]["scenario_name"], "headless_logfile");
    assert_eq!(parsed["metadata"]["boss_name"], "Frost Revenant");
    assert!(!parsed["entries"].as_array().unwrap().is_empty());

    std::fs::remove_file(&path).ok();
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_seeded_runs_are_reproducible() {
    let first =
        run_scenario(short_scenario(BossKind::FrostRevenant, 1234, "det_a")).expect("first run");
    let second =
        run_scenario(short_scenario(BossKind::FrostRevenant, 1234, "det_b")).expect("second run");

    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.duration.to_bits(), second.duration.to_bits());
    assert_eq!(first.phases_cleared, second.phases_cleared);
    assert_eq!(first.reports.len(), second.reports.len());
    for (a, b) in first.reports.iter().zip(second.reports.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.final_hp, b.final_hp);
        assert_eq!(a.damage_dealt, b.damage_dealt);
        assert_eq!(a.damage_taken, b.damage_taken);
    }
}

#[test]
fn test_different_seeds_may_diverge_without_error() {
    let first =
        run_scenario(short_scenario(BossKind::EmberSentinel, 1, "seed_a")).expect("first run");
    let second =
        run_scenario(short_scenario(BossKind::EmberSentinel, 2, "seed_b")).expect("second run");

    // No equality requirement across seeds; both must simply finish.
    assert!(first.duration > 0.0);
    assert!(second.duration > 0.0);
}

// =============================================================================
// Configuration Rejection Tests
// =============================================================================

#[test]
fn test_unknown_boss_is_rejected_before_running() {
    let mut config = ScenarioConfig::for_boss(BossKind::FrostRevenant);
    config.boss = "onyx_warden".to_string();
    assert!(run_scenario(config).is_err());
}

#[test]
fn test_nonpositive_duration_is_rejected() {
    let mut config = ScenarioConfig::for_boss(BossKind::FrostRevenant);
    config.max_duration_secs = 0.0;
    assert!(run_scenario(config).is_err());
}

#[test]
fn test_zero_projectile_capacity_is_rejected() {
    let mut config = ScenarioConfig::for_boss(BossKind::EmberSentinel);
    config.projectile_capacity = 0;
    assert!(run_scenario(config).is_err());
}
