//! Unit tests for combat log query and aggregation methods
//!
//! These tests verify that the CombatLog correctly:
//! - Aggregates damage by skill
//! - Counts killing blows and cast breaks
//! - Tracks damage taken per target
//! - Serializes fight reports to JSON

use regex::Regex;

use bossrush::combat::log::{CombatLog, CombatLogEventType, FightMetadata};

fn create_test_log() -> CombatLog {
    CombatLog::default()
}

fn log_hit(log: &mut CombatLog, source: &str, target: &str, skill: &str, amount: i32, kill: bool) {
    log.log_damage(
        source.to_string(),
        target.to_string(),
        skill.to_string(),
        amount,
        false,
        kill,
        format!("{}'s {} hits {} for {}", source, skill, target, amount),
    );
}

// =============================================================================
// Damage Aggregation Tests
// =============================================================================

#[test]
fn test_damage_by_skill_empty_log() {
    let log = create_test_log();
    let damage = log.damage_by_skill("Player");
    assert!(damage.is_empty(), "Empty log should return empty damage map");
}

#[test]
fn test_damage_by_skill_single_source() {
    let mut log = create_test_log();

    log_hit(&mut log, "Player", "Frost Revenant", "Auto Shot", 10, false);
    log_hit(&mut log, "Player", "Frost Revenant", "Auto Shot", 10, false);
    log_hit(&mut log, "Player", "Frost Revenant", "Spread Shot", 7, false);

    let damage = log.damage_by_skill("Player");

    assert_eq!(damage.len(), 2, "Should have 2 different skills");
    assert_eq!(damage.get("Auto Shot"), Some(&20));
    assert_eq!(damage.get("Spread Shot"), Some(&7));
}

#[test]
fn test_damage_by_skill_filters_other_sources() {
    let mut log = create_test_log();

    log_hit(&mut log, "Player", "Lunger", "Auto Shot", 12, false);
    log_hit(&mut log, "Frost Revenant", "Player", "Frost Shards", 11, false);

    let damage = log.damage_by_skill("Player");
    assert_eq!(damage.len(), 1);
    assert!(damage.contains_key("Auto Shot"));
}

#[test]
fn test_total_damage_taken() {
    let mut log = create_test_log();

    log_hit(&mut log, "Frost Revenant", "Player", "Frost Shards", 11, false);
    log_hit(&mut log, "Spitter", "Player", "Acid Spit", 7, false);
    log_hit(&mut log, "Player", "Spitter", "Auto Shot", 14, true);

    assert_eq!(log.total_damage_taken("Player"), 18);
    assert_eq!(log.total_damage_taken("Spitter"), 14);
    assert_eq!(log.total_damage_taken("Lunger"), 0);
}

// =============================================================================
// Killing Blow and Break Tests
// =============================================================================

#[test]
fn test_killing_blows_counted_per_source() {
    let mut log = create_test_log();

    log_hit(&mut log, "Player", "Lunger", "Nova Pulse", 20, true);
    log_hit(&mut log, "Player", "Spitter", "Auto Shot", 14, true);
    log_hit(&mut log, "Player", "Frost Revenant", "Auto Shot", 10, false);

    assert_eq!(log.killing_blows("Player"), 2);
    assert_eq!(log.killing_blows("Frost Revenant"), 0);
}

#[test]
fn test_break_count() {
    let mut log = create_test_log();
    assert_eq!(log.break_count(), 0);

    log.log(
        CombatLogEventType::Break,
        "Frost Revenant's cast broken by Auto Shot".to_string(),
    );
    log.log(
        CombatLogEventType::Break,
        "Player's cast broken by stun".to_string(),
    );
    log.log(CombatLogEventType::SkillCast, "noise".to_string());

    assert_eq!(log.break_count(), 2);
}

// =============================================================================
// Entry Bookkeeping Tests
// =============================================================================

#[test]
fn test_entries_carry_sim_time() {
    let mut log = create_test_log();
    log.sim_time = 12.5;
    log.log(CombatLogEventType::Scenario, "checkpoint".to_string());

    assert_eq!(log.entries.len(), 1);
    assert_eq!(log.entries[0].timestamp, 12.5);
}

#[test]
fn test_clear_resets_time_and_entries() {
    let mut log = create_test_log();
    log.sim_time = 30.0;
    log.log(CombatLogEventType::Scenario, "old".to_string());
    log.clear();

    assert!(log.entries.is_empty());
    assert_eq!(log.sim_time, 0.0);
}

#[test]
fn test_recent_returns_last_entries_in_order() {
    let mut log = create_test_log();
    for i in 0..5 {
        log.log(CombatLogEventType::Scenario, format!("entry {}", i));
    }
    let recent = log.recent(2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].message, "entry 3");
    assert_eq!(recent[1].message, "entry 4");
}

#[test]
fn test_damage_messages_follow_expected_shape() {
    let mut log = create_test_log();
    log_hit(&mut log, "Player", "Ember Sentinel", "Auto Shot", 9, false);

    let pattern = Regex::new(r"^.+'s .+ hits .+ for \d+$").unwrap();
    assert!(pattern.is_match(&log.entries[0].message));
}

// =============================================================================
// Serialization Tests
// =============================================================================

#[test]
fn test_save_to_file_writes_json() {
    let mut log = create_test_log();
    log_hit(&mut log, "Player", "Frost Revenant", "Auto Shot", 10, false);

    let metadata = FightMetadata {
        scenario_name: "log_test".to_string(),
        boss_name: "Frost Revenant".to_string(),
        outcome: "timeout".to_string(),
        duration_secs: 5.0,
        phases_cleared: 0,
        random_seed: Some(7),
    };
    let path = std::env::temp_dir().join("bossrush_log_test.json");
    let path_str = path.to_string_lossy().into_owned();

    let written = log
        .save_to_file(&metadata, Some(&path_str))
        .expect("save should succeed");
    assert_eq!(written, path_str);

    let contents = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["metadata"]["boss_name"], "Frost Revenant");
    assert_eq!(parsed["entries"].as_array().unwrap().len(), 1);

    std::fs::remove_file(&path).ok();
}
