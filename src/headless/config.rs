//! JSON configuration parsing for headless scenarios
//!
//! Parses JSON scenario files describing one boss fight: the boss, any
//! supporting mobs, the player's stat block, and run parameters.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::boss::BossKind;
use crate::combat::components::CombatantStats;
use crate::combat::constants::DEFAULT_PROJECTILE_CAPACITY;
use crate::combat::scripts::MobKind;

/// One mob to place at scenario start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MobSpawn {
    /// "lunger" or "spitter".
    pub kind: String,
    pub x: f32,
    pub y: f32,
}

/// Scenario configuration loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Label used in logs and the default output filename.
    #[serde(default = "default_scenario_name")]
    pub scenario_name: String,
    /// Boss identifier, e.g. "frost_revenant".
    pub boss: String,
    #[serde(default)]
    pub mobs: Vec<MobSpawn>,
    /// Player stat block. Defaults to the standard test loadout.
    #[serde(default = "default_player_stats")]
    pub player: CombatantStats,
    /// Maximum scenario duration before declaring a timeout (default: 180).
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Random seed for deterministic reproduction.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Custom output path for the fight log (optional).
    #[serde(default)]
    pub output_path: Option<String>,
    /// Arena half extents.
    #[serde(default = "default_half_width")]
    pub arena_half_width: f32,
    #[serde(default = "default_half_height")]
    pub arena_half_height: f32,
    /// Bound on simultaneously live projectiles.
    #[serde(default = "default_projectile_capacity")]
    pub projectile_capacity: usize,
}

fn default_scenario_name() -> String {
    "scenario".to_string()
}

fn default_max_duration() -> f32 {
    180.0
}

fn default_half_width() -> f32 {
    400.0
}

fn default_half_height() -> f32 {
    300.0
}

fn default_projectile_capacity() -> usize {
    DEFAULT_PROJECTILE_CAPACITY
}

pub fn default_player_stats() -> CombatantStats {
    CombatantStats {
        max_hp: 100,
        attack: 10,
        defense: 5,
        move_speed: 220.0,
        hitbox_radius: 6.0,
        crit_chance: 0.15,
    }
}

impl ScenarioConfig {
    /// A minimal scenario against the given boss, used by tests.
    pub fn for_boss(kind: BossKind) -> Self {
        Self {
            scenario_name: "test".to_string(),
            boss: kind.name().to_string(),
            mobs: Vec::new(),
            player: default_player_stats(),
            max_duration_secs: default_max_duration(),
            random_seed: None,
            output_path: None,
            arena_half_width: default_half_width(),
            arena_half_height: default_half_height(),
            projectile_capacity: default_projectile_capacity(),
        }
    }

    /// Load configuration from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: ScenarioConfig = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.boss_kind()?;
        for spawn in &self.mobs {
            MobKind::parse(&spawn.kind).ok_or_else(|| {
                format!(
                    "Unknown mob kind: '{}'. Valid kinds: lunger, spitter",
                    spawn.kind
                )
            })?;
        }
        if self.player.max_hp <= 0 {
            return Err("player max_hp must be positive".to_string());
        }
        if self.max_duration_secs <= 0.0 {
            return Err("max_duration_secs must be positive".to_string());
        }
        if self.arena_half_width <= 0.0 || self.arena_half_height <= 0.0 {
            return Err("arena half extents must be positive".to_string());
        }
        if self.projectile_capacity == 0 {
            return Err("projectile_capacity must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn boss_kind(&self) -> Result<BossKind, String> {
        BossKind::parse(&self.boss).ok_or_else(|| {
            format!(
                "Unknown boss: '{}'. Valid bosses: frost_revenant, ember_sentinel",
                self.boss
            )
        })
    }

    pub fn mob_spawns(&self) -> Vec<(MobKind, bevy::math::Vec2)> {
        self.mobs
            .iter()
            .filter_map(|spawn| {
                MobKind::parse(&spawn.kind).map(|kind| (kind, bevy::math::Vec2::new(spawn.x, spawn.y)))
            })
            .collect()
    }
}
