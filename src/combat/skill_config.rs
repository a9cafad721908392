//! Data-Driven Skill Configuration
//!
//! Every skill/phase numeric parameter — cast time, execution window,
//! cooldown, damage, projectile speed/range/shape, status payloads,
//! on-hit effects, arbitration priority — is loaded from
//! `assets/config/skills.ron` as an immutable record per skill. The
//! engines only interpret these records and never hardcode values.
//!
//! All expected skills are validated at startup; a missing entry is a
//! data-authoring bug surfaced as a startup error.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::skills::SkillSlot;
use super::status::StatusSpec;

/// Enum of every skill in the game: player, mob, and boss skills alike.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SkillId {
    // Player
    AutoShot,
    SpreadShot,
    NovaPulse,
    // Mobs
    LungeSlash,
    AcidSpit,
    // Frost Revenant
    FrostShards,
    IceLance,
    GlacialRing,
    PrismLaser,
    // Ember Sentinel
    CrescentSlash,
    EmberBurst,
    CinderSeeker,
    MoltenRing,
    FlameWall,
}

/// Hit-shape parameters for a projectile.
///
/// Rect/laser extents are half-extents: a `half_height` of 100 reaches
/// 100 units along the facing axis in both directions.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum ShapeSpec {
    Circle { radius: f32 },
    Rect { half_width: f32, half_height: f32 },
    Laser { half_width: f32, half_length: f32 },
}

/// How a projectile moves each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum MotionSpec {
    /// Straight line along the spawn angle at `speed`.
    #[default]
    Straight,
    /// Re-aims at a live target every tick; expires if the target dies.
    Homing,
    /// Polar orbit around the spawn point: radius and rotation are
    /// affine in time, with a per-wave direction sign.
    Ring {
        initial_radius: f32,
        expansion_speed: f32,
        rotation_speed: f32,
    },
    /// Stays where it spawned for its whole lifetime (lasers).
    Fixed,
}

/// Skill-specific bonus effect run when a projectile connects.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum OnHitEffect {
    /// Shave `amount` seconds off the owner's cooldown in `slot`.
    CooldownRefund { slot: SkillSlot, amount: f32 },
}

/// Projectile parameters for a skill that spawns projectiles.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ProjectileSpec {
    pub shape: ShapeSpec,
    #[serde(default)]
    pub motion: MotionSpec,
    /// Units per second. Ignored by Ring/Fixed motion.
    #[serde(default)]
    pub speed: f32,
    /// Travel distance budget; lifetime = range / speed when no explicit
    /// lifetime is given.
    #[serde(default)]
    pub range: f32,
    /// Explicit lifetime in seconds. Zero means "derive from range, or
    /// from the execution window for Fixed motion".
    #[serde(default)]
    pub lifetime: f32,
    /// Projectiles per volley.
    #[serde(default = "default_count")]
    pub count: u32,
    /// Total fan angle (radians) the volley is spread across.
    #[serde(default)]
    pub spread: f32,
    /// Distribute the volley evenly around the full circle instead of a
    /// fan about the aim angle.
    #[serde(default)]
    pub radial: bool,
}

fn default_count() -> u32 {
    1
}

/// Complete configuration record for one skill.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Display name used in the combat log.
    pub name: String,
    /// Seconds between activation and the effect resolving.
    #[serde(default)]
    pub cast_time: f32,
    /// Post-cast window while the effect plays out; the slot stays busy.
    #[serde(default)]
    pub execution_time: f32,
    /// Seconds before the slot returns to READY after executing.
    #[serde(default)]
    pub cooldown: f32,
    /// Raw damage per projectile hit, before mitigation.
    #[serde(default)]
    pub damage: i32,
    /// Arbitration priority for parallel casters; higher wins.
    #[serde(default)]
    pub priority: i32,
    /// Whether hits from this skill may crit (player auto-shots only).
    #[serde(default)]
    pub can_crit: bool,
    #[serde(default)]
    pub projectile: Option<ProjectileSpec>,
    /// Stun/slow payload applied on hit (suppressed by CC-immune).
    #[serde(default)]
    pub status_payload: Option<StatusSpec>,
    #[serde(default)]
    pub on_hit: Option<OnHitEffect>,
}

impl SkillConfig {
    pub fn is_damage(&self) -> bool {
        self.damage > 0
    }

    pub fn spawns_projectiles(&self) -> bool {
        self.projectile.is_some()
    }
}

/// Root structure for the skills.ron file.
#[derive(Debug, Serialize, Deserialize)]
pub struct SkillsConfig {
    pub skills: HashMap<SkillId, SkillConfig>,
}

/// Resource containing all skill definitions, loaded at startup.
#[derive(Resource)]
pub struct SkillBook {
    definitions: HashMap<SkillId, SkillConfig>,
}

impl Default for SkillBook {
    /// Load skill definitions from the default config file.
    /// Panics if the file cannot be loaded — use for tests only.
    fn default() -> Self {
        load_skill_book().expect("Failed to load skill definitions in Default impl")
    }
}

impl SkillBook {
    pub fn new(config: SkillsConfig) -> Self {
        Self {
            definitions: config.skills,
        }
    }

    pub fn get(&self, skill: SkillId) -> Option<&SkillConfig> {
        self.definitions.get(&skill)
    }

    /// Get a skill's configuration, panicking if missing. Use only for
    /// skills validated at startup.
    pub fn get_unchecked(&self, skill: SkillId) -> &SkillConfig {
        self.definitions
            .get(&skill)
            .unwrap_or_else(|| panic!("Skill {:?} not found in definitions", skill))
    }

    /// Full cooldown for the skill assigned to a loadout slot. Zero for
    /// empty slots, so interrupts on them are harmless no-ops.
    pub fn cooldown_for(&self, skill: Option<SkillId>) -> f32 {
        skill
            .and_then(|id| self.get(id))
            .map_or(0.0, |cfg| cfg.cooldown)
    }

    /// Check that every expected skill is defined.
    pub fn validate(&self) -> Result<(), Vec<SkillId>> {
        let expected = [
            SkillId::AutoShot,
            SkillId::SpreadShot,
            SkillId::NovaPulse,
            SkillId::LungeSlash,
            SkillId::AcidSpit,
            SkillId::FrostShards,
            SkillId::IceLance,
            SkillId::GlacialRing,
            SkillId::PrismLaser,
            SkillId::CrescentSlash,
            SkillId::EmberBurst,
            SkillId::CinderSeeker,
            SkillId::MoltenRing,
            SkillId::FlameWall,
        ];

        let missing: Vec<SkillId> = expected
            .into_iter()
            .filter(|skill| !self.definitions.contains_key(skill))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }

    pub fn skill_ids(&self) -> impl Iterator<Item = &SkillId> {
        self.definitions.keys()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Load skill definitions from `assets/config/skills.ron`.
pub fn load_skill_book() -> Result<SkillBook, String> {
    let config_path = "assets/config/skills.ron";

    let contents = std::fs::read_to_string(config_path)
        .map_err(|e| format!("Failed to read {}: {}", config_path, e))?;

    let config: SkillsConfig =
        ron::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", config_path, e))?;

    let book = SkillBook::new(config);

    book.validate()
        .map_err(|missing| format!("Missing skill definitions: {:?}", missing))?;

    info!(
        "Loaded {} skill definitions from {}",
        book.len(),
        config_path
    );

    Ok(book)
}

/// Bevy plugin loading the skill book at startup.
pub struct SkillBookPlugin;

impl Plugin for SkillBookPlugin {
    fn build(&self, app: &mut App) {
        match load_skill_book() {
            Ok(book) => {
                app.insert_resource(book);
            }
            Err(e) => {
                // The config is part of the repo; failing to load it is
                // unrecoverable data rot, not a runtime condition.
                panic!("Failed to load skill definitions: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::status::StatusKind;

    #[test]
    fn skill_config_damage_classification() {
        let config = SkillConfig {
            name: "Test".to_string(),
            cast_time: 0.5,
            execution_time: 0.2,
            cooldown: 2.0,
            damage: 30,
            priority: 0,
            can_crit: false,
            projectile: Some(ProjectileSpec {
                shape: ShapeSpec::Circle { radius: 6.0 },
                motion: MotionSpec::Straight,
                speed: 300.0,
                range: 600.0,
                lifetime: 0.0,
                count: 1,
                spread: 0.0,
                radial: false,
            }),
            status_payload: None,
            on_hit: None,
        };

        assert!(config.is_damage());
        assert!(config.spawns_projectiles());
    }

    #[test]
    fn status_spec_roundtrips_through_ron() {
        let spec = StatusSpec {
            kind: StatusKind::Slow,
            duration: 2.0,
            value: 0.6,
        };
        let text = ron::to_string(&spec).unwrap();
        let back: StatusSpec = ron::from_str(&text).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn cooldown_for_empty_slot_is_zero() {
        let book = SkillBook {
            definitions: HashMap::new(),
        };
        assert_eq!(book.cooldown_for(None), 0.0);
        assert_eq!(book.cooldown_for(Some(SkillId::AutoShot)), 0.0);
    }
}
