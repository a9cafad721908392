//! Core Combat Components
//!
//! ECS components and resources shared across the simulation: the
//! combatant itself, its plain-data stats block, the seeded RNG, and
//! the world bounds the despawn policy reads.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Which side a combatant (and its projectiles) fights for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Faction {
    Player,
    Enemy,
}

/// Plain-data stat block. No behavior lives here.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CombatantStats {
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    /// Units per second.
    pub move_speed: f32,
    /// Circular collision radius used for all projectile contact tests.
    pub hitbox_radius: f32,
    /// Chance (0..1) for auto-shots to crit. Zero for everything that
    /// is not the player.
    #[serde(default)]
    pub crit_chance: f32,
}

/// The unit of simulation: player, mob, or boss.
///
/// Created on spawn with full HP, READY skills, and clear status;
/// deactivated (not despawned) on death so slots can be pooled and
/// reused by the wave scripts that own spawning.
#[derive(Component, Clone, Debug)]
pub struct Combatant {
    pub faction: Faction,
    pub stats: CombatantStats,
    pub current_hp: i32,
    pub is_active: bool,
    /// Intent velocity set by scripts; movement applies status
    /// multipliers and bounds clamping on top.
    pub velocity: Vec2,
    pub damage_dealt: i64,
    pub damage_taken: i64,
}

impl Combatant {
    pub fn new(faction: Faction, stats: CombatantStats) -> Self {
        Self {
            faction,
            stats,
            current_hp: stats.max_hp,
            is_active: true,
            velocity: Vec2::ZERO,
            damage_dealt: 0,
            damage_taken: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Apply damage, clamping HP into `[0, max_hp]`. Returns the HP
    /// actually removed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        debug_assert!(amount >= 0, "damage cannot be negative, got {amount}");
        let actual = amount.min(self.current_hp).max(0);
        self.current_hp -= actual;
        self.damage_taken += actual as i64;
        actual
    }

    /// Reset HP to a new pool (boss phase swap).
    pub fn reset_hp(&mut self, pool: i32) {
        self.stats.max_hp = pool;
        self.current_hp = pool;
    }

    pub fn hp_fraction(&self) -> f32 {
        if self.stats.max_hp <= 0 {
            return 0.0;
        }
        self.current_hp as f32 / self.stats.max_hp as f32
    }
}

/// Seeded random number source for the simulation.
///
/// With a seed every run is reproducible; without one the RNG draws
/// from entropy for exploratory runs.
#[derive(Resource)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic).
    pub seed: Option<u64>,
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Random f32 in `[0.0, 1.0)`.
    pub fn random_f32(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Uniformly ±1.0.
    pub fn random_sign(&mut self) -> f32 {
        if self.rng.gen::<bool>() {
            1.0
        } else {
            -1.0
        }
    }
}

/// Axis-aligned playable area, supplied by the scenario. The projectile
/// despawn policy measures "inside" and "far outside" against this.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldBounds {
    pub fn from_half_extents(half_width: f32, half_height: f32) -> Self {
        Self {
            min: Vec2::new(-half_width, -half_height),
            max: Vec2::new(half_width, half_height),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Whether `point` lies outside the bounds inflated by `margin`.
    pub fn far_outside(&self, point: Vec2, margin: f32) -> bool {
        point.x < self.min.x - margin
            || point.x > self.max.x + margin
            || point.y < self.min.y - margin
            || point.y > self.max.y + margin
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}
