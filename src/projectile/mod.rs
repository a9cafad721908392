//! Projectile Engine
//!
//! Spawns skill projectiles, advances their motion, and resolves first
//! contact per target. Split into:
//! - `shapes`: hit-shape geometry (circle, oriented rect)
//! - `motion`: per-tick motion models (straight, homing, ring orbit, fixed)
//! - `pool`: bounded live-projectile budget
//! - `engine`: the Projectile component, spawn helper, and systems

pub mod engine;
pub mod motion;
pub mod pool;
pub mod shapes;

pub use engine::{
    advance_projectiles, projectile_collision, spawn_skill_projectiles, Projectile,
};
pub use motion::{Motion, MotionStep};
pub use pool::ProjectilePool;
pub use shapes::HitShape;
