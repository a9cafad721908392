//! Projectile Motion Models
//!
//! Each live projectile carries one `Motion` value evaluated once per
//! tick. Motion never despawns anything directly; it reports `Expire`
//! and the engine handles removal and pool release.

use bevy::prelude::*;

/// Outcome of one motion step.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MotionStep {
    Continue,
    /// The projectile can no longer do anything useful (homing target
    /// gone) and should be removed this tick.
    Expire,
}

/// Per-tick motion model.
#[derive(Clone, Copy, Debug)]
pub enum Motion {
    /// Constant velocity along the spawn direction.
    Straight { velocity: Vec2 },
    /// Re-aims at the target every tick. Expires when the target dies
    /// or despawns.
    Homing { target: Entity, speed: f32 },
    /// Polar orbit around a fixed center. Radius and rotation advance
    /// linearly with age, so position is a pure function of elapsed
    /// time; `rotation_speed` carries the wave's direction sign.
    RingOrbit {
        center: Vec2,
        base_angle: f32,
        initial_radius: f32,
        expansion_speed: f32,
        rotation_speed: f32,
    },
    /// Pinned at the spawn transform for the whole lifetime (lasers).
    Fixed,
}

impl Motion {
    /// Advance one tick. `elapsed` is the projectile's age after this
    /// tick; `target_pos` is the homing target's position when it is
    /// still alive.
    pub fn advance(
        &self,
        position: &mut Vec2,
        facing: &mut f32,
        elapsed: f32,
        dt: f32,
        target_pos: Option<Vec2>,
    ) -> MotionStep {
        match *self {
            Motion::Straight { velocity } => {
                *position += velocity * dt;
                MotionStep::Continue
            }
            Motion::Homing { speed, .. } => {
                let Some(target) = target_pos else {
                    return MotionStep::Expire;
                };
                let direction = (target - *position).normalize_or_zero();
                if direction != Vec2::ZERO {
                    *position += direction * speed * dt;
                    *facing = direction.to_angle();
                }
                MotionStep::Continue
            }
            Motion::RingOrbit {
                center,
                base_angle,
                initial_radius,
                expansion_speed,
                rotation_speed,
            } => {
                let theta = base_angle + rotation_speed * elapsed;
                let radius = initial_radius + expansion_speed * elapsed;
                *position = center + radius * Vec2::from_angle(theta);
                *facing = theta;
                MotionStep::Continue
            }
            Motion::Fixed => MotionStep::Continue,
        }
    }
}
