//! Projectile Hit Shapes
//!
//! All collision is shape-vs-circle: combatants are circles with a
//! configured hitbox radius. The oriented rectangle test works in the
//! shape's local frame by clamping the target's local position to the
//! half-extents and comparing the residual distance to the radius.

use bevy::prelude::*;

use crate::combat::skill_config::ShapeSpec;

/// Resolved hit shape carried by a live projectile.
#[derive(Clone, Copy, Debug)]
pub enum HitShape {
    Circle {
        radius: f32,
    },
    /// Rectangle with arbitrary rotation. `half_width` spans local x,
    /// `half_height` spans local y; `angle = 0` aligns local to world.
    Rect {
        half_width: f32,
        half_height: f32,
    },
}

impl HitShape {
    /// Build from config. Lasers are oriented rects whose long axis is
    /// the facing axis.
    pub fn from_spec(spec: ShapeSpec) -> Self {
        match spec {
            ShapeSpec::Circle { radius } => HitShape::Circle { radius },
            ShapeSpec::Rect {
                half_width,
                half_height,
            } => HitShape::Rect {
                half_width,
                half_height,
            },
            ShapeSpec::Laser {
                half_width,
                half_length,
            } => HitShape::Rect {
                half_width,
                half_height: half_length,
            },
        }
    }

    /// Test this shape at `center` rotated by `angle` against a circular
    /// target.
    pub fn hits_circle(
        &self,
        center: Vec2,
        angle: f32,
        target: Vec2,
        target_radius: f32,
    ) -> bool {
        match *self {
            HitShape::Circle { radius } => {
                let reach = radius + target_radius;
                center.distance_squared(target) <= reach * reach
            }
            HitShape::Rect {
                half_width,
                half_height,
            } => {
                let local = Vec2::from_angle(-angle).rotate(target - center);
                let closest = local.clamp(
                    Vec2::new(-half_width, -half_height),
                    Vec2::new(half_width, half_height),
                );
                local.distance_squared(closest) <= target_radius * target_radius
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_contact_at_combined_radius() {
        let shape = HitShape::Circle { radius: 6.0 };
        assert!(shape.hits_circle(Vec2::ZERO, 0.0, Vec2::new(13.0, 0.0), 8.0));
        assert!(!shape.hits_circle(Vec2::ZERO, 0.0, Vec2::new(15.0, 0.0), 8.0));
    }

    #[test]
    fn rect_misses_target_beyond_long_axis() {
        // Closest point on the rect to (0, 200) is (0, 100): 100 > 20.
        let shape = HitShape::Rect {
            half_width: 50.0,
            half_height: 100.0,
        };
        assert!(!shape.hits_circle(Vec2::ZERO, 0.0, Vec2::new(0.0, 200.0), 20.0));
    }

    #[test]
    fn rect_contains_target_inside_half_extents() {
        // (0, 40) lies inside the rect, so the residual distance is 0.
        let shape = HitShape::Rect {
            half_width: 50.0,
            half_height: 100.0,
        };
        assert!(shape.hits_circle(Vec2::ZERO, 0.0, Vec2::new(0.0, 40.0), 20.0));
    }

    #[test]
    fn rect_rotation_carries_the_long_axis() {
        let shape = HitShape::Rect {
            half_width: 10.0,
            half_height: 100.0,
        };
        // Rotated a quarter turn, the long axis lies along world x.
        let angle = std::f32::consts::FRAC_PI_2;
        assert!(shape.hits_circle(Vec2::ZERO, angle, Vec2::new(90.0, 0.0), 5.0));
        assert!(!shape.hits_circle(Vec2::ZERO, angle, Vec2::new(0.0, 90.0), 5.0));
    }
}
