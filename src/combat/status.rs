//! Status-Effect Tracking
//!
//! Each combatant carries a `StatusTracker` holding at most one active
//! effect per kind. Re-applying a kind REPLACES the remaining time and
//! value instead of stacking or extending.
//!
//! All operations are total: applying to a dead combatant, updating an
//! empty tracker, or querying a missing kind are harmless no-ops.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Kinds of status effects. At most one of each may be active at a time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum StatusKind {
    /// Prevents all actions: movement, casting, skill starts. Interrupts
    /// in-progress casts when applied.
    Stun,
    /// Scales movement speed by `value` (0.6 = 40% slow).
    Slow,
    /// Prevents movement only; skills still function.
    Root,
    /// Prevents starting new casts; in-progress casts continue.
    Silence,
    /// Suppresses application of incoming stun/slow payloads.
    CcImmune,
}

impl StatusKind {
    pub fn name(self) -> &'static str {
        match self {
            StatusKind::Stun => "Stun",
            StatusKind::Slow => "Slow",
            StatusKind::Root => "Root",
            StatusKind::Silence => "Silence",
            StatusKind::CcImmune => "CC Immune",
        }
    }

    /// Whether CC-immune on the target suppresses applying this kind.
    pub fn blocked_by_cc_immunity(self) -> bool {
        matches!(self, StatusKind::Stun | StatusKind::Slow | StatusKind::Root)
    }
}

/// Config-level description of a status payload carried by a projectile,
/// loaded from `skills.ron`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusSpec {
    pub kind: StatusKind,
    pub duration: f32,
    /// Meaning depends on kind; only Slow reads it (speed multiplier).
    #[serde(default = "default_value")]
    pub value: f32,
}

fn default_value() -> f32 {
    1.0
}

/// An active status effect on a combatant.
#[derive(Clone, Debug)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Seconds until expiry. May be `f32::INFINITY` for permanent
    /// effects (spell-card CC immunity).
    pub remaining: f32,
    pub value: f32,
    /// The combatant that applied the effect, when known.
    pub source: Option<Entity>,
}

impl StatusEffect {
    pub fn from_spec(spec: &StatusSpec, source: Option<Entity>) -> Self {
        Self {
            kind: spec.kind,
            remaining: spec.duration,
            value: spec.value,
            source,
        }
    }
}

/// What happened during a tracker update tick.
#[derive(Default, Debug, Clone, Copy)]
pub struct StatusTickReport {
    /// True on the tick a stun ran out. Outer layers use this to clear
    /// stun tint/VFX; the simulation itself only logs it.
    pub stun_expired: bool,
}

/// Per-combatant status-effect container. One entry per kind.
#[derive(Component, Default, Clone, Debug)]
pub struct StatusTracker {
    effects: SmallVec<[StatusEffect; 5]>,
}

impl StatusTracker {
    /// Upsert by kind: replaces remaining time and value rather than
    /// stacking or extending.
    pub fn apply(&mut self, effect: StatusEffect) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            *existing = effect;
        } else {
            self.effects.push(effect);
        }
    }

    /// Decrement all timers by `dt`, dropping entries at or below zero.
    pub fn update(&mut self, dt: f32) -> StatusTickReport {
        let mut report = StatusTickReport::default();
        for effect in self.effects.iter_mut() {
            effect.remaining -= dt;
            if effect.remaining <= 0.0 && effect.kind == StatusKind::Stun {
                report.stun_expired = true;
            }
        }
        self.effects.retain(|e| e.remaining > 0.0);
        report
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Combined movement multiplier: 0 while stunned or rooted,
    /// otherwise the Slow value (1.0 when unimpaired).
    pub fn move_speed_multiplier(&self) -> f32 {
        if self.has(StatusKind::Stun) || self.has(StatusKind::Root) {
            return 0.0;
        }
        self.get(StatusKind::Slow).map_or(1.0, |e| e.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stun(duration: f32) -> StatusEffect {
        StatusEffect {
            kind: StatusKind::Stun,
            remaining: duration,
            value: 0.0,
            source: None,
        }
    }

    #[test]
    fn apply_replaces_instead_of_stacking() {
        let mut tracker = StatusTracker::default();
        tracker.apply(stun(0.5));
        tracker.update(0.1);
        tracker.apply(stun(0.2));

        let remaining = tracker.get(StatusKind::Stun).unwrap().remaining;
        assert!(
            (remaining - 0.2).abs() < 1e-6,
            "re-apply must overwrite, got {remaining}"
        );
    }

    #[test]
    fn update_expires_effects_and_reports_stun() {
        let mut tracker = StatusTracker::default();
        tracker.apply(stun(0.3));
        let report = tracker.update(0.2);
        assert!(!report.stun_expired);
        assert!(tracker.has(StatusKind::Stun));

        let report = tracker.update(0.2);
        assert!(report.stun_expired);
        assert!(!tracker.has(StatusKind::Stun));
        assert!(tracker.is_empty());
    }

    #[test]
    fn one_entry_per_kind() {
        let mut tracker = StatusTracker::default();
        tracker.apply(stun(1.0));
        tracker.apply(stun(2.0));
        tracker.apply(StatusEffect {
            kind: StatusKind::Slow,
            remaining: 1.0,
            value: 0.5,
            source: None,
        });
        assert_eq!(tracker.effects.len(), 2);
    }

    #[test]
    fn move_speed_multiplier_priorities() {
        let mut tracker = StatusTracker::default();
        assert_eq!(tracker.move_speed_multiplier(), 1.0);

        tracker.apply(StatusEffect {
            kind: StatusKind::Slow,
            remaining: 1.0,
            value: 0.6,
            source: None,
        });
        assert_eq!(tracker.move_speed_multiplier(), 0.6);

        // Stun wins over slow.
        tracker.apply(stun(1.0));
        assert_eq!(tracker.move_speed_multiplier(), 0.0);
    }

    #[test]
    fn permanent_effects_survive_updates() {
        let mut tracker = StatusTracker::default();
        tracker.apply(StatusEffect {
            kind: StatusKind::CcImmune,
            remaining: f32::INFINITY,
            value: 0.0,
            source: None,
        });
        tracker.update(1000.0);
        assert!(tracker.has(StatusKind::CcImmune));
    }
}
