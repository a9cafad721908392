//! Skill State Machines
//!
//! One `SkillSlotState` per skill slot per combatant, driving the
//! READY → CASTING → EXECUTING → COOLDOWN cycle on explicit remaining-time
//! counters. The machine knows nothing about geometry or damage; the cast
//! systems perform the skill's effect when `update_casting` signals
//! completion.
//!
//! Slots live in a fixed-size array indexed by `SkillSlot`. Structural
//! mutation is disallowed — hit callbacks and interrupts only update
//! fields in place, so iteration is never invalidated mid-tick.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::constants::{INTERRUPTED_COOLDOWN_FACTOR, SKILL_SLOT_COUNT};
use super::skill_config::SkillId;

/// Skill slot identifiers. Every combatant has the same fixed set;
/// unused slots simply have no skill assigned.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SkillSlot {
    Primary,
    Secondary,
    Tertiary,
    Quaternary,
}

impl SkillSlot {
    pub const ALL: [SkillSlot; SKILL_SLOT_COUNT] = [
        SkillSlot::Primary,
        SkillSlot::Secondary,
        SkillSlot::Tertiary,
        SkillSlot::Quaternary,
    ];

    pub fn index(self) -> usize {
        match self {
            SkillSlot::Primary => 0,
            SkillSlot::Secondary => 1,
            SkillSlot::Tertiary => 2,
            SkillSlot::Quaternary => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SkillSlot::Primary => "Primary",
            SkillSlot::Secondary => "Secondary",
            SkillSlot::Tertiary => "Tertiary",
            SkillSlot::Quaternary => "Quaternary",
        }
    }
}

/// Lifecycle state of a single skill slot.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SkillPhase {
    #[default]
    Ready,
    Casting,
    Executing,
    Cooldown,
}

/// Timer/state machine for one skill slot.
#[derive(Clone, Debug, Default)]
pub struct SkillSlotState {
    pub phase: SkillPhase,
    pub cast_remaining: f32,
    pub execution_remaining: f32,
    pub cooldown_remaining: f32,
    /// Aim captured at cast start; consumed when the effect fires.
    pub target_angle: Option<f32>,
    /// Per-wave direction sign for ring-orbit skills (+1.0 / -1.0).
    pub wave_sign: f32,
}

impl SkillSlotState {
    /// Begin casting. The only entry point into the cycle; fails
    /// silently (returns false) unless the slot is READY.
    pub fn start(&mut self, cast_time: f32, target_angle: Option<f32>) -> bool {
        if self.phase != SkillPhase::Ready {
            return false;
        }
        self.phase = SkillPhase::Casting;
        self.cast_remaining = cast_time;
        self.target_angle = target_angle;
        self.wave_sign = 1.0;
        true
    }

    /// Tick the cast timer. Returns true exactly once, on the tick the
    /// remaining time crosses zero — the caller must then perform the
    /// skill's effect and call `begin_execution`.
    pub fn update_casting(&mut self, dt: f32) -> bool {
        if self.phase != SkillPhase::Casting {
            return false;
        }
        self.cast_remaining -= dt;
        self.cast_remaining <= 0.0
    }

    /// CASTING → EXECUTING, holding the slot busy for the skill's
    /// execution window (projectile lifetime, laser duration).
    pub fn begin_execution(&mut self, execution_time: f32) {
        debug_assert_eq!(self.phase, SkillPhase::Casting);
        self.phase = SkillPhase::Executing;
        self.cast_remaining = 0.0;
        self.execution_remaining = execution_time;
    }

    /// Tick the execution window. Returns true exactly once, when the
    /// window closes; the caller then invokes `complete`.
    pub fn update_execution(&mut self, dt: f32) -> bool {
        if self.phase != SkillPhase::Executing {
            return false;
        }
        self.execution_remaining -= dt;
        self.execution_remaining <= 0.0
    }

    /// EXECUTING → COOLDOWN, clearing transient execution state.
    pub fn complete(&mut self, cooldown: f32) {
        debug_assert_eq!(self.phase, SkillPhase::Executing);
        self.phase = SkillPhase::Cooldown;
        self.execution_remaining = 0.0;
        self.cooldown_remaining = cooldown;
        self.target_angle = None;
        self.wave_sign = 1.0;
    }

    /// Interrupt a cast in progress. Only valid from CASTING — an
    /// EXECUTING skill has already committed its effect and cannot be
    /// taken back. Forces COOLDOWN at half the normal cooldown and
    /// returns the "break" signal.
    pub fn interrupt(&mut self, full_cooldown: f32) -> bool {
        if self.phase != SkillPhase::Casting {
            return false;
        }
        self.phase = SkillPhase::Cooldown;
        self.cast_remaining = 0.0;
        self.cooldown_remaining = full_cooldown * INTERRUPTED_COOLDOWN_FACTOR;
        self.target_angle = None;
        true
    }

    /// Tick the cooldown timer, returning to READY at zero.
    pub fn update_cooldown(&mut self, dt: f32) {
        if self.phase != SkillPhase::Cooldown {
            return;
        }
        self.cooldown_remaining -= dt;
        if self.cooldown_remaining <= 0.0 {
            self.cooldown_remaining = 0.0;
            self.phase = SkillPhase::Ready;
        }
    }

    /// Force READY and zero all timers. Used on (re)spawn and on boss
    /// phase transitions.
    pub fn reset(&mut self) {
        *self = SkillSlotState::default();
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, SkillPhase::Casting | SkillPhase::Executing)
    }
}

/// How a combatant's slots may overlap in time.
///
/// Players run a single global skill-lock: one cast or execution at a
/// time, and movement is suppressed while it runs. Bosses weave several
/// patterns at once, admitted highest-priority first up to a cap.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ConcurrencyPolicy {
    Exclusive,
    ParallelWithPriority { max_active: usize },
}

/// The set of (slot → skill) assignments active for the current phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    pub slots: [Option<SkillId>; SKILL_SLOT_COUNT],
}

impl Loadout {
    pub fn new(assignments: &[(SkillSlot, SkillId)]) -> Self {
        let mut slots = [None; SKILL_SLOT_COUNT];
        for (slot, skill) in assignments {
            slots[slot.index()] = Some(*skill);
        }
        Self { slots }
    }

    pub fn skill(&self, slot: SkillSlot) -> Option<SkillId> {
        self.slots[slot.index()]
    }
}

/// Per-combatant skill machinery: fixed slot array, current loadout,
/// concurrency policy.
#[derive(Component, Clone, Debug)]
pub struct SkillSet {
    pub slots: [SkillSlotState; SKILL_SLOT_COUNT],
    pub loadout: Loadout,
    pub policy: ConcurrencyPolicy,
}

impl SkillSet {
    pub fn new(policy: ConcurrencyPolicy, loadout: Loadout) -> Self {
        Self {
            slots: Default::default(),
            loadout,
            policy,
        }
    }

    pub fn slot(&self, slot: SkillSlot) -> &SkillSlotState {
        &self.slots[slot.index()]
    }

    pub fn slot_mut(&mut self, slot: SkillSlot) -> &mut SkillSlotState {
        &mut self.slots[slot.index()]
    }

    pub fn busy_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_busy()).count()
    }

    pub fn any_busy(&self) -> bool {
        self.slots.iter().any(|s| s.is_busy())
    }

    /// Whether the concurrency policy admits starting another cast now.
    pub fn can_admit_cast(&self) -> bool {
        match self.policy {
            ConcurrencyPolicy::Exclusive => !self.any_busy(),
            ConcurrencyPolicy::ParallelWithPriority { max_active } => {
                self.busy_count() < max_active
            }
        }
    }

    /// Policy-gated cast start. Returns false when the slot is not
    /// READY, has no skill assigned, or the policy rejects a new cast.
    pub fn try_start(&mut self, slot: SkillSlot, cast_time: f32, angle: Option<f32>) -> bool {
        if self.loadout.skill(slot).is_none() || !self.can_admit_cast() {
            return false;
        }
        self.slots[slot.index()].start(cast_time, angle)
    }

    /// Interrupt every casting slot, looking up each slot's full
    /// cooldown through `full_cooldown`. Returns true if any cast was
    /// actually broken.
    pub fn interrupt_all<F>(&mut self, full_cooldown: F) -> bool
    where
        F: Fn(SkillSlot) -> f32,
    {
        let mut broke = false;
        for slot in SkillSlot::ALL {
            if self.slots[slot.index()].interrupt(full_cooldown(slot)) {
                broke = true;
            }
        }
        broke
    }

    /// Swap the active loadout and force every slot back to READY.
    /// Used on boss phase transitions and respawns.
    pub fn assign(&mut self, loadout: Loadout) {
        self.loadout = loadout;
        self.reset_all();
    }

    pub fn reset_all(&mut self) {
        for state in self.slots.iter_mut() {
            state.reset();
        }
    }
}
