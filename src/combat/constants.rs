//! Combat Constants
//!
//! Tuning values shared across the combat simulation. Skill- and
//! phase-specific numbers live in `assets/config/skills.ron` and in the
//! boss behavior tables; only cross-cutting mechanics belong here.

/// Damage multiplier applied to a critical auto-shot before mitigation.
pub const CRIT_DAMAGE_MULTIPLIER: f32 = 2.0;

/// Fraction of the normal cooldown a skill is placed on when its cast
/// is interrupted (a "break").
pub const INTERRUPTED_COOLDOWN_FACTOR: f32 = 0.5;

/// Seconds a projectile spawned outside the play area is protected from
/// culling, so formation rows spawned off-area have time to arrive.
pub const OFFSCREEN_SPAWN_GRACE: f32 = 2.0;

/// Distance (units) a projectile that has entered the play area must
/// travel past the boundary before it may be culled. Prevents premature
/// removal of fast or large projectiles still crossing the edge.
pub const OFFSCREEN_MIN_TRAVEL: f32 = 300.0;

/// Extra padding around the play area before a projectile counts as
/// "far outside" for culling purposes.
pub const CULL_MARGIN: f32 = 96.0;

/// Seconds between a boss phase's HP reaching zero and the next phase
/// starting. Stands in for the cutscene choreography the presentation
/// layer drives in the full game.
pub const PHASE_TRANSITION_DELAY: f32 = 1.5;

/// Fixed simulation timestep used by the headless runner (60 Hz).
pub const SIM_DT: f32 = 1.0 / 60.0;

/// Default bound on simultaneously live projectiles.
pub const DEFAULT_PROJECTILE_CAPACITY: usize = 2048;

/// Maximum number of skill slots per combatant.
pub const SKILL_SLOT_COUNT: usize = 4;
