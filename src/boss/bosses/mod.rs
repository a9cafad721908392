//! Boss Roster
//!
//! One module per boss. Each exposes a unit struct implementing
//! `BossBehavior`; `BossKind` is the only place that knows the full
//! roster.

mod ember_sentinel;
mod frost_revenant;

pub use ember_sentinel::EmberSentinel;
pub use frost_revenant::FrostRevenant;
