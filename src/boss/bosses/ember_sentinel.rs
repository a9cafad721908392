//! Ember Sentinel
//!
//! Three-phase fire boss. Opens with close-range crescent arcs and
//! radial bursts, then escalates through two spell cards: an expanding
//! molten halo with seekers, and a final wall-of-fire barrage.

use bevy::prelude::*;

use crate::boss::behavior::{BossBehavior, BossTickContext, BossTickOutput};
use crate::boss::phase::{BossPhase, PhaseKind};
use crate::combat::skill_config::SkillId;
use crate::combat::skills::{Loadout, SkillSlot};

const ORBIT_CENTER: Vec2 = Vec2::new(0.0, 120.0);
const ORBIT_SPEED: f32 = 70.0;

pub struct EmberSentinel;

impl BossBehavior for EmberSentinel {
    fn phases(&self) -> Vec<BossPhase> {
        vec![
            BossPhase {
                name: "Ashen Skirmish",
                kind: PhaseKind::Normal,
                hp: 500,
            },
            BossPhase {
                name: "Spell Card: Molten Halo",
                kind: PhaseKind::SpellCard,
                hp: 700,
            },
            BossPhase {
                name: "Spell Card: Pyre Unending",
                kind: PhaseKind::SpellCard,
                hp: 900,
            },
        ]
    }

    fn initial_loadout(&self) -> Loadout {
        self.on_phase_change(0)
    }

    fn on_phase_change(&self, phase_index: usize) -> Loadout {
        match phase_index {
            0 => Loadout::new(&[
                (SkillSlot::Primary, SkillId::CrescentSlash),
                (SkillSlot::Secondary, SkillId::EmberBurst),
            ]),
            1 => Loadout::new(&[
                (SkillSlot::Primary, SkillId::MoltenRing),
                (SkillSlot::Secondary, SkillId::CinderSeeker),
            ]),
            _ => Loadout::new(&[
                (SkillSlot::Primary, SkillId::FlameWall),
                (SkillSlot::Secondary, SkillId::MoltenRing),
                (SkillSlot::Tertiary, SkillId::EmberBurst),
            ]),
        }
    }

    fn tick(&self, ctx: &mut BossTickContext) -> BossTickOutput {
        let mut output = BossTickOutput::default();

        // Orbit the upper arena; the final card slows to a crawl so the
        // fire walls stay readable.
        let offset = ctx.self_pos - ORBIT_CENTER;
        let tangent = Vec2::new(-offset.y, offset.x).normalize_or_zero();
        let speed = if ctx.phase_index == 2 {
            ORBIT_SPEED * 0.4
        } else {
            ORBIT_SPEED
        };
        let corrective = (ORBIT_CENTER + offset.normalize_or_zero() * 90.0 - ctx.self_pos) * 0.8;
        output.velocity = tangent * speed + corrective;

        match ctx.phase_index {
            0 => {
                // Slash when the player is close enough to threaten.
                if ctx
                    .player_pos
                    .is_some_and(|p| p.distance(ctx.self_pos) < 260.0)
                {
                    output.casts.push(SkillSlot::Primary);
                }
                output.casts.push(SkillSlot::Secondary);
            }
            1 => {
                output.casts.push(SkillSlot::Primary);
                output.casts.push(SkillSlot::Secondary);
            }
            _ => {
                output.casts.push(SkillSlot::Primary);
                output.casts.push(SkillSlot::Secondary);
                output.casts.push(SkillSlot::Tertiary);
            }
        }
        output
    }
}
