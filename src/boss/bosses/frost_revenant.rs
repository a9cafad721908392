//! Frost Revenant
//!
//! Two-phase ice boss. The opener pressures with shard fans and homing
//! lances; the spell card switches to expanding rings and a sweeping
//! prism laser while a thinner shard fan keeps the player moving.

use bevy::prelude::*;

use crate::boss::behavior::{BossBehavior, BossTickContext, BossTickOutput};
use crate::boss::phase::{BossPhase, PhaseKind};
use crate::combat::skill_config::SkillId;
use crate::combat::skills::{Loadout, SkillSlot};

/// Where the revenant hovers while fighting.
const ANCHOR: Vec2 = Vec2::new(0.0, 160.0);
const DRIFT_SPEED: f32 = 55.0;
const LANCE_RANGE: f32 = 220.0;

pub struct FrostRevenant;

impl BossBehavior for FrostRevenant {
    fn phases(&self) -> Vec<BossPhase> {
        vec![
            BossPhase {
                name: "Rimebound Advance",
                kind: PhaseKind::Normal,
                hp: 600,
            },
            BossPhase {
                name: "Spell Card: Diamond Dust",
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
                (SkillSlot::Primary, SkillId::FrostShards),
                (SkillSlot::Secondary, SkillId::IceLance),
            ]),
            _ => Loadout::new(&[
                (SkillSlot::Primary, SkillId::GlacialRing),
                (SkillSlot::Secondary, SkillId::PrismLaser),
                (SkillSlot::Tertiary, SkillId::FrostShards),
            ]),
        }
    }

    fn tick(&self, ctx: &mut BossTickContext) -> BossTickOutput {
        let mut output = BossTickOutput::default();

        // Drift back to the anchor, strafing side to side; the spell
        // card plants itself so the rings stay centered.
        let strafe = if ctx.phase_index == 0 {
            Vec2::new((ctx.time * 0.8).sin() * DRIFT_SPEED, 0.0)
        } else {
            Vec2::ZERO
        };
        let homeward = (ANCHOR - ctx.self_pos) * 0.6;
        output.velocity = homeward + strafe;

        match ctx.phase_index {
            0 => {
                output.casts.push(SkillSlot::Primary);
                // Lances only punish a player keeping their distance.
                if ctx
                    .player_pos
                    .is_some_and(|p| p.distance(ctx.self_pos) > LANCE_RANGE)
                {
                    output.casts.push(SkillSlot::Secondary);
                }
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
