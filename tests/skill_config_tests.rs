//! Unit tests for skill definitions
//!
//! These tests verify that:
//! - All skills load from the RON config and have valid values
//! - Timings and cooldowns are sane
//! - Geometry is assigned consistently (lasers are fixed, rings radial)
//! - Crits are restricted to the player's auto-shot

use bossrush::combat::skill_config::{
    load_skill_book, MotionSpec, ShapeSpec, SkillBook, SkillId,
};

/// Get all skill ids for exhaustive testing
fn all_skills() -> Vec<SkillId> {
    vec![
        SkillId::AutoShot,
        SkillId::SpreadShot,
        SkillId::NovaPulse,
        SkillId::LungeSlash,
        SkillId::AcidSpit,
        SkillId::FrostShards,
        SkillId::IceLance,
        SkillId::GlacialRing,
        SkillId::PrismLaser,
        SkillId::CrescentSlash,
        SkillId::EmberBurst,
        SkillId::CinderSeeker,
        SkillId::MoltenRing,
        SkillId::FlameWall,
    ]
}

fn load_book() -> SkillBook {
    load_skill_book().expect("skills.ron should load")
}

// =============================================================================
// Definition Validation Tests
// =============================================================================

#[test]
fn test_all_skills_have_names() {
    let book = load_book();
    for skill in all_skills() {
        let config = book.get_unchecked(skill);
        assert!(!config.name.is_empty(), "{:?} should have a name", skill);
    }
}

#[test]
fn test_all_skills_have_valid_timings() {
    let book = load_book();
    for skill in all_skills() {
        let config = book.get_unchecked(skill);
        assert!(
            config.cast_time >= 0.0,
            "{:?} cast_time must be non-negative",
            skill
        );
        assert!(
            config.execution_time >= 0.0,
            "{:?} execution_time must be non-negative",
            skill
        );
        assert!(config.cooldown > 0.0, "{:?} needs a cooldown", skill);
    }
}

#[test]
fn test_all_skills_deal_damage() {
    let book = load_book();
    for skill in all_skills() {
        let config = book.get_unchecked(skill);
        assert!(config.is_damage(), "{:?} should deal damage", skill);
        assert!(config.spawns_projectiles(), "{:?} needs a projectile", skill);
    }
}

#[test]
fn test_only_auto_shot_crits() {
    let book = load_book();
    for skill in all_skills() {
        let config = book.get_unchecked(skill);
        assert_eq!(
            config.can_crit,
            skill == SkillId::AutoShot,
            "{:?} crit flag is wrong",
            skill
        );
    }
}

#[test]
fn test_moving_projectiles_have_speed_and_lifetime_budget() {
    let book = load_book();
    for skill in all_skills() {
        let projectile = book.get_unchecked(skill).projectile.unwrap();
        match projectile.motion {
            MotionSpec::Straight | MotionSpec::Homing => {
                assert!(projectile.speed > 0.0, "{:?} needs a speed", skill);
                assert!(
                    projectile.range > 0.0 || projectile.lifetime > 0.0,
                    "{:?} needs a range or lifetime",
                    skill
                );
            }
            MotionSpec::Ring { .. } => {
                assert!(projectile.lifetime > 0.0, "{:?} needs a lifetime", skill);
                assert!(projectile.radial, "{:?} rings fire radially", skill);
            }
            MotionSpec::Fixed => {}
        }
    }
}

#[test]
fn test_lasers_are_fixed_in_place() {
    let book = load_book();
    for skill in all_skills() {
        let projectile = book.get_unchecked(skill).projectile.unwrap();
        if matches!(projectile.shape, ShapeSpec::Laser { .. }) {
            assert_eq!(
                projectile.motion,
                MotionSpec::Fixed,
                "{:?} lasers do not travel",
                skill
            );
            // Fixed shapes live for the execution window.
            assert!(
                book.get_unchecked(skill).execution_time > 0.0,
                "{:?} needs an execution window",
                skill
            );
        }
    }
}

#[test]
fn test_boss_skills_carry_arbitration_priority() {
    let book = load_book();
    let boss_skills = [
        SkillId::FrostShards,
        SkillId::IceLance,
        SkillId::GlacialRing,
        SkillId::PrismLaser,
        SkillId::CrescentSlash,
        SkillId::EmberBurst,
        SkillId::CinderSeeker,
        SkillId::MoltenRing,
        SkillId::FlameWall,
    ];
    for skill in boss_skills {
        assert!(
            book.get_unchecked(skill).priority > 0,
            "{:?} needs a priority for parallel arbitration",
            skill
        );
    }
}

#[test]
fn test_validate_reports_complete_book() {
    let book = load_book();
    assert!(book.validate().is_ok());
    assert_eq!(book.len(), all_skills().len());
}
