//! Damage Resolution
//!
//! Stateless mitigation math. The formula is the classic
//! `raw * 100 / (100 + defense)` curve, floored, with a hard minimum of
//! one point per hit so no target is ever fully immune through armor.

use super::components::GameRng;
use super::constants::CRIT_DAMAGE_MULTIPLIER;

/// Mitigate `raw` damage against `defense`. Monotonically non-increasing
/// in defense, always at least 1.
pub fn resolve_damage(raw: i32, defense: i32) -> i32 {
    let defense = defense.max(0) as i64;
    let mitigated = raw.max(0) as i64 * 100 / (100 + defense);
    mitigated.max(1) as i32
}

/// Roll a critical strike check. Returns true if the roll is a crit.
pub fn roll_crit(crit_chance: f32, rng: &mut GameRng) -> bool {
    rng.random_f32() < crit_chance
}

/// Raw damage after an (optional) crit multiplier, before mitigation.
pub fn crit_adjusted_raw(raw: i32, is_crit: bool) -> i32 {
    if is_crit {
        (raw as f32 * CRIT_DAMAGE_MULTIPLIER) as i32
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_defense_passes_raw_through() {
        assert_eq!(resolve_damage(50, 0), 50);
    }

    #[test]
    fn hundred_defense_halves() {
        assert_eq!(resolve_damage(50, 100), 25);
    }

    #[test]
    fn floors_fractional_results() {
        // 10 * 100 / 130 = 7.69... -> 7
        assert_eq!(resolve_damage(10, 30), 7);
    }

    #[test]
    fn never_below_one() {
        assert_eq!(resolve_damage(1, 10_000), 1);
        assert_eq!(resolve_damage(0, 0), 1);
    }

    #[test]
    fn monotonically_non_increasing_in_defense() {
        let mut previous = i32::MAX;
        for defense in 0..500 {
            let dealt = resolve_damage(120, defense);
            assert!(
                dealt <= previous,
                "defense {defense}: {dealt} > {previous}"
            );
            assert!(dealt >= 1);
            previous = dealt;
        }
    }

    #[test]
    fn negative_defense_clamped() {
        assert_eq!(resolve_damage(50, -40), resolve_damage(50, 0));
    }

    #[test]
    fn crit_doubles_raw() {
        assert_eq!(crit_adjusted_raw(14, true), 28);
        assert_eq!(crit_adjusted_raw(14, false), 14);
    }

    #[test]
    fn crit_roll_is_deterministic_under_seed() {
        let mut a = GameRng::from_seed(7);
        let mut b = GameRng::from_seed(7);
        for _ in 0..64 {
            assert_eq!(roll_crit(0.25, &mut a), roll_crit(0.25, &mut b));
        }
    }
}
