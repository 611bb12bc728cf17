//! # Stat Calculator
//!
//! Final-stat computation from base stats, IVs, EVs, level and nature.
//!
//! HP:    floor((2B + I + floor(E/4)) * L / 100) + L + 10
//! Other: floor((floor((2B + I + floor(E/4)) * L / 100) + 5) * N)
//!
//! The nature multiplier N is applied as integer math (x * 11 / 10 or
//! x * 9 / 10, truncating) so stat values are exact.

use crate::config::{DEFAULT_LEVEL, EV_BREAKPOINTS_LV50};
use crate::pokemon::PokemonBuild;
use crate::types::{Nature, Stat};

/// All six final stats of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl FinalStats {
    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.special_attack,
            Stat::SpecialDefense => self.special_defense,
            Stat::Speed => self.speed,
        }
    }
}

/// HP stat formula.
pub fn calculate_hp(base: u8, iv: u8, ev: u16, level: u8) -> u16 {
    let base = base as u32;
    let iv = iv as u32;
    let ev = ev as u32;
    let level = level as u32;
    ((2 * base + iv + ev / 4) * level / 100 + level + 10) as u16
}

/// Non-HP stat formula with a nature multiplier.
pub fn calculate_stat(base: u8, iv: u8, ev: u16, level: u8, nature: Nature, stat: Stat) -> u16 {
    let base = base as u32;
    let iv = iv as u32;
    let ev = ev as u32;
    let level = level as u32;
    let raw = (2 * base + iv + ev / 4) * level / 100 + 5;

    let (up, down) = nature.effect();
    if up == down {
        raw as u16
    } else if stat == up {
        (raw * 11 / 10) as u16
    } else if stat == down {
        (raw * 9 / 10) as u16
    } else {
        raw as u16
    }
}

/// All six final stats for a build.
pub fn calculate_all_stats(build: &PokemonBuild) -> FinalStats {
    let b = &build.base_stats;
    FinalStats {
        hp: calculate_hp(b.hp, build.ivs.hp, build.evs.hp, build.level),
        attack: calculate_stat(b.attack, build.ivs.attack, build.evs.attack, build.level, build.nature, Stat::Attack),
        defense: calculate_stat(b.defense, build.ivs.defense, build.evs.defense, build.level, build.nature, Stat::Defense),
        special_attack: calculate_stat(
            b.special_attack, build.ivs.special_attack, build.evs.special_attack,
            build.level, build.nature, Stat::SpecialAttack,
        ),
        special_defense: calculate_stat(
            b.special_defense, build.ivs.special_defense, build.evs.special_defense,
            build.level, build.nature, Stat::SpecialDefense,
        ),
        speed: calculate_stat(b.speed, build.ivs.speed, build.evs.speed, build.level, build.nature, Stat::Speed),
    }
}

/// The fastest a species gets at level 50: +Speed nature, 252 EVs, 31 IVs.
pub fn max_speed(base_speed: u8) -> u16 {
    calculate_stat(base_speed, 31, 252, DEFAULT_LEVEL, Nature::Timid, Stat::Speed)
}

/// Smallest EV breakpoint putting Speed at or above `target`, or None if
/// 252 EVs cannot reach it.
pub fn find_speed_evs(base_speed: u8, target: u16, nature: Nature, level: u8) -> Option<u16> {
    EV_BREAKPOINTS_LV50
        .iter()
        .copied()
        .find(|&ev| calculate_stat(base_speed, 31, ev, level, nature, Stat::Speed) >= target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::{BaseStats, EvSpread};
    use crate::types::PokemonType;

    #[test]
    fn test_hp_formula_level_50() {
        // Incineroar, 95 base HP, 31 IV, 252 EV: (190+31+63)*50/100 + 60 = 202.
        assert_eq!(calculate_hp(95, 31, 252, 50), 202);
        // Uninvested: (190+31)*50/100 + 60 = 170.
        assert_eq!(calculate_hp(95, 31, 0, 50), 170);
    }

    #[test]
    fn test_stat_formula_with_nature() {
        // Entei, 115 base Attack, Adamant, 252 EVs:
        // (230+31+63)*50/100 + 5 = 167; 167 * 1.1 = 183.
        assert_eq!(calculate_stat(115, 31, 252, 50, Nature::Adamant, Stat::Attack), 183);
        // Neutral on the same line: 167.
        assert_eq!(calculate_stat(115, 31, 252, 50, Nature::Serious, Stat::Attack), 167);
        // Lowered: 167 * 0.9 = 150.
        assert_eq!(calculate_stat(115, 31, 252, 50, Nature::Timid, Stat::Attack), 150);
    }

    #[test]
    fn test_max_speed() {
        // Base 100 speed: (200+31+63)*50/100 + 5 = 152; +nature = 167.
        assert_eq!(max_speed(100), 167);
    }

    #[test]
    fn test_find_speed_evs() {
        // Entei (base 100) reaching 137 with a neutral nature needs 132 EVs.
        assert_eq!(find_speed_evs(100, 137, Nature::Adamant, 50), Some(132));
        // Already there at 0 EVs: neutral base-100 speed is 120.
        assert_eq!(find_speed_evs(100, 120, Nature::Adamant, 50), Some(0));
        // Unreachable target.
        assert_eq!(find_speed_evs(100, 200, Nature::Timid, 50), None);
    }

    #[test]
    fn test_stats_bounded_by_invested_max() {
        let base = BaseStats { hp: 80, attack: 120, defense: 84, special_attack: 60, special_defense: 96, speed: 110 };
        let uninvested = PokemonBuild::new("ogerpon", base, vec![PokemonType::Grass]);
        let invested = PokemonBuild::new("ogerpon", base, vec![PokemonType::Grass])
            .with_nature(Nature::Jolly)
            .with_evs(EvSpread { speed: 252, ..Default::default() });
        let low = calculate_all_stats(&uninvested);
        let high = calculate_all_stats(&invested);
        assert!(low.speed < high.speed);
        assert_eq!(high.speed, max_speed(base.speed));
    }
}
