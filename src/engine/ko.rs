//! # KO Classification
//!
//! Exact KO probabilities over the 16-roll damage distribution. Each
//! roll is independent and uniform, so an n-hit KO chance is the share
//! of the 16^n ordered roll sequences whose sum reaches the defender's
//! HP. Exact up to 4 hits; anything beyond classifies as "5+ HKO".

use crate::config::DAMAGE_ROLL_COUNT;

/// Exact KO probability analysis for a damage distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct KoProbability {
    pub ohko_chance: f64,
    pub twohko_chance: f64,
    pub threehko_chance: f64,
    pub fourhko_chance: f64,
    /// 1 = OHKO, 2 = 2HKO ... None when even four min rolls fall short.
    pub guaranteed_ko: Option<u8>,
    pub rolls_that_ohko: usize,
    pub verdict: String,
}

/// Count the ordered n-sequences of `rolls` whose sum reaches `hp`,
/// convolving the sum distribution instead of enumerating 16^n tuples.
fn ko_combinations(rolls: &[u32], hp: u32, hits: u32) -> (u64, u64) {
    // distribution: sum -> number of ordered sequences reaching it,
    // with overshoot collapsed into the `hp` bucket.
    let mut distribution: Vec<(u32, u64)> = vec![(0, 1)];
    for _ in 0..hits {
        let mut next: std::collections::BTreeMap<u32, u64> = std::collections::BTreeMap::new();
        for &(sum, count) in &distribution {
            for &roll in rolls {
                let key = (sum + roll).min(hp);
                *next.entry(key).or_insert(0) += count;
            }
        }
        distribution = next.into_iter().collect();
    }
    let total: u64 = (rolls.len() as u64).pow(hits);
    let reached: u64 = distribution
        .iter()
        .filter(|&&(sum, _)| sum >= hp)
        .map(|&(_, count)| count)
        .sum();
    (reached, total)
}

/// Exact OHKO..=4HKO probabilities for a single-hit damage distribution.
pub fn ko_probability(rolls: &[u32; DAMAGE_ROLL_COUNT], defender_hp: u16) -> KoProbability {
    let hp = defender_hp as u32;
    let ohko_count = rolls.iter().filter(|&&r| r >= hp).count();

    let chance = |hits: u32| -> f64 {
        let (reached, total) = ko_combinations(rolls, hp, hits);
        reached as f64 / total as f64 * 100.0
    };

    let ohko_chance = ohko_count as f64 / DAMAGE_ROLL_COUNT as f64 * 100.0;
    let twohko_chance = chance(2);
    let threehko_chance = chance(3);
    let fourhko_chance = chance(4);

    let min_damage = rolls[0];
    let guaranteed_ko = if min_damage >= hp {
        Some(1)
    } else if min_damage * 2 >= hp {
        Some(2)
    } else if min_damage * 3 >= hp {
        Some(3)
    } else if min_damage * 4 >= hp {
        Some(4)
    } else {
        None
    };

    let verdict = format_verdict(
        ohko_chance,
        twohko_chance,
        threehko_chance,
        fourhko_chance,
        guaranteed_ko,
    );

    KoProbability {
        ohko_chance,
        twohko_chance,
        threehko_chance,
        fourhko_chance,
        guaranteed_ko,
        rolls_that_ohko: ohko_count,
        verdict,
    }
}

/// KO probability for a multi-hit move: each of the `hit_count` strikes
/// rolls independently, so the single-use KO chance spans 16^k ordered
/// combinations of the per-hit damage values.
pub fn multi_hit_ko_probability(
    damages_per_hit: &[u32; DAMAGE_ROLL_COUNT],
    hit_count: u8,
    defender_hp: u16,
) -> KoProbability {
    let hp = defender_hp as u32;
    let (reached, total) = ko_combinations(damages_per_hit, hp, hit_count as u32);
    let ohko_chance = reached as f64 / total as f64 * 100.0;
    let guaranteed = reached == total;

    let verdict = if guaranteed || ohko_chance >= 99.9 {
        "Guaranteed OHKO".to_string()
    } else if ohko_chance > 0.0 {
        format!("{:.2}% chance to OHKO", ohko_chance)
    } else {
        "Does not KO".to_string()
    };

    KoProbability {
        ohko_chance,
        twohko_chance: 0.0,
        threehko_chance: 0.0,
        fourhko_chance: 0.0,
        guaranteed_ko: if guaranteed { Some(1) } else { None },
        rolls_that_ohko: reached as usize,
        verdict,
    }
}

fn format_verdict(
    ohko: f64,
    twohko: f64,
    threehko: f64,
    fourhko: f64,
    guaranteed: Option<u8>,
) -> String {
    if guaranteed == Some(1) || ohko >= 99.9 {
        "Guaranteed OHKO".into()
    } else if ohko > 0.0 {
        format!("{:.2}% chance to OHKO", ohko)
    } else if guaranteed == Some(2) || twohko >= 99.9 {
        "Guaranteed 2HKO".into()
    } else if twohko > 0.0 {
        format!("{:.2}% chance to 2HKO", twohko)
    } else if guaranteed == Some(3) || threehko >= 99.9 {
        "Guaranteed 3HKO".into()
    } else if threehko > 0.0 {
        format!("{:.2}% chance to 3HKO", threehko)
    } else if guaranteed == Some(4) || fourhko >= 99.9 {
        "Guaranteed 4HKO".into()
    } else if fourhko > 0.0 {
        format!("{:.2}% chance to 4HKO", fourhko)
    } else {
        "5+ HKO".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(damage: u32) -> [u32; DAMAGE_ROLL_COUNT] {
        [damage; DAMAGE_ROLL_COUNT]
    }

    #[test]
    fn test_guaranteed_ohko() {
        let analysis = ko_probability(&uniform(200), 150);
        assert_eq!(analysis.guaranteed_ko, Some(1));
        assert_eq!(analysis.ohko_chance, 100.0);
        assert_eq!(analysis.verdict, "Guaranteed OHKO");
    }

    #[test]
    fn test_partial_ohko() {
        // 4 of 16 rolls reach HP.
        let mut rolls = uniform(90);
        rolls[12..].copy_from_slice(&[100, 100, 100, 100]);
        let analysis = ko_probability(&rolls, 100);
        assert_eq!(analysis.rolls_that_ohko, 4);
        assert!((analysis.ohko_chance - 25.0).abs() < 1e-9);
        assert_eq!(analysis.verdict, "25.00% chance to OHKO");
    }

    #[test]
    fn test_guaranteed_2hko() {
        let analysis = ko_probability(&uniform(80), 150);
        assert_eq!(analysis.guaranteed_ko, Some(2));
        assert_eq!(analysis.twohko_chance, 100.0);
        assert_eq!(analysis.verdict, "Guaranteed 2HKO");
    }

    #[test]
    fn test_exact_2hko_combination_count() {
        // Half the rolls do 60, half do 40; HP 100. A 2HKO needs 60+60,
        // 60+40 or 40+60: 192 of 256 ordered pairs = 75%.
        let mut rolls = [40u32; DAMAGE_ROLL_COUNT];
        rolls[8..].copy_from_slice(&[60; 8]);
        let analysis = ko_probability(&rolls, 100);
        assert!((analysis.twohko_chance - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_five_plus_hko() {
        let analysis = ko_probability(&uniform(10), 200);
        assert_eq!(analysis.guaranteed_ko, None);
        assert_eq!(analysis.verdict, "5+ HKO");
    }

    #[test]
    fn test_multi_hit_all_or_nothing() {
        // Three hits of 40 against 100 HP always total 120.
        let analysis = multi_hit_ko_probability(&uniform(40), 3, 100);
        assert_eq!(analysis.guaranteed_ko, Some(1));
        assert_eq!(analysis.verdict, "Guaranteed OHKO");

        // Three hits of 30 against 100 HP never reach it.
        let analysis = multi_hit_ko_probability(&uniform(30), 3, 100);
        assert_eq!(analysis.verdict, "Does not KO");
    }
}
