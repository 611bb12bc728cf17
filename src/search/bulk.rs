//! # Bulk Optimization & Spread Audits
//!
//! Effective bulk is HP x Defense. The optimizer walks HP/Def/SpD
//! breakpoints inside a budget and maximizes the weighted product; the
//! audit flags wasted EVs and nature conflicts; the role presets give
//! conventional starting spreads.

use crate::config::{normalize_evs, EV_BREAKPOINTS_LV50, MAX_STAT_EVS, MAX_TOTAL_EVS};
use crate::pokemon::{BaseStats, EvSpread, PokemonBuild};
use crate::stats::{calculate_hp, calculate_stat};
use crate::types::{Nature, Stat};

/// An optimized bulk allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkSpread {
    pub hp_evs: u16,
    pub def_evs: u16,
    pub spd_evs: u16,
    pub final_hp: u16,
    pub final_def: u16,
    pub final_spd: u16,
    pub physical_bulk: u64,
    pub special_bulk: u64,
}

/// Distribute `total_bulk_evs` over HP/Def/SpD maximizing
/// `HP*Def*weight + HP*SpD*(1-weight)`. A weight of 1.0 optimizes
/// purely physical bulk, 0.0 purely special.
pub fn optimize_bulk(
    base: &BaseStats,
    nature: Nature,
    level: u8,
    total_bulk_evs: u16,
    defense_weight: f64,
) -> BulkSpread {
    let mut best: Option<(f64, BulkSpread)> = None;

    for &hp_ev in &EV_BREAKPOINTS_LV50 {
        if hp_ev > MAX_STAT_EVS.min(total_bulk_evs) {
            break;
        }
        let remaining = total_bulk_evs - hp_ev;
        for &def_ev in &EV_BREAKPOINTS_LV50 {
            if def_ev > MAX_STAT_EVS.min(remaining) {
                break;
            }
            let spd_ev = normalize_evs(remaining - def_ev);

            let hp = calculate_hp(base.hp, 31, hp_ev, level);
            let def = calculate_stat(base.defense, 31, def_ev, level, nature, Stat::Defense);
            let spd = calculate_stat(base.special_defense, 31, spd_ev, level, nature, Stat::SpecialDefense);

            let physical_bulk = hp as u64 * def as u64;
            let special_bulk = hp as u64 * spd as u64;
            let score =
                physical_bulk as f64 * defense_weight + special_bulk as f64 * (1.0 - defense_weight);

            if best.as_ref().is_none_or(|(s, _)| score > *s) {
                best = Some((
                    score,
                    BulkSpread {
                        hp_evs: hp_ev,
                        def_evs: def_ev,
                        spd_evs: spd_ev,
                        final_hp: hp,
                        final_def: def,
                        final_spd: spd,
                        physical_bulk,
                        special_bulk,
                    },
                ));
            }
        }
    }

    best.expect("breakpoint grid always yields a candidate").1
}

/// Result of a spread-efficiency audit.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadAudit {
    pub total_evs: u16,
    pub remaining_evs: u16,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub is_valid: bool,
}

/// Audit a spread for wasted EVs (off-breakpoint values), budget misuse
/// and investment into a nature-lowered attacking stat.
pub fn spread_efficiency(build: &PokemonBuild) -> SpreadAudit {
    let evs = &build.evs;
    let total = evs.total();
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    if total > MAX_TOTAL_EVS {
        issues.push(format!("Total EVs ({}) exceed maximum of {}", total, MAX_TOTAL_EVS));
    } else if total < MAX_TOTAL_EVS {
        suggestions.push(format!("You have {} EVs remaining to allocate", MAX_TOTAL_EVS - total));
    }

    for stat in Stat::all() {
        let value = evs.get(stat);
        if value != normalize_evs(value) {
            issues.push(format!(
                "{}: {} wasted EVs (same stat as {})",
                stat.display_name(),
                value - normalize_evs(value),
                normalize_evs(value),
            ));
        }
    }

    let (_, lowered) = build.nature.effect();
    if !build.nature.is_neutral() {
        if lowered == Stat::Attack && evs.attack > 0 {
            suggestions.push(format!(
                "Investing in Attack with -Atk {}. Consider a neutral or +Atk nature.",
                build.nature,
            ));
        }
        if lowered == Stat::SpecialAttack && evs.special_attack > 0 {
            suggestions.push(format!(
                "Investing in Sp. Atk with -SpA {}. Consider a neutral or +SpA nature.",
                build.nature,
            ));
        }
    }

    SpreadAudit {
        total_evs: total,
        remaining_evs: MAX_TOTAL_EVS.saturating_sub(total),
        is_valid: total <= MAX_TOTAL_EVS && issues.is_empty(),
        issues,
        suggestions,
    }
}

/// Conventional team-building roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Offensive,
    Bulky,
    BulkyOffense,
    Support,
}

/// A conventional starting spread for a role, picking the stronger
/// attacking side from base stats. Offensive spreads can trim Speed to a
/// target and bank the savings in HP.
pub fn suggest_spread(base: &BaseStats, role: Role, speed_target: Option<u16>) -> (Nature, EvSpread) {
    let physical = base.is_physical_attacker();

    let (nature, mut evs) = match role {
        Role::Offensive => {
            let nature = if physical { Nature::Jolly } else { Nature::Timid };
            let mut evs = EvSpread { speed: 252, special_defense: 4, ..Default::default() };
            if physical {
                evs.attack = 252;
            } else {
                evs.special_attack = 252;
            }
            (nature, evs)
        }
        Role::Bulky => {
            let nature = if base.special_defense > base.defense { Nature::Calm } else { Nature::Bold };
            (nature, EvSpread { hp: 252, defense: 124, special_defense: 132, ..Default::default() })
        }
        Role::BulkyOffense => {
            let nature = if physical { Nature::Adamant } else { Nature::Modest };
            let mut evs = EvSpread { hp: 252, special_defense: 4, ..Default::default() };
            if physical {
                evs.attack = 252;
            } else {
                evs.special_attack = 252;
            }
            (nature, evs)
        }
        Role::Support => (Nature::Bold, EvSpread { hp: 252, defense: 252, special_defense: 4, ..Default::default() }),
    };

    if role == Role::Offensive {
        if let Some(target) = speed_target {
            if let Some(needed) = crate::stats::find_speed_evs(base.speed, target, nature, 50) {
                if needed < 252 {
                    evs.speed = needed;
                    evs.hp = normalize_evs(252 - needed);
                }
            }
        }
    }

    (nature, evs)
}
