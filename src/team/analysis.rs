//! # Team Composition Analysis
//!
//! Defensive and offensive type coverage, speed tiers and role
//! distribution across a team.

use crate::engine::type_chart::type_effectiveness;
use crate::pokemon::Team;
use crate::stats::calculate_all_stats;
use crate::types::PokemonType;
use std::collections::BTreeMap;

/// Per-type defensive tally across the team.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefensiveCoverage {
    /// Attacking type -> members hit super effectively.
    pub weaknesses: BTreeMap<String, Vec<String>>,
    /// Attacking type -> members resisting it.
    pub resistances: BTreeMap<String, Vec<String>>,
    /// Attacking type -> members immune to it.
    pub immunities: BTreeMap<String, Vec<String>>,
    /// Types hitting three or more members super effectively.
    pub major_weaknesses: Vec<String>,
    /// Types nobody on the team resists or is immune to.
    pub unresisted_types: Vec<String>,
}

/// Tally how every attacking type lands on the team.
pub fn analyze_defensive_coverage(team: &Team) -> DefensiveCoverage {
    let mut coverage = DefensiveCoverage::default();

    for attacking in PokemonType::all_types() {
        let label = attacking.display_name().to_string();
        for member in &team.members {
            let eff = type_effectiveness(attacking, &member.types);
            if eff.is_immune() {
                coverage.immunities.entry(label.clone()).or_default().push(member.name.clone());
            } else if eff.is_resisted() {
                coverage.resistances.entry(label.clone()).or_default().push(member.name.clone());
            } else if eff.is_super_effective() {
                coverage.weaknesses.entry(label.clone()).or_default().push(member.name.clone());
            }
        }
    }

    coverage.major_weaknesses = coverage
        .weaknesses
        .iter()
        .filter(|(_, members)| members.len() >= 3)
        .map(|(t, _)| t.clone())
        .collect();

    coverage.unresisted_types = PokemonType::all_types()
        .iter()
        .map(|t| t.display_name().to_string())
        .filter(|t| !coverage.resistances.contains_key(t) && !coverage.immunities.contains_key(t))
        .collect();

    coverage
}

/// STAB-based offensive coverage: which defending types the team hits
/// super effectively with at least one member's typing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffensiveCoverage {
    /// Defending type -> members whose STAB hits it super effectively.
    pub super_effective: BTreeMap<String, Vec<String>>,
    /// Defending types with no super-effective STAB on the team.
    pub uncovered: Vec<String>,
}

pub fn analyze_offensive_coverage(team: &Team) -> OffensiveCoverage {
    let mut coverage = OffensiveCoverage::default();

    for defending in PokemonType::all_types() {
        let label = defending.display_name().to_string();
        for member in &team.members {
            let hits = member
                .types
                .iter()
                .any(|stab| type_effectiveness(*stab, &[defending]).is_super_effective());
            if hits {
                coverage.super_effective.entry(label.clone()).or_default().push(member.name.clone());
            }
        }
    }

    coverage.uncovered = PokemonType::all_types()
        .iter()
        .map(|t| t.display_name().to_string())
        .filter(|t| !coverage.super_effective.contains_key(t))
        .collect();

    coverage
}

/// Role tallies derived from base stats and final speeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleBreakdown {
    pub physical_attackers: Vec<String>,
    pub special_attackers: Vec<String>,
    pub mixed_attackers: Vec<String>,
    pub trick_room_candidates: Vec<String>,
}

pub fn analyze_roles(team: &Team) -> RoleBreakdown {
    let mut roles = RoleBreakdown::default();

    for member in &team.members {
        let base = &member.base_stats;
        let ratio = base.attack as f64 / base.special_attack.max(1) as f64;
        if ratio > 1.3 {
            roles.physical_attackers.push(member.name.clone());
        } else if ratio < 0.77 {
            roles.special_attackers.push(member.name.clone());
        } else {
            roles.mixed_attackers.push(member.name.clone());
        }

        let stats = calculate_all_stats(member);
        if stats.speed < 60 {
            roles.trick_room_candidates.push(member.name.clone());
        }
    }

    roles
}
