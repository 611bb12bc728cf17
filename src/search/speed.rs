//! # Speed Benchmarks & Speed Control
//!
//! Minimum-EV speed searches and team analysis under Trick Room,
//! Tailwind, stat drops and paralysis.

use crate::engine::modifiers::apply_stage;
use crate::pokemon::Team;
use crate::stats::{calculate_all_stats, calculate_stat, find_speed_evs};
use crate::types::{Nature, Stat};

/// Smallest EV breakpoint that strictly outspeeds `target_speed`, or
/// None if unreachable at 252 EVs.
pub fn outspeed_evs(base_speed: u8, target_speed: u16, nature: Nature, level: u8) -> Option<u16> {
    find_speed_evs(base_speed, target_speed + 1, nature, level)
}

/// One team member's speed tier.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTier {
    pub name: String,
    pub base_speed: u8,
    pub final_speed: u16,
    pub nature: Nature,
    pub speed_evs: u16,
    /// Speed under the condition being analyzed (Tailwind, drops, ...).
    pub modified_speed: Option<u16>,
    pub notes: Vec<String>,
}

/// Final speeds of all team members, fastest first.
pub fn team_speed_tiers(team: &Team) -> Vec<SpeedTier> {
    let mut tiers: Vec<SpeedTier> = team
        .members
        .iter()
        .map(|member| {
            let stats = calculate_all_stats(member);
            SpeedTier {
                name: member.name.clone(),
                base_speed: member.base_stats.speed,
                final_speed: stats.speed,
                nature: member.nature,
                speed_evs: member.evs.speed,
                modified_speed: None,
                notes: Vec::new(),
            }
        })
        .collect();
    tiers.sort_by(|a, b| b.final_speed.cmp(&a.final_speed));
    tiers
}

/// Trick Room setters the analysis recognizes on a team sheet.
const TRICK_ROOM_SETTERS: &[&str] = &[
    "hatterene", "porygon2", "dusclops", "indeedee-female", "cresselia",
    "bronzong", "gothitelle", "armarouge", "farigiraf",
];

/// Tailwind setters the analysis recognizes.
const TAILWIND_SETTERS: &[&str] = &[
    "tornadus", "whimsicott", "talonflame", "murkrow", "suicune",
    "pelipper", "mandibuzz", "kilowattrel", "flamigo",
];

/// Team ordering and notes under one speed-control condition.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedControlAnalysis {
    pub condition: String,
    pub tiers: Vec<SpeedTier>,
    /// Member names in the order they act under the condition.
    pub move_order: Vec<String>,
    pub notes: Vec<String>,
}

/// Team performance under Trick Room: slowest acts first.
pub fn analyze_trick_room(team: &Team) -> SpeedControlAnalysis {
    let mut tiers = team_speed_tiers(team);
    tiers.sort_by_key(|t| t.final_speed);

    for tier in &mut tiers {
        if tier.final_speed <= 50 {
            tier.notes.push("Excellent TR Pokemon".into());
        } else if tier.final_speed <= 70 {
            tier.notes.push("Good TR Pokemon".into());
        } else if tier.final_speed >= 100 {
            tier.notes.push("Too fast for TR - consider not bringing".into());
        }
    }

    let mut notes = Vec::new();
    let slow_count = tiers.iter().filter(|t| t.final_speed <= 70).count();
    let fast_count = tiers.iter().filter(|t| t.final_speed >= 100).count();
    if slow_count >= 4 {
        notes.push("Team is well-suited for Trick Room".into());
    } else if slow_count >= 2 {
        notes.push("Team has some Trick Room options".into());
    } else {
        notes.push("Team lacks good Trick Room Pokemon".into());
    }
    if fast_count >= 3 {
        notes.push(format!("{} Pokemon are too fast for TR - consider mix mode", fast_count));
    }
    if !tiers.iter().any(|t| TRICK_ROOM_SETTERS.iter().any(|s| t.name.contains(s))) {
        notes.push("No obvious Trick Room setter on team".into());
    }

    SpeedControlAnalysis {
        condition: "Trick Room".into(),
        move_order: tiers.iter().map(|t| t.name.clone()).collect(),
        tiers,
        notes,
    }
}

/// Team performance with Tailwind up: everyone's Speed doubles.
pub fn analyze_tailwind(team: &Team) -> SpeedControlAnalysis {
    let mut tiers = team_speed_tiers(team);
    for tier in &mut tiers {
        tier.modified_speed = Some(tier.final_speed * 2);
    }
    tiers.sort_by(|a, b| b.modified_speed.cmp(&a.modified_speed));

    let mut notes = Vec::new();
    if let Some(fastest) = tiers.first().and_then(|t| t.modified_speed) {
        if fastest >= 400 {
            notes.push("Can outspeed max speed Regieleki with Tailwind".into());
        } else if fastest >= 280 {
            notes.push("Can outspeed most max speed Pokemon with Tailwind".into());
        }
    }
    if !tiers.iter().any(|t| TAILWIND_SETTERS.iter().any(|s| t.name.contains(s))) {
        notes.push("No obvious Tailwind setter on team".into());
    }

    SpeedControlAnalysis {
        condition: "Tailwind (2x Speed)".into(),
        move_order: tiers.iter().map(|t| t.name.clone()).collect(),
        tiers,
        notes,
    }
}

/// What an opposing speed stat becomes after `stages` of drops
/// (Icy Wind, Electroweb, Bulldoze).
pub fn speed_after_drop(speed: u16, stages: i8) -> u16 {
    apply_stage(speed as u32, stages) as u16
}

/// Opposing max-speed benchmarks this team outruns after a drop.
pub fn analyze_speed_drop(team: &Team, stages: i8, benchmarks: &[(String, u16)]) -> SpeedControlAnalysis {
    let tiers = team_speed_tiers(team);
    let mut notes = vec![format!("After {} Speed drop(s) on opponents:", stages.unsigned_abs())];

    for (name, max_speed) in benchmarks {
        let dropped = speed_after_drop(*max_speed, stages);
        let outspeeders: Vec<&str> = tiers
            .iter()
            .filter(|t| t.final_speed > dropped)
            .map(|t| t.name.as_str())
            .collect();
        notes.push(format!(
            "Max {} {} -> {} (outsped by: {})",
            name,
            max_speed,
            dropped,
            if outspeeders.is_empty() { "nobody".to_string() } else { outspeeders.join(", ") },
        ));
    }

    SpeedControlAnalysis {
        condition: format!("After {} Speed drop(s)", stages.unsigned_abs()),
        move_order: tiers.iter().map(|t| t.name.clone()).collect(),
        tiers,
        notes,
    }
}

/// Combined speed-control summary: base tiers, Trick Room, Tailwind and
/// a -1 drop pass over the provided opposing benchmarks.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedControlSummary {
    pub base: Vec<SpeedTier>,
    pub trick_room: SpeedControlAnalysis,
    pub tailwind: SpeedControlAnalysis,
    pub after_icy_wind: SpeedControlAnalysis,
}

pub fn speed_control_summary(team: &Team, benchmarks: &[(String, u16)]) -> SpeedControlSummary {
    SpeedControlSummary {
        base: team_speed_tiers(team),
        trick_room: analyze_trick_room(team),
        tailwind: analyze_tailwind(team),
        after_icy_wind: analyze_speed_drop(team, -1, benchmarks),
    }
}

/// A target's final speed from its build parameters, for benchmark
/// construction.
pub fn benchmark_speed(base_speed: u8, nature: Nature, evs: u16, level: u8, stage: i8) -> u16 {
    let speed = calculate_stat(base_speed, 31, evs, level, nature, Stat::Speed);
    apply_stage(speed as u32, stage) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::{BaseStats, EvSpread, PokemonBuild};
    use crate::types::PokemonType;

    fn slow_mon(name: &str, base_speed: u8) -> PokemonBuild {
        PokemonBuild::new(
            name,
            BaseStats { hp: 90, attack: 90, defense: 90, special_attack: 90, special_defense: 90, speed: base_speed },
            vec![PokemonType::Normal],
        )
    }

    #[test]
    fn test_outspeed_is_strict() {
        // Entei base 100 vs a 137-speed target needs 137+1.
        assert_eq!(outspeed_evs(100, 136, Nature::Adamant, 50), Some(132));
        // Outspeeding exactly 137 needs one more point.
        assert_eq!(outspeed_evs(100, 137, Nature::Adamant, 50), Some(140));
    }

    #[test]
    fn test_trick_room_order() {
        let mut team = Team::new("tr");
        team.add(slow_mon("dusclops", 25)).unwrap();
        team.add(slow_mon("dragapult", 142)).unwrap();
        let analysis = analyze_trick_room(&team);
        assert_eq!(analysis.move_order[0], "dusclops");
        assert!(analysis.tiers[0].notes.iter().any(|n| n.contains("Excellent")));
    }

    #[test]
    fn test_tailwind_doubles() {
        let mut team = Team::new("tw");
        team.add(slow_mon("tornadus", 111)).unwrap();
        let analysis = analyze_tailwind(&team);
        let tier = &analysis.tiers[0];
        assert_eq!(tier.modified_speed, Some(tier.final_speed * 2));
    }

    #[test]
    fn test_speed_after_drop() {
        assert_eq!(speed_after_drop(200, -1), 133);
        assert_eq!(speed_after_drop(200, -2), 100);
        assert_eq!(speed_after_drop(200, 0), 200);
    }

    #[test]
    fn test_benchmark_speed_with_stage() {
        // Max-speed Chien-Pao (base 135): 205; after Icy Wind: 136.
        assert_eq!(benchmark_speed(135, Nature::Jolly, 252, 50, 0), 205);
        assert_eq!(benchmark_speed(135, Nature::Jolly, 252, 50, -1), 136);
    }
}
