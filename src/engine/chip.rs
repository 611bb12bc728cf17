//! # Chip Damage
//!
//! Residual HP deltas per turn: weather, status, terrain, Salt Cure and
//! item recovery. Fractions floor against max HP. The multi-turn roll-up
//! applies every source per turn, clamps to [0, maxHP] and stops on
//! faint.

use crate::types::{PokemonType, Terrain, Weather};
use crate::utils::normalize_name;

/// Types immune to Sandstorm chip.
const SANDSTORM_IMMUNE_TYPES: &[PokemonType] =
    &[PokemonType::Rock, PokemonType::Ground, PokemonType::Steel];

/// Abilities granting immunity per weather.
fn ability_blocks_weather(ability: &str, weather: Weather) -> bool {
    match ability {
        "magic-guard" | "overcoat" => true,
        "sand-veil" | "sand-rush" | "sand-force" => weather == Weather::Sand,
        "snow-cloak" => matches!(weather, Weather::Hail | Weather::Snow),
        _ => false,
    }
}

/// One residual effect applied to a Pokemon for one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChipResult {
    pub source: String,
    /// Positive = damage, negative = healing.
    pub delta: i32,
    pub immune: bool,
    pub immunity_reason: Option<String>,
    pub hp_after: u16,
}

impl ChipResult {
    fn immune(source: impl Into<String>, reason: impl Into<String>, hp: u16) -> Self {
        Self {
            source: source.into(),
            delta: 0,
            immune: true,
            immunity_reason: Some(reason.into()),
            hp_after: hp,
        }
    }

    fn damage(source: impl Into<String>, amount: u16, current_hp: u16) -> Self {
        Self {
            source: source.into(),
            delta: amount as i32,
            immune: false,
            immunity_reason: None,
            hp_after: current_hp.saturating_sub(amount),
        }
    }

    fn healing(source: impl Into<String>, amount: u16, current_hp: u16, max_hp: u16) -> Self {
        Self {
            source: source.into(),
            delta: -(amount as i32),
            immune: false,
            immunity_reason: None,
            hp_after: (current_hp + amount).min(max_hp),
        }
    }

    pub fn is_healing(&self) -> bool {
        self.delta < 0
    }
}

/// Weather chip for one turn: Sandstorm and Hail/Snow deal maxHP/16,
/// with type and ability immunities; Ice Body heals in Hail/Snow.
pub fn weather_chip(
    weather: Weather,
    current_hp: u16,
    max_hp: u16,
    types: &[PokemonType],
    ability: Option<&str>,
) -> ChipResult {
    let ability = ability.map(normalize_name).unwrap_or_default();
    let source = weather.display_name();

    match weather {
        Weather::None | Weather::Sun | Weather::Rain | Weather::HarshSun | Weather::HeavyRain => {
            ChipResult::immune(source, "This weather doesn't deal damage", current_hp)
        }
        Weather::Sand => {
            if let Some(t) = types.iter().find(|t| SANDSTORM_IMMUNE_TYPES.contains(t)) {
                return ChipResult::immune(
                    source,
                    format!("{}-type is immune to Sandstorm", t.display_name()),
                    current_hp,
                );
            }
            if ability_blocks_weather(&ability, weather) {
                return ChipResult::immune(source, format!("{} grants Sandstorm immunity", ability), current_hp);
            }
            ChipResult::damage(source, max_hp / 16, current_hp)
        }
        Weather::Hail | Weather::Snow => {
            if types.contains(&PokemonType::Ice) {
                return ChipResult::immune(source, "Ice-type is immune to Hail/Snow", current_hp);
            }
            if ability == "ice-body" {
                return ChipResult::healing(source, max_hp / 16, current_hp, max_hp);
            }
            if ability_blocks_weather(&ability, weather) {
                return ChipResult::immune(source, format!("{} grants weather immunity", ability), current_hp);
            }
            ChipResult::damage(source, max_hp / 16, current_hp)
        }
    }
}

/// Status conditions carrying a per-turn HP delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipStatus {
    Burn,
    Poison,
    /// Badly poisoned with the turn counter (clamped to 15).
    BadlyPoisoned { counter: u8 },
}

/// Status chip for one turn. Magic Guard blocks everything; Poison Heal
/// converts poison damage into maxHP/8 healing regardless of the toxic
/// counter.
pub fn status_chip(
    status: ChipStatus,
    current_hp: u16,
    max_hp: u16,
    ability: Option<&str>,
) -> ChipResult {
    let ability = ability.map(normalize_name).unwrap_or_default();

    if ability == "magic-guard" {
        return ChipResult::immune("Status", "Magic Guard blocks indirect damage", current_hp);
    }

    match status {
        ChipStatus::Burn => ChipResult::damage("Burn", max_hp / 16, current_hp),
        ChipStatus::Poison => {
            if ability == "poison-heal" {
                ChipResult::healing("Poison", max_hp / 8, current_hp, max_hp)
            } else {
                ChipResult::damage("Poison", max_hp / 8, current_hp)
            }
        }
        ChipStatus::BadlyPoisoned { counter } => {
            if ability == "poison-heal" {
                return ChipResult::healing("Toxic", max_hp / 8, current_hp, max_hp);
            }
            let counter = counter.clamp(1, 15) as u32;
            let damage = (max_hp as u32 * counter / 16) as u16;
            ChipResult::damage(format!("Toxic (turn {})", counter), damage, current_hp)
        }
    }
}

/// Grassy Terrain heals grounded Pokemon maxHP/16 per turn.
pub fn terrain_chip(terrain: Terrain, current_hp: u16, max_hp: u16, is_grounded: bool) -> ChipResult {
    if terrain != Terrain::Grassy {
        return ChipResult::immune(terrain.display_name(), "Only Grassy Terrain heals", current_hp);
    }
    if !is_grounded {
        return ChipResult::immune("Grassy Terrain", "Not grounded", current_hp);
    }
    ChipResult::healing("Grassy Terrain", max_hp / 16, current_hp, max_hp)
}

/// Salt Cure: maxHP/8 per turn, maxHP/4 against Water and Steel types.
pub fn salt_cure_chip(
    current_hp: u16,
    max_hp: u16,
    types: &[PokemonType],
    ability: Option<&str>,
) -> ChipResult {
    let ability = ability.map(normalize_name).unwrap_or_default();
    if ability == "magic-guard" {
        return ChipResult::immune("Salt Cure", "Magic Guard blocks indirect damage", current_hp);
    }
    let vulnerable = types.contains(&PokemonType::Water) || types.contains(&PokemonType::Steel);
    let damage = if vulnerable { max_hp / 4 } else { max_hp / 8 };
    ChipResult::damage("Salt Cure", damage, current_hp)
}

/// Leftovers and Black Sludge recovery. Black Sludge heals Poison types
/// and burns everyone else for maxHP/8.
pub fn item_chip(
    item: &str,
    current_hp: u16,
    max_hp: u16,
    types: &[PokemonType],
) -> Option<ChipResult> {
    match normalize_name(item).as_str() {
        "leftovers" => Some(ChipResult::healing("Leftovers", max_hp / 16, current_hp, max_hp)),
        "black-sludge" => {
            if types.contains(&PokemonType::Poison) {
                Some(ChipResult::healing("Black Sludge", max_hp / 16, current_hp, max_hp))
            } else {
                Some(ChipResult::damage("Black Sludge", max_hp / 8, current_hp))
            }
        }
        _ => None,
    }
}

/// Residual sources active on one Pokemon for a multi-turn projection.
#[derive(Debug, Clone, Default)]
pub struct ChipSources {
    pub weather: Weather,
    pub status: Option<ChipStatus>,
    pub terrain: Terrain,
    pub item: Option<String>,
    pub salt_cured: bool,
    pub is_grounded: bool,
}

/// One turn of a multi-turn projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ChipTurn {
    pub turn: u8,
    pub effects: Vec<ChipResult>,
    pub hp_after: u16,
}

/// Multi-turn summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ChipProjection {
    pub starting_hp: u16,
    pub max_hp: u16,
    pub turns: Vec<ChipTurn>,
    pub final_hp: u16,
    pub fainted: bool,
}

/// Roll residual effects forward turn by turn. The toxic counter starts
/// at 1 and grows each turn; the projection stops early on faint.
pub fn project_chip_damage(
    starting_hp: u16,
    max_hp: u16,
    types: &[PokemonType],
    ability: Option<&str>,
    sources: &ChipSources,
    turn_count: u8,
) -> ChipProjection {
    let mut hp = starting_hp;
    let mut turns = Vec::new();

    for turn in 1..=turn_count {
        let mut effects = Vec::new();
        let mut net: i32 = 0;

        let weather = weather_chip(sources.weather, hp, max_hp, types, ability);
        if !weather.immune {
            net += weather.delta;
            effects.push(weather);
        }

        if let Some(status) = sources.status {
            let status = match status {
                ChipStatus::BadlyPoisoned { .. } => ChipStatus::BadlyPoisoned { counter: turn },
                other => other,
            };
            let result = status_chip(status, hp, max_hp, ability);
            if !result.immune {
                net += result.delta;
                effects.push(result);
            }
        }

        if sources.salt_cured {
            let result = salt_cure_chip(hp, max_hp, types, ability);
            if !result.immune {
                net += result.delta;
                effects.push(result);
            }
        }

        let terrain = terrain_chip(sources.terrain, hp, max_hp, sources.is_grounded);
        if !terrain.immune {
            net += terrain.delta;
            effects.push(terrain);
        }

        if let Some(item) = sources.item.as_deref() {
            if let Some(result) = item_chip(item, hp, max_hp, types) {
                net += result.delta;
                effects.push(result);
            }
        }

        hp = (hp as i32 - net).clamp(0, max_hp as i32) as u16;
        turns.push(ChipTurn { turn, effects, hp_after: hp });

        if hp == 0 {
            break;
        }
    }

    ChipProjection {
        starting_hp,
        max_hp,
        final_hp: hp,
        fainted: hp == 0,
        turns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandstorm_immunities() {
        let chip = weather_chip(Weather::Sand, 160, 160, &[PokemonType::Water], None);
        assert_eq!(chip.delta, 10);

        let immune = weather_chip(Weather::Sand, 160, 160, &[PokemonType::Rock], None);
        assert!(immune.immune);

        let veiled = weather_chip(Weather::Sand, 160, 160, &[PokemonType::Water], Some("Sand Veil"));
        assert!(veiled.immune);
    }

    #[test]
    fn test_ice_body_heals_in_snow() {
        let chip = weather_chip(Weather::Snow, 100, 160, &[PokemonType::Water], Some("ice-body"));
        assert!(chip.is_healing());
        assert_eq!(chip.hp_after, 110);
    }

    #[test]
    fn test_toxic_counter_progression() {
        // 200 max HP, badly poisoned from turn 1 over 3 turns:
        // 12, then 25, then 37 damage.
        let projection = project_chip_damage(
            200,
            200,
            &[PokemonType::Normal],
            None,
            &ChipSources {
                status: Some(ChipStatus::BadlyPoisoned { counter: 1 }),
                is_grounded: true,
                ..Default::default()
            },
            3,
        );
        assert_eq!(projection.turns[0].hp_after, 188);
        assert_eq!(projection.turns[1].hp_after, 163);
        assert_eq!(projection.turns[2].hp_after, 126);
    }

    #[test]
    fn test_toxic_counter_clamps_at_15() {
        let result = status_chip(ChipStatus::BadlyPoisoned { counter: 40 }, 200, 200, None);
        assert_eq!(result.delta, 200 * 15 / 16);
    }

    #[test]
    fn test_poison_heal_inverts() {
        let result = status_chip(ChipStatus::Poison, 100, 160, Some("Poison Heal"));
        assert!(result.is_healing());
        assert_eq!(result.hp_after, 120);

        // Counter is irrelevant under Poison Heal.
        let toxic = status_chip(ChipStatus::BadlyPoisoned { counter: 9 }, 100, 160, Some("poison-heal"));
        assert_eq!(toxic.delta, -20);
    }

    #[test]
    fn test_salt_cure_doubles_on_water_steel() {
        assert_eq!(salt_cure_chip(200, 200, &[PokemonType::Fire], None).delta, 25);
        assert_eq!(salt_cure_chip(200, 200, &[PokemonType::Water], None).delta, 50);
        assert_eq!(salt_cure_chip(200, 200, &[PokemonType::Steel], None).delta, 50);
    }

    #[test]
    fn test_black_sludge() {
        let poison = item_chip("black-sludge", 100, 160, &[PokemonType::Poison]).unwrap();
        assert!(poison.is_healing());
        let other = item_chip("Black Sludge", 100, 160, &[PokemonType::Fairy]).unwrap();
        assert_eq!(other.delta, 20);
    }

    #[test]
    fn test_projection_stops_on_faint() {
        let projection = project_chip_damage(
            20,
            320,
            &[PokemonType::Normal],
            None,
            &ChipSources {
                status: Some(ChipStatus::Poison),
                ..Default::default()
            },
            10,
        );
        assert!(projection.fainted);
        assert!(projection.turns.len() < 10);
        assert_eq!(projection.final_hp, 0);
    }

    #[test]
    fn test_grassy_terrain_needs_grounding() {
        let grounded = terrain_chip(Terrain::Grassy, 100, 160, true);
        assert!(grounded.is_healing());
        let airborne = terrain_chip(Terrain::Grassy, 100, 160, false);
        assert!(airborne.immune);
    }
}
