//! # Damage Modifier Context
//!
//! Every per-calculation toggle the damage pipeline honours, plus the
//! fixed-point multiplier discipline. All modifier arithmetic is integer
//! 4096-scale with truncation after each application, matching the
//! community-standard calculator's roll output exactly.

use crate::types::{MoveCategory, PokemonType, Stat, Terrain, Weather};
use crate::utils::normalize_name;
use serde::{Deserialize, Serialize};

/// A fixed-point damage modifier (4096 scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Modifier(pub u32);

impl Modifier {
    /// 1.0x.
    pub const ONE: Self = Self(4096);
    /// 0.5x.
    pub const HALF: Self = Self(2048);
    /// 0.75x (spread moves, Friend Guard, Ruin auras).
    pub const THREE_QUARTERS: Self = Self(3072);
    /// 2/3 (screens in doubles).
    pub const TWO_THIRDS: Self = Self(2732);
    /// 1.1x (Muscle Band, Wise Glasses).
    pub const ONE_POINT_ONE: Self = Self(4505);
    /// 1.2x (Expert Belt, type items, Ogerpon masks).
    pub const ONE_POINT_TWO: Self = Self(4915);
    /// 1.3x (Life Orb, terrain boost, Paradox boost).
    pub const ONE_POINT_THREE: Self = Self(5325);
    /// 1.5x (STAB, crits, weather boost, Choice items, Helping Hand).
    pub const ONE_POINT_FIVE: Self = Self(6144);
    /// 2.0x (Tera same-type STAB, Huge Power, Commander).
    pub const DOUBLE: Self = Self(8192);
    /// 0x (Harsh Sun nullifying Water, Heavy Rain nullifying Fire).
    pub const ZERO: Self = Self(0);

    /// Apply to a value with truncation.
    pub fn apply(self, value: u32) -> u32 {
        (value as u64 * self.0 as u64 / 4096) as u32
    }

    pub fn is_neutral(self) -> bool {
        self.0 == 4096
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 4096.0
    }
}

/// Configuration record enumerating every toggle the engine honours for
/// one damage calculation. Booleans default false, stages default 0,
/// optionals default None.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierContext {
    /// Selects the spread 0.75x and the 2/3 screen multiplier.
    pub is_doubles: bool,
    /// The spread move actually strikes two or more targets.
    pub multiple_targets: bool,

    pub weather: Weather,
    pub terrain: Terrain,

    /// 1.5x; ignores the defender's positive defense stage and the
    /// attacker's negative attack stage.
    pub is_critical: bool,

    /// Attacker's offensive stages, defender's defensive stages, each
    /// clamped to [-6, 6].
    pub attack_stage: i8,
    pub defense_stage: i8,
    pub special_attack_stage: i8,
    pub special_defense_stage: i8,
    /// Speed stages are carried for turn-order projection; the damage
    /// formula itself never reads them.
    pub speed_stage: i8,
    pub defender_speed_stage: i8,

    pub tera_active: bool,
    pub tera_type: Option<PokemonType>,
    pub defender_tera_active: bool,
    pub defender_tera_type: Option<PokemonType>,

    pub attacker_item: Option<String>,
    pub defender_item: Option<String>,
    pub attacker_ability: Option<String>,
    pub defender_ability: Option<String>,

    pub reflect_up: bool,
    pub light_screen_up: bool,
    pub aurora_veil_up: bool,

    pub helping_hand: bool,
    pub friend_guard: bool,

    pub attacker_burned: bool,
    pub has_guts: bool,
    pub has_adaptability: bool,

    pub sword_of_ruin: bool,
    pub beads_of_ruin: bool,
    pub tablets_of_ruin: bool,
    pub vessel_of_ruin: bool,

    pub attacker_protosynthesis_boost: Option<Stat>,
    pub attacker_quark_drive_boost: Option<Stat>,
    pub defender_protosynthesis_boost: Option<Stat>,
    pub defender_quark_drive_boost: Option<Stat>,

    pub commander_active: bool,
    pub defender_commander_active: bool,

    /// Overrides the hit count of a multi-hit move; 0 means "use the
    /// move's maximum".
    pub move_hits: u8,

    /// Metronome item consecutive-use counter.
    pub metronome_uses: u8,
}

impl ModifierContext {
    pub fn singles() -> Self {
        Self::default()
    }

    pub fn doubles() -> Self {
        Self { is_doubles: true, ..Self::default() }
    }

    pub fn attacker_item_normalized(&self) -> Option<String> {
        self.attacker_item.as_deref().map(normalize_name)
    }

    pub fn defender_item_normalized(&self) -> Option<String> {
        self.defender_item.as_deref().map(normalize_name)
    }

    pub fn attacker_ability_normalized(&self) -> Option<String> {
        self.attacker_ability.as_deref().map(normalize_name)
    }

    pub fn defender_ability_normalized(&self) -> Option<String> {
        self.defender_ability.as_deref().map(normalize_name)
    }
}

/// Stat-stage multiplier as an exact fraction:
/// (max(2, 2+stage), max(2, 2-stage)).
pub fn stage_fraction(stage: i8) -> (u32, u32) {
    let stage = stage.clamp(-6, 6) as i32;
    let numerator = (2 + stage).max(2) as u32;
    let denominator = (2 - stage).max(2) as u32;
    (numerator, denominator)
}

/// Apply a stat stage to a stat value, truncating.
pub fn apply_stage(stat: u32, stage: i8) -> u32 {
    let (numerator, denominator) = stage_fraction(stage);
    stat * numerator / denominator
}

/// Weather multiplier for a move type, or None when weather is silent on
/// this type. Harsh Sun and Heavy Rain nullify the opposed type outright.
pub fn weather_modifier(weather: Weather, move_type: PokemonType) -> Option<Modifier> {
    match (weather, move_type) {
        (Weather::Sun | Weather::HarshSun, PokemonType::Fire) => Some(Modifier::ONE_POINT_FIVE),
        (Weather::Sun, PokemonType::Water) => Some(Modifier::HALF),
        (Weather::HarshSun, PokemonType::Water) => Some(Modifier::ZERO),
        (Weather::Rain | Weather::HeavyRain, PokemonType::Water) => Some(Modifier::ONE_POINT_FIVE),
        (Weather::Rain, PokemonType::Fire) => Some(Modifier::HALF),
        (Weather::HeavyRain, PokemonType::Fire) => Some(Modifier::ZERO),
        _ => None,
    }
}

/// Terrain multiplier for a move, or None when terrain is silent.
/// Offensive boosts need a grounded attacker; the Grassy and Misty
/// reductions need a grounded defender.
pub fn terrain_modifier(
    terrain: Terrain,
    move_type: PokemonType,
    move_name: &str,
    attacker_grounded: bool,
    defender_grounded: bool,
) -> Option<Modifier> {
    match terrain {
        Terrain::Electric if move_type == PokemonType::Electric && attacker_grounded => {
            Some(Modifier::ONE_POINT_THREE)
        }
        Terrain::Grassy => {
            if move_type == PokemonType::Grass && attacker_grounded {
                Some(Modifier::ONE_POINT_THREE)
            } else if defender_grounded
                && matches!(move_name, "earthquake" | "bulldoze" | "magnitude")
            {
                Some(Modifier::HALF)
            } else {
                None
            }
        }
        Terrain::Psychic if move_type == PokemonType::Psychic && attacker_grounded => {
            Some(Modifier::ONE_POINT_THREE)
        }
        Terrain::Misty if move_type == PokemonType::Dragon && defender_grounded => {
            Some(Modifier::HALF)
        }
        _ => None,
    }
}

/// Screen multiplier: 1/2 in singles, 2/3 in doubles, bypassed entirely
/// by critical hits. Aurora Veil covers both categories.
pub fn screen_modifier(ctx: &ModifierContext, category: MoveCategory) -> Option<Modifier> {
    if ctx.is_critical {
        return None;
    }
    let screened = match category {
        MoveCategory::Physical => ctx.reflect_up || ctx.aurora_veil_up,
        MoveCategory::Special => ctx.light_screen_up || ctx.aurora_veil_up,
        MoveCategory::Status => false,
    };
    if !screened {
        return None;
    }
    Some(if ctx.is_doubles { Modifier::TWO_THIRDS } else { Modifier::HALF })
}

/// STAB multiplier under the full Tera rules.
///
/// - Move type equals an active Tera type that is also an original type:
///   2.0 (never 2.25, even with Adaptability: the engine computes
///   max(2.0, stab)).
/// - Move type equals an active Tera type outside the originals: 1.5.
/// - Move type in the originals (Tera or not): 1.5, or 2.0 with
///   Adaptability when not Terastallized.
/// - Otherwise 1.0.
pub fn stab_modifier(
    attacker_types: &[PokemonType],
    move_type: PokemonType,
    ctx: &ModifierContext,
) -> Modifier {
    let in_originals = attacker_types.contains(&move_type);
    let tera = if ctx.tera_active { ctx.tera_type } else { None };

    match tera {
        Some(tera_type) if move_type == tera_type => {
            if in_originals {
                Modifier::DOUBLE
            } else {
                Modifier::ONE_POINT_FIVE
            }
        }
        Some(_) if in_originals => Modifier::ONE_POINT_FIVE,
        Some(_) => Modifier::ONE,
        None if in_originals => {
            if ctx.has_adaptability {
                Modifier::DOUBLE
            } else {
                Modifier::ONE_POINT_FIVE
            }
        }
        None => Modifier::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_fraction() {
        assert_eq!(stage_fraction(0), (2, 2));
        assert_eq!(stage_fraction(1), (3, 2));
        assert_eq!(stage_fraction(2), (4, 2));
        assert_eq!(stage_fraction(6), (8, 2));
        assert_eq!(stage_fraction(-1), (2, 3));
        assert_eq!(stage_fraction(-6), (2, 8));
    }

    #[test]
    fn test_apply_stage_truncates() {
        assert_eq!(apply_stage(100, 1), 150);
        assert_eq!(apply_stage(101, -1), 67);
        assert_eq!(apply_stage(150, 0), 150);
    }

    #[test]
    fn test_weather_modifiers() {
        assert_eq!(weather_modifier(Weather::Sun, PokemonType::Fire), Some(Modifier::ONE_POINT_FIVE));
        assert_eq!(weather_modifier(Weather::Sun, PokemonType::Water), Some(Modifier::HALF));
        assert_eq!(weather_modifier(Weather::HarshSun, PokemonType::Water), Some(Modifier::ZERO));
        assert_eq!(weather_modifier(Weather::HeavyRain, PokemonType::Fire), Some(Modifier::ZERO));
        assert_eq!(weather_modifier(Weather::Rain, PokemonType::Grass), None);
        assert_eq!(weather_modifier(Weather::Sand, PokemonType::Rock), None);
    }

    #[test]
    fn test_terrain_grounding() {
        // Grounded attacker gets the Electric boost.
        assert_eq!(
            terrain_modifier(Terrain::Electric, PokemonType::Electric, "thunderbolt", true, true),
            Some(Modifier::ONE_POINT_THREE),
        );
        // Airborne attacker does not.
        assert_eq!(
            terrain_modifier(Terrain::Electric, PokemonType::Electric, "thunderbolt", false, true),
            None,
        );
        // Grassy halves Earthquake into a grounded defender.
        assert_eq!(
            terrain_modifier(Terrain::Grassy, PokemonType::Ground, "earthquake", true, true),
            Some(Modifier::HALF),
        );
        // Misty halves Dragon into a grounded defender.
        assert_eq!(
            terrain_modifier(Terrain::Misty, PokemonType::Dragon, "draco-meteor", true, true),
            Some(Modifier::HALF),
        );
    }

    #[test]
    fn test_screens() {
        let mut ctx = ModifierContext::doubles();
        ctx.reflect_up = true;
        assert_eq!(screen_modifier(&ctx, MoveCategory::Physical), Some(Modifier::TWO_THIRDS));
        assert_eq!(screen_modifier(&ctx, MoveCategory::Special), None);

        ctx.is_doubles = false;
        assert_eq!(screen_modifier(&ctx, MoveCategory::Physical), Some(Modifier::HALF));

        ctx.is_critical = true;
        assert_eq!(screen_modifier(&ctx, MoveCategory::Physical), None);

        let mut veil = ModifierContext::doubles();
        veil.aurora_veil_up = true;
        assert_eq!(screen_modifier(&veil, MoveCategory::Special), Some(Modifier::TWO_THIRDS));
    }

    #[test]
    fn test_stab_tera_rules() {
        use PokemonType::*;
        let originals = [Fire, Flying];

        // Plain STAB.
        let ctx = ModifierContext::default();
        assert_eq!(stab_modifier(&originals, Fire, &ctx), Modifier::ONE_POINT_FIVE);
        assert_eq!(stab_modifier(&originals, Grass, &ctx), Modifier::ONE);

        // Tera into an original type: 2.0 for that type.
        let tera_fire = ModifierContext {
            tera_active: true,
            tera_type: Some(Fire),
            ..Default::default()
        };
        assert_eq!(stab_modifier(&originals, Fire, &tera_fire), Modifier::DOUBLE);

        // Tera into a new type: 1.5 for the new type, originals keep 1.5.
        let tera_grass = ModifierContext {
            tera_active: true,
            tera_type: Some(Grass),
            ..Default::default()
        };
        assert_eq!(stab_modifier(&originals, Grass, &tera_grass), Modifier::ONE_POINT_FIVE);
        assert_eq!(stab_modifier(&originals, Fire, &tera_grass), Modifier::ONE_POINT_FIVE);

        // Adaptability without Tera: 2.0.
        let adapt = ModifierContext { has_adaptability: true, ..Default::default() };
        assert_eq!(stab_modifier(&originals, Fire, &adapt), Modifier::DOUBLE);

        // Adaptability with Tera same-type stays capped at 2.0.
        let both = ModifierContext {
            has_adaptability: true,
            tera_active: true,
            tera_type: Some(Fire),
            ..Default::default()
        };
        assert_eq!(stab_modifier(&originals, Fire, &both), Modifier::DOUBLE);
    }
}
