//! # Pokemon Build Model
//!
//! The value types the engine computes over: base stats, EV/IV spreads,
//! a single Pokemon build, and a team of up to six builds. All of these
//! are plain immutable values constructed per call; the engine owns no
//! state across calls.

use crate::config::{MAX_STAT_EVS, MAX_TOTAL_EVS};
use crate::types::{EngineError, EngineResult, Nature, PokemonType, Stat};
use crate::utils::base_species;
use serde::{Deserialize, Serialize};

/// Species base stats, each in 1..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub special_attack: u8,
    pub special_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn get(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.special_attack,
            Stat::SpecialDefense => self.special_defense,
            Stat::Speed => self.speed,
        }
    }

    /// The higher of Attack and Special Attack decides which side of the
    /// spectrum a build invests on when the caller does not say.
    pub fn is_physical_attacker(&self) -> bool {
        self.attack >= self.special_attack
    }
}

/// Effort values: six integers in 0..=252 with total <= 508.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvSpread {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl EvSpread {
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

    pub fn set(&mut self, stat: Stat, value: u16) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::SpecialAttack => self.special_attack = value,
            Stat::SpecialDefense => self.special_defense = value,
            Stat::Speed => self.speed = value,
        }
    }

    pub fn total(&self) -> u16 {
        self.hp + self.attack + self.defense + self.special_attack + self.special_defense + self.speed
    }

    /// Validate the per-stat and total caps.
    pub fn validate(&self) -> EngineResult<()> {
        for stat in Stat::all() {
            let value = self.get(stat);
            if value > MAX_STAT_EVS {
                return Err(EngineError::invalid_input(
                    format!("evs.{}", stat.to_normalized_str()),
                    format!("value {} exceeds {}", value, MAX_STAT_EVS),
                ));
            }
        }
        if self.total() > MAX_TOTAL_EVS {
            return Err(EngineError::invalid_input(
                "evs",
                format!("total {} exceeds {}", self.total(), MAX_TOTAL_EVS),
            ));
        }
        Ok(())
    }
}

/// Individual values: six integers in 0..=31. Defaults to 31 across the
/// board; Trick Room builds zero out Speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IvSpread {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub special_attack: u8,
    pub special_defense: u8,
    pub speed: u8,
}

impl Default for IvSpread {
    fn default() -> Self {
        Self {
            hp: 31,
            attack: 31,
            defense: 31,
            special_attack: 31,
            special_defense: 31,
            speed: 31,
        }
    }
}

impl IvSpread {
    /// Trick Room preset: 0 Speed IV, 31 elsewhere.
    pub fn trick_room() -> Self {
        Self { speed: 0, ..Self::default() }
    }

    pub fn get(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.special_attack,
            Stat::SpecialDefense => self.special_defense,
            Stat::Speed => self.speed,
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        for stat in Stat::all() {
            let value = self.get(stat);
            if value > 31 {
                return Err(EngineError::invalid_input(
                    format!("ivs.{}", stat.to_normalized_str()),
                    format!("value {} exceeds 31", value),
                ));
            }
        }
        Ok(())
    }
}

/// A full Pokemon build: the engine's primary input entity. Immutable for
/// the duration of one engine call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonBuild {
    /// Canonical lowercase-hyphenated species name, form suffix included.
    pub name: String,
    pub base_stats: BaseStats,
    pub types: Vec<PokemonType>,
    pub nature: Nature,
    #[serde(default)]
    pub evs: EvSpread,
    #[serde(default)]
    pub ivs: IvSpread,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub tera_type: Option<PokemonType>,
    #[serde(default)]
    pub moves: Vec<String>,
}

fn default_level() -> u8 {
    crate::config::DEFAULT_LEVEL
}

impl PokemonBuild {
    /// A neutral, uninvested level-50 build for a species. The name is
    /// normalized to its canonical lowercase-hyphenated form.
    pub fn new(name: impl Into<String>, base_stats: BaseStats, types: Vec<PokemonType>) -> Self {
        Self {
            name: crate::utils::normalize_name(&name.into()),
            base_stats,
            types,
            nature: Nature::Serious,
            evs: EvSpread::default(),
            ivs: IvSpread::default(),
            level: crate::config::DEFAULT_LEVEL,
            ability: None,
            item: None,
            tera_type: None,
            moves: Vec::new(),
        }
    }

    /// Validate EV/IV ranges and the move-list cap.
    pub fn validate(&self) -> EngineResult<()> {
        self.evs.validate()?;
        self.ivs.validate()?;
        if self.moves.len() > 4 {
            return Err(EngineError::invalid_input(
                "moves",
                format!("{} moves listed, maximum is 4", self.moves.len()),
            ));
        }
        Ok(())
    }

    /// Whether the build is affected by Ground moves, Spikes and terrain.
    /// Flying types and Levitate holders are not grounded.
    pub fn is_grounded(&self) -> bool {
        if self.types.contains(&PokemonType::Flying) {
            return false;
        }
        !matches!(self.ability.as_deref(), Some(ability) if crate::utils::normalize_name(ability) == "levitate")
    }

    pub fn with_evs(mut self, evs: EvSpread) -> Self {
        self.evs = evs;
        self
    }

    pub fn with_nature(mut self, nature: Nature) -> Self {
        self.nature = nature;
        self
    }
}

/// A VGC team: bring up to 6, pick 4.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub name: String,
    pub members: Vec<PokemonBuild>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), members: Vec::new() }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_full(&self) -> bool {
        self.size() >= 6
    }

    /// Add a member, enforcing the size cap and species clause.
    pub fn add(&mut self, pokemon: PokemonBuild) -> EngineResult<()> {
        if self.is_full() {
            return Err(EngineError::invalid_input("team", "team is full (max 6 Pokemon)"));
        }
        let base = base_species(&pokemon.name);
        if self.members.iter().any(|m| base_species(&m.name) == base) {
            return Err(EngineError::invalid_input(
                "team",
                format!("species clause: {} already on team", base),
            ));
        }
        self.members.push(pokemon);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PokemonBuild> {
        let normalized = crate::utils::normalize_name(name);
        self.members.iter().find(|m| m.name == normalized)
    }

    pub fn member_names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incineroar_stats() -> BaseStats {
        BaseStats { hp: 95, attack: 115, defense: 90, special_attack: 80, special_defense: 90, speed: 60 }
    }

    #[test]
    fn test_ev_total_cap() {
        let evs = EvSpread { hp: 252, attack: 252, speed: 252, ..Default::default() };
        assert!(evs.validate().is_err());

        let evs = EvSpread { hp: 252, attack: 252, speed: 4, ..Default::default() };
        assert!(evs.validate().is_ok());
    }

    #[test]
    fn test_ev_stat_cap() {
        let evs = EvSpread { attack: 256, ..Default::default() };
        assert!(evs.validate().is_err());
    }

    #[test]
    fn test_iv_defaults() {
        let ivs = IvSpread::default();
        assert_eq!(ivs.speed, 31);
        assert_eq!(IvSpread::trick_room().speed, 0);
    }

    #[test]
    fn test_species_clause_on_forms() {
        let mut team = Team::new("test");
        team.add(PokemonBuild::new(
            "urshifu-rapid-strike",
            incineroar_stats(),
            vec![PokemonType::Fighting, PokemonType::Water],
        ))
        .unwrap();

        let duplicate = team.add(PokemonBuild::new(
            "urshifu-single-strike",
            incineroar_stats(),
            vec![PokemonType::Fighting, PokemonType::Dark],
        ));
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_flying_not_grounded() {
        let build = PokemonBuild::new(
            "tornadus",
            incineroar_stats(),
            vec![PokemonType::Flying],
        );
        assert!(!build.is_grounded());

        let mut levitator = PokemonBuild::new("cresselia", incineroar_stats(), vec![PokemonType::Psychic]);
        levitator.ability = Some("Levitate".into());
        assert!(!levitator.is_grounded());
    }
}
