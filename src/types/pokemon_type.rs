//! # Pokemon Type System
//!
//! The single source of truth for elemental type operations across the
//! engine. Every Pokemon carries one or two of these, every damaging move
//! carries exactly one, and the type chart is indexed by them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eighteen elemental types, with numeric indices matching the
/// effectiveness matrix in `engine::type_chart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PokemonType {
    Normal = 0,
    Fire = 1,
    Water = 2,
    Electric = 3,
    Grass = 4,
    Ice = 5,
    Fighting = 6,
    Poison = 7,
    Ground = 8,
    Flying = 9,
    Psychic = 10,
    Bug = 11,
    Rock = 12,
    Ghost = 13,
    Dragon = 14,
    Dark = 15,
    Steel = 16,
    Fairy = 17,
}

impl PokemonType {
    /// Convert from a normalized string (case-insensitive).
    ///
    /// Returns None for invalid type names.
    pub fn from_normalized_str(s: &str) -> Option<Self> {
        match s.to_lowercase().trim() {
            "normal" => Some(Self::Normal),
            "fire" => Some(Self::Fire),
            "water" => Some(Self::Water),
            "electric" => Some(Self::Electric),
            "grass" => Some(Self::Grass),
            "ice" => Some(Self::Ice),
            "fighting" => Some(Self::Fighting),
            "poison" => Some(Self::Poison),
            "ground" => Some(Self::Ground),
            "flying" => Some(Self::Flying),
            "psychic" => Some(Self::Psychic),
            "bug" => Some(Self::Bug),
            "rock" => Some(Self::Rock),
            "ghost" => Some(Self::Ghost),
            "dragon" => Some(Self::Dragon),
            "dark" => Some(Self::Dark),
            "steel" => Some(Self::Steel),
            "fairy" => Some(Self::Fairy),
            _ => None,
        }
    }

    /// Canonical lowercase string, used for data lookup and serialization.
    pub fn to_normalized_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Electric => "electric",
            Self::Grass => "grass",
            Self::Ice => "ice",
            Self::Fighting => "fighting",
            Self::Poison => "poison",
            Self::Ground => "ground",
            Self::Flying => "flying",
            Self::Psychic => "psychic",
            Self::Bug => "bug",
            Self::Rock => "rock",
            Self::Ghost => "ghost",
            Self::Dragon => "dragon",
            Self::Dark => "dark",
            Self::Steel => "steel",
            Self::Fairy => "fairy",
        }
    }

    /// Title-case display name for user-facing output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Fire => "Fire",
            Self::Water => "Water",
            Self::Electric => "Electric",
            Self::Grass => "Grass",
            Self::Ice => "Ice",
            Self::Fighting => "Fighting",
            Self::Poison => "Poison",
            Self::Ground => "Ground",
            Self::Flying => "Flying",
            Self::Psychic => "Psychic",
            Self::Bug => "Bug",
            Self::Rock => "Rock",
            Self::Ghost => "Ghost",
            Self::Dragon => "Dragon",
            Self::Dark => "Dark",
            Self::Steel => "Steel",
            Self::Fairy => "Fairy",
        }
    }

    /// All eighteen types, for iteration.
    pub fn all_types() -> [Self; 18] {
        [
            Self::Normal, Self::Fire, Self::Water, Self::Electric,
            Self::Grass, Self::Ice, Self::Fighting, Self::Poison,
            Self::Ground, Self::Flying, Self::Psychic, Self::Bug,
            Self::Rock, Self::Ghost, Self::Dragon, Self::Dark,
            Self::Steel, Self::Fairy,
        ]
    }

    /// Numeric index into the effectiveness matrix.
    pub fn as_index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for PokemonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_normalized_str(s).ok_or_else(|| format!("Invalid Pokemon type: {}", s))
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
