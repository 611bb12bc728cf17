//! # Stat Type System
//!
//! The Stat enum used throughout the engine for stat selection, nature
//! effects, Paradox boosts and EV spreads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six permanent Pokemon stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Stat {
    /// All six stats, in canonical order.
    pub fn all() -> [Self; 6] {
        [
            Self::Hp,
            Self::Attack,
            Self::Defense,
            Self::SpecialAttack,
            Self::SpecialDefense,
            Self::Speed,
        ]
    }

    /// The five stats a nature can affect (everything but HP).
    pub fn nature_stats() -> [Self; 5] {
        [
            Self::Attack,
            Self::Defense,
            Self::SpecialAttack,
            Self::SpecialDefense,
            Self::Speed,
        ]
    }

    /// Convert from a normalized string (case-insensitive).
    pub fn from_normalized_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "hp" => Some(Self::Hp),
            "attack" | "atk" => Some(Self::Attack),
            "defense" | "def" => Some(Self::Defense),
            "specialattack" | "spa" | "spatk" => Some(Self::SpecialAttack),
            "specialdefense" | "spd" | "spdef" => Some(Self::SpecialDefense),
            "speed" | "spe" => Some(Self::Speed),
            _ => None,
        }
    }

    /// Canonical lowercase string.
    pub fn to_normalized_str(&self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Attack => "attack",
            Self::Defense => "defense",
            Self::SpecialAttack => "special_attack",
            Self::SpecialDefense => "special_defense",
            Self::Speed => "speed",
        }
    }

    /// Showdown-style abbreviation used in EV lines ("252 Atk").
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Hp => "HP",
            Self::Attack => "Atk",
            Self::Defense => "Def",
            Self::SpecialAttack => "SpA",
            Self::SpecialDefense => "SpD",
            Self::Speed => "Spe",
        }
    }

    /// Display name for user-facing output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hp => "HP",
            Self::Attack => "Attack",
            Self::Defense => "Defense",
            Self::SpecialAttack => "Sp. Atk",
            Self::SpecialDefense => "Sp. Def",
            Self::Speed => "Speed",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
