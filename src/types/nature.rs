//! # Natures
//!
//! The 25 natures and their stat effects. Five natures are neutral
//! (boosted and lowered stat coincide); the other twenty trade +10% in one
//! stat for -10% in another.

use crate::types::stat::Stat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the 25 named natures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    /// The (boosted, lowered) stat pair. Neutral natures return the same
    /// stat in both positions.
    pub fn effect(&self) -> (Stat, Stat) {
        use Stat::*;
        match self {
            Self::Hardy => (Attack, Attack),
            Self::Lonely => (Attack, Defense),
            Self::Brave => (Attack, Speed),
            Self::Adamant => (Attack, SpecialAttack),
            Self::Naughty => (Attack, SpecialDefense),
            Self::Bold => (Defense, Attack),
            Self::Docile => (Defense, Defense),
            Self::Relaxed => (Defense, Speed),
            Self::Impish => (Defense, SpecialAttack),
            Self::Lax => (Defense, SpecialDefense),
            Self::Timid => (Speed, Attack),
            Self::Hasty => (Speed, Defense),
            Self::Serious => (Speed, Speed),
            Self::Jolly => (Speed, SpecialAttack),
            Self::Naive => (Speed, SpecialDefense),
            Self::Modest => (SpecialAttack, Attack),
            Self::Mild => (SpecialAttack, Defense),
            Self::Quiet => (SpecialAttack, Speed),
            Self::Bashful => (SpecialAttack, SpecialAttack),
            Self::Rash => (SpecialAttack, SpecialDefense),
            Self::Calm => (SpecialDefense, Attack),
            Self::Gentle => (SpecialDefense, Defense),
            Self::Sassy => (SpecialDefense, Speed),
            Self::Careful => (SpecialDefense, SpecialAttack),
            Self::Quirky => (SpecialDefense, SpecialDefense),
        }
    }

    /// The stat multiplier this nature applies to `stat`: 1.1, 0.9 or 1.0.
    pub fn multiplier(&self, stat: Stat) -> f64 {
        let (up, down) = self.effect();
        if up == down {
            1.0
        } else if stat == up {
            1.1
        } else if stat == down {
            0.9
        } else {
            1.0
        }
    }

    /// Whether this nature affects no stat.
    pub fn is_neutral(&self) -> bool {
        let (up, down) = self.effect();
        up == down
    }

    /// All 25 natures.
    pub fn all() -> [Self; 25] {
        [
            Self::Hardy, Self::Lonely, Self::Brave, Self::Adamant, Self::Naughty,
            Self::Bold, Self::Docile, Self::Relaxed, Self::Impish, Self::Lax,
            Self::Timid, Self::Hasty, Self::Serious, Self::Jolly, Self::Naive,
            Self::Modest, Self::Mild, Self::Quiet, Self::Bashful, Self::Rash,
            Self::Calm, Self::Gentle, Self::Sassy, Self::Careful, Self::Quirky,
        ]
    }

    /// Convert from a normalized string (case-insensitive).
    pub fn from_normalized_str(s: &str) -> Option<Self> {
        match s.to_lowercase().trim() {
            "hardy" => Some(Self::Hardy),
            "lonely" => Some(Self::Lonely),
            "brave" => Some(Self::Brave),
            "adamant" => Some(Self::Adamant),
            "naughty" => Some(Self::Naughty),
            "bold" => Some(Self::Bold),
            "docile" => Some(Self::Docile),
            "relaxed" => Some(Self::Relaxed),
            "impish" => Some(Self::Impish),
            "lax" => Some(Self::Lax),
            "timid" => Some(Self::Timid),
            "hasty" => Some(Self::Hasty),
            "serious" => Some(Self::Serious),
            "jolly" => Some(Self::Jolly),
            "naive" => Some(Self::Naive),
            "modest" => Some(Self::Modest),
            "mild" => Some(Self::Mild),
            "quiet" => Some(Self::Quiet),
            "bashful" => Some(Self::Bashful),
            "rash" => Some(Self::Rash),
            "calm" => Some(Self::Calm),
            "gentle" => Some(Self::Gentle),
            "sassy" => Some(Self::Sassy),
            "careful" => Some(Self::Careful),
            "quirky" => Some(Self::Quirky),
            _ => None,
        }
    }

    /// Title-case display name ("Adamant").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hardy => "Hardy",
            Self::Lonely => "Lonely",
            Self::Brave => "Brave",
            Self::Adamant => "Adamant",
            Self::Naughty => "Naughty",
            Self::Bold => "Bold",
            Self::Docile => "Docile",
            Self::Relaxed => "Relaxed",
            Self::Impish => "Impish",
            Self::Lax => "Lax",
            Self::Timid => "Timid",
            Self::Hasty => "Hasty",
            Self::Serious => "Serious",
            Self::Jolly => "Jolly",
            Self::Naive => "Naive",
            Self::Modest => "Modest",
            Self::Mild => "Mild",
            Self::Quiet => "Quiet",
            Self::Bashful => "Bashful",
            Self::Rash => "Rash",
            Self::Calm => "Calm",
            Self::Gentle => "Gentle",
            Self::Sassy => "Sassy",
            Self::Careful => "Careful",
            Self::Quirky => "Quirky",
        }
    }
}

impl Default for Nature {
    /// Serious: the conventional neutral placeholder.
    fn default() -> Self {
        Self::Serious
    }
}

impl FromStr for Nature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_normalized_str(s).ok_or_else(|| format!("Invalid nature: {}", s))
    }
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adamant_effect() {
        assert_eq!(Nature::Adamant.effect(), (Stat::Attack, Stat::SpecialAttack));
        assert_eq!(Nature::Adamant.multiplier(Stat::Attack), 1.1);
        assert_eq!(Nature::Adamant.multiplier(Stat::SpecialAttack), 0.9);
        assert_eq!(Nature::Adamant.multiplier(Stat::Speed), 1.0);
    }

    #[test]
    fn test_five_neutral_natures() {
        let neutral = Nature::all().iter().filter(|n| n.is_neutral()).count();
        assert_eq!(neutral, 5);
    }

    #[test]
    fn test_parse_round_trip() {
        for n in Nature::all() {
            assert_eq!(Nature::from_normalized_str(n.display_name()), Some(n));
        }
    }
}
