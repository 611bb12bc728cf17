//! # Field Conditions
//!
//! Weather and terrain enums. The engine only models the conditions that
//! change damage, speed or residual HP; field effects with no calculation
//! impact are out of scope.

use serde::{Deserialize, Serialize};

/// Weather states recognized by the damage and chip engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Weather {
    #[default]
    None,
    Sun,
    Rain,
    Sand,
    Hail,
    Snow,
    HarshSun,
    HeavyRain,
}

impl Weather {
    /// Convert from a normalized string (case-insensitive).
    pub fn from_normalized_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '_'], "-").as_str() {
            "none" | "" => Some(Self::None),
            "sun" | "sunny-day" => Some(Self::Sun),
            "rain" | "rain-dance" => Some(Self::Rain),
            "sand" | "sandstorm" => Some(Self::Sand),
            "hail" => Some(Self::Hail),
            "snow" | "snowscape" => Some(Self::Snow),
            "harsh-sun" | "desolate-land" => Some(Self::HarshSun),
            "heavy-rain" | "primordial-sea" => Some(Self::HeavyRain),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Sun => "Sun",
            Self::Rain => "Rain",
            Self::Sand => "Sandstorm",
            Self::Hail => "Hail",
            Self::Snow => "Snow",
            Self::HarshSun => "Harsh Sun",
            Self::HeavyRain => "Heavy Rain",
        }
    }
}

/// Terrain states recognized by the damage, priority and chip engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Terrain {
    #[default]
    None,
    Electric,
    Grassy,
    Psychic,
    Misty,
}

impl Terrain {
    /// Convert from a normalized string (case-insensitive).
    pub fn from_normalized_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '_'], "-").as_str() {
            "none" | "" => Some(Self::None),
            "electric" | "electric-terrain" => Some(Self::Electric),
            "grassy" | "grassy-terrain" => Some(Self::Grassy),
            "psychic" | "psychic-terrain" => Some(Self::Psychic),
            "misty" | "misty-terrain" => Some(Self::Misty),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Electric => "Electric Terrain",
            Self::Grassy => "Grassy Terrain",
            Self::Psychic => "Psychic Terrain",
            Self::Misty => "Misty Terrain",
        }
    }
}
