//! # Move Classification
//!
//! Move category and targeting enums shared by the data layer and the
//! damage/priority engines.

use serde::{Deserialize, Serialize};

/// Damage category of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    pub fn from_normalized_str(s: &str) -> Option<Self> {
        match s.to_lowercase().trim() {
            "physical" => Some(Self::Physical),
            "special" => Some(Self::Special),
            "status" => Some(Self::Status),
            _ => None,
        }
    }

    pub fn is_damaging(&self) -> bool {
        !matches!(self, Self::Status)
    }
}

/// Targeting scope of a move. Spread targets lose 25% damage in doubles
/// when they actually hit more than one Pokemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveTarget {
    #[serde(rename = "self")]
    User,
    #[default]
    SingleAdjacent,
    AllOpponents,
    AllAdjacent,
    AllOther,
    EntryHazard,
}

impl MoveTarget {
    pub fn from_normalized_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '_'], "-").as_str() {
            "self" | "user" => Some(Self::User),
            "single-adjacent" | "selected-pokemon" | "normal" | "any" => Some(Self::SingleAdjacent),
            "all-opponents" | "all-adjacent-foes" => Some(Self::AllOpponents),
            "all-adjacent" | "all-adjacent-pokemon" => Some(Self::AllAdjacent),
            "all-other" | "all-other-pokemon" => Some(Self::AllOther),
            "entry-hazard" | "foe-side" | "opponents-field" => Some(Self::EntryHazard),
            _ => None,
        }
    }

    /// Whether this target can strike two or more Pokemon at once.
    pub fn is_spread(&self) -> bool {
        matches!(self, Self::AllOpponents | Self::AllAdjacent | Self::AllOther)
    }
}
