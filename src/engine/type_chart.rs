//! # Type Effectiveness
//!
//! The constant 18x18 Gen 6+ matchup table and dual-type composition.
//! Entries are stored in quarter steps (0 = immune, 2 = resisted,
//! 4 = neutral, 8 = super effective) so composed effectiveness stays in
//! exact integer arithmetic.

use crate::types::PokemonType;

/// Composed effectiveness against a defender: one of 0, 1/4, 1/2, 1, 2, 4,
/// stored in quarter units (0, 1, 2, 4, 8, 16).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Effectiveness(u8);

impl Effectiveness {
    pub const IMMUNE: Self = Self(0);
    pub const QUARTER: Self = Self(1);
    pub const HALF: Self = Self(2);
    pub const NEUTRAL: Self = Self(4);
    pub const DOUBLE: Self = Self(8);
    pub const QUADRUPLE: Self = Self(16);

    /// Raw quarter-unit value (effectiveness x 4).
    pub fn quarters(&self) -> u32 {
        self.0 as u32
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 4.0
    }

    pub fn is_immune(&self) -> bool {
        self.0 == 0
    }

    pub fn is_super_effective(&self) -> bool {
        self.0 >= 8
    }

    pub fn is_resisted(&self) -> bool {
        self.0 > 0 && self.0 < 4
    }

    /// Display label for audit trails ("4x Super Effective").
    pub fn label(&self) -> &'static str {
        match self.0 {
            0 => "Immune (0x)",
            1 => "4x Resist (0.25x)",
            2 => "Resist (0.5x)",
            4 => "Neutral (1x)",
            8 => "Super Effective (2x)",
            _ => "4x Super Effective (4x)",
        }
    }
}

/// Single-type effectiveness in quarter units. Row = attacking type,
/// column = defending type, canonical enum order.
const CHART: [[u8; 18]; 18] = [
    // Defender:   Nor Fir Wat Ele Gra Ice Fig Poi Gro Fly Psy Bug Roc Gho Dra Dar Ste Fai
    /* Normal   */ [4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  2,  0,  4,  4,  2,  4],
    /* Fire     */ [4,  2,  2,  4,  8,  8,  4,  4,  4,  4,  4,  8,  2,  4,  2,  4,  8,  4],
    /* Water    */ [4,  8,  2,  4,  2,  4,  4,  4,  8,  4,  4,  4,  8,  4,  2,  4,  4,  4],
    /* Electric */ [4,  4,  8,  2,  2,  4,  4,  4,  0,  8,  4,  4,  4,  4,  2,  4,  4,  4],
    /* Grass    */ [4,  2,  8,  4,  2,  4,  4,  2,  8,  2,  4,  2,  8,  4,  2,  4,  2,  4],
    /* Ice      */ [4,  2,  2,  4,  8,  2,  4,  4,  8,  8,  4,  4,  4,  4,  8,  4,  2,  4],
    /* Fighting */ [8,  4,  4,  4,  4,  8,  4,  2,  4,  2,  2,  2,  8,  0,  4,  8,  8,  2],
    /* Poison   */ [4,  4,  4,  4,  8,  4,  4,  2,  2,  4,  4,  4,  2,  2,  4,  4,  0,  8],
    /* Ground   */ [4,  8,  4,  8,  2,  4,  4,  8,  4,  0,  4,  2,  8,  4,  4,  4,  8,  4],
    /* Flying   */ [4,  4,  4,  2,  8,  4,  8,  4,  4,  4,  4,  8,  2,  4,  4,  4,  2,  4],
    /* Psychic  */ [4,  4,  4,  4,  4,  4,  8,  8,  4,  4,  2,  4,  4,  4,  4,  0,  2,  4],
    /* Bug      */ [4,  2,  4,  4,  8,  4,  2,  2,  4,  2,  8,  4,  4,  2,  4,  8,  2,  2],
    /* Rock     */ [4,  8,  4,  4,  4,  8,  2,  4,  2,  8,  4,  8,  4,  4,  4,  4,  2,  4],
    /* Ghost    */ [0,  4,  4,  4,  4,  4,  4,  4,  4,  4,  8,  4,  4,  8,  4,  2,  4,  4],
    /* Dragon   */ [4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  8,  4,  2,  0],
    /* Dark     */ [4,  4,  4,  4,  4,  4,  2,  4,  4,  4,  8,  4,  4,  8,  4,  2,  4,  2],
    /* Steel    */ [4,  2,  2,  2,  4,  8,  4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  2,  8],
    /* Fairy    */ [4,  2,  4,  4,  4,  4,  8,  2,  4,  4,  4,  4,  4,  4,  8,  8,  2,  4],
];

/// Effectiveness of one attacking type against a single defending type.
pub fn single_effectiveness(attacking: PokemonType, defending: PokemonType) -> Effectiveness {
    Effectiveness(CHART[attacking.as_index()][defending.as_index()])
}

/// Effectiveness against a defender's full type list (one or two types,
/// composed multiplicatively; order is irrelevant).
///
/// An active Tera type replaces the entire defender type list for this
/// lookup; callers pass the substituted list.
pub fn type_effectiveness(attacking: PokemonType, defender_types: &[PokemonType]) -> Effectiveness {
    let mut quarters: u32 = 4;
    for &defending in defender_types {
        quarters = quarters * single_effectiveness(attacking, defending).quarters() / 4;
    }
    debug_assert!(matches!(quarters, 0 | 1 | 2 | 4 | 8 | 16));
    Effectiveness(quarters as u8)
}
