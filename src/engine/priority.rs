//! # Priority & Turn Order
//!
//! Priority brackets run from -7 (Trick Room) to +5 (Helping Hand).
//! Conditional boosts: Prankster (+1 on status, blocked by Dark-type
//! targets), Gale Wings (+1 on Flying moves at full HP), Grassy Glide
//! (+1 in Grassy Terrain), Triage (+3 on healing moves). Within a
//! bracket, Speed decides, inverted under Trick Room; exact ties are
//! 50/50 and reported as such.

use crate::engine::modifiers::apply_stage;
use crate::types::{PokemonType, Terrain};
use crate::utils::normalize_name;
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Base priority brackets for every move off bracket 0.
    static ref PRIORITY_MOVES: HashMap<&'static str, i8> = {
        let mut m = HashMap::new();
        // +5
        m.insert("helping-hand", 5);
        // +4 protection
        for name in ["protect", "detect", "endure", "kings-shield", "spiky-shield",
                     "baneful-bunker", "silk-trap", "burning-bulwark", "obstruct", "max-guard"] {
            m.insert(name, 4);
        }
        // +3
        for name in ["fake-out", "quick-guard", "wide-guard", "crafty-shield", "mat-block"] {
            m.insert(name, 3);
        }
        // +2
        for name in ["extreme-speed", "first-impression", "feint"] {
            m.insert(name, 2);
        }
        // +1
        for name in ["aqua-jet", "bullet-punch", "ice-shard", "mach-punch", "quick-attack",
                     "shadow-sneak", "sucker-punch", "water-shuriken", "accelerock",
                     "jet-punch", "vacuum-wave"] {
            m.insert(name, 1);
        }
        // Negative brackets
        m.insert("vital-throw", -1);
        for name in ["focus-punch", "shell-trap", "beak-blast"] {
            m.insert(name, -3);
        }
        for name in ["avalanche", "revenge"] {
            m.insert(name, -4);
        }
        m.insert("after-you", -5);
        for name in ["counter", "mirror-coat", "metal-burst", "roar", "whirlwind",
                     "dragon-tail", "circle-throw"] {
            m.insert(name, -6);
        }
        for name in ["trick-room", "teleport"] {
            m.insert(name, -7);
        }
        m
    };
}

/// Healing moves boosted by Triage.
const TRIAGE_MOVES: &[&str] = &[
    "drain-punch", "giga-drain", "draining-kiss", "leech-life", "horn-leech",
    "oblivion-wing", "parabolic-charge", "absorb", "mega-drain", "strength-sap",
    "recover", "roost", "slack-off", "synthesis", "moonlight", "morning-sun",
];

/// Everything the effective-priority computation needs to know about one
/// actor's chosen move.
#[derive(Debug, Clone, Default)]
pub struct MoveChoice {
    pub move_name: String,
    pub is_status: bool,
    pub move_type: Option<PokemonType>,
    pub ability: Option<String>,
    /// Current HP share, for Gale Wings.
    pub hp_percent: f64,
}

impl MoveChoice {
    pub fn new(move_name: impl Into<String>) -> Self {
        Self {
            move_name: move_name.into(),
            is_status: false,
            move_type: None,
            ability: None,
            hp_percent: 100.0,
        }
    }

    pub fn status(mut self) -> Self {
        self.is_status = true;
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }
}

/// Base priority bracket of a move by name.
pub fn base_priority(move_name: &str) -> i8 {
    PRIORITY_MOVES
        .get(normalize_name(move_name).as_str())
        .copied()
        .unwrap_or(0)
}

/// Effective priority after ability and terrain boosts.
///
/// Grassy Glide sits in bracket 0 and only gains +1 inside Grassy
/// Terrain.
pub fn effective_priority(choice: &MoveChoice, terrain: Terrain) -> i8 {
    let normalized = normalize_name(&choice.move_name);
    let base = PRIORITY_MOVES.get(normalized.as_str()).copied().unwrap_or(0);

    if normalized == "grassy-glide" {
        return if terrain == Terrain::Grassy { 1 } else { 0 };
    }

    let ability = choice.ability.as_deref().map(normalize_name).unwrap_or_default();
    match ability.as_str() {
        "prankster" if choice.is_status => base + 1,
        "gale-wings"
            if choice.move_type == Some(PokemonType::Flying) && choice.hp_percent >= 100.0 =>
        {
            base + 1
        }
        "triage" if TRIAGE_MOVES.contains(&normalized.as_str()) => base + 3,
        _ => base,
    }
}

/// Whether a move's priority came from Prankster (for the Dark-type
/// immunity check).
pub fn priority_from_prankster(choice: &MoveChoice) -> bool {
    matches!(choice.ability.as_deref().map(normalize_name).as_deref(), Some("prankster"))
        && choice.is_status
}

/// Dark-type targets are immune to priority gained from Prankster; the
/// move fails against them outright.
pub fn prankster_blocked(choice: &MoveChoice, target_types: &[PokemonType]) -> bool {
    priority_from_prankster(choice) && target_types.contains(&PokemonType::Dark)
}

/// Which of the two actors moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstMover {
    First,
    Second,
    SpeedTie,
}

/// Result of a two-actor turn-order resolution.
#[derive(Debug, Clone)]
pub struct TurnOrder {
    pub first_mover: FirstMover,
    pub first_priority: i8,
    pub second_priority: i8,
    pub reason: String,
    pub speed_tie: bool,
    pub trick_room_active: bool,
}

/// Resolve turn order between two actors: higher priority first, then
/// Speed (slower first under Trick Room), exact ties 50/50.
pub fn determine_turn_order(
    first: (&MoveChoice, u16),
    second: (&MoveChoice, u16),
    terrain: Terrain,
    trick_room: bool,
) -> TurnOrder {
    let (first_choice, first_speed) = first;
    let (second_choice, second_speed) = second;
    let p1 = effective_priority(first_choice, terrain);
    let p2 = effective_priority(second_choice, terrain);

    let (mover, reason, tie) = if p1 != p2 {
        if p1 > p2 {
            (FirstMover::First, format!("{} has higher priority ({:+} vs {:+})", first_choice.move_name, p1, p2), false)
        } else {
            (FirstMover::Second, format!("{} has higher priority ({:+} vs {:+})", second_choice.move_name, p2, p1), false)
        }
    } else if trick_room {
        if first_speed < second_speed {
            (FirstMover::First, format!("Slower in Trick Room ({} vs {})", first_speed, second_speed), false)
        } else if second_speed < first_speed {
            (FirstMover::Second, format!("Slower in Trick Room ({} vs {})", second_speed, first_speed), false)
        } else {
            (FirstMover::SpeedTie, format!("Speed tie in Trick Room ({})", first_speed), true)
        }
    } else if first_speed > second_speed {
        (FirstMover::First, format!("Faster ({} vs {})", first_speed, second_speed), false)
    } else if second_speed > first_speed {
        (FirstMover::Second, format!("Faster ({} vs {})", second_speed, first_speed), false)
    } else {
        (FirstMover::SpeedTie, format!("Speed tie ({})", first_speed), true)
    };

    TurnOrder {
        first_mover: mover,
        first_priority: p1,
        second_priority: p2,
        reason,
        speed_tie: tie,
        trick_room_active: trick_room,
    }
}

/// In-battle speed conditions for the effective-speed computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeedConditions {
    pub speed_stage: i8,
    pub paralyzed: bool,
    pub tailwind: bool,
    pub choice_scarf: bool,
    /// Quick Feet: 1.5x while statused, and the paralysis drop is
    /// ignored.
    pub quick_feet_active: bool,
}

/// Effective Speed after stages, Tailwind, Choice Scarf, paralysis and
/// Quick Feet.
pub fn effective_speed(speed_stat: u16, conditions: SpeedConditions) -> u16 {
    let mut speed = apply_stage(speed_stat as u32, conditions.speed_stage);
    if conditions.tailwind {
        speed *= 2;
    }
    if conditions.choice_scarf {
        speed = speed * 3 / 2;
    }
    if conditions.quick_feet_active {
        speed = speed * 3 / 2;
    } else if conditions.paralyzed {
        speed /= 2;
    }
    speed as u16
}
