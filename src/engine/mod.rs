//! # Battle Mechanics Engine
//!
//! The deterministic Gen 9 calculation core: type chart, modifier
//! pipeline, damage distribution, KO classification, priority/turn
//! order, chip damage and item effect tables. Everything here is a pure
//! value-in/value-out transformation.

pub mod chip;
pub mod damage;
pub mod items;
pub mod ko;
pub mod modifiers;
pub mod priority;
pub mod type_chart;

pub use chip::{project_chip_damage, ChipProjection, ChipSources, ChipStatus};
pub use damage::{calculate_damage, DamageResult};
pub use ko::{ko_probability, multi_hit_ko_probability, KoProbability};
pub use modifiers::{Modifier, ModifierContext};
pub use priority::{
    determine_turn_order, effective_priority, effective_speed, prankster_blocked, FirstMover,
    MoveChoice, SpeedConditions, TurnOrder,
};
pub use type_chart::{type_effectiveness, Effectiveness};
