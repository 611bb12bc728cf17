//! # vgc-engine
//!
//! A deterministic Gen 9 VGC battle-mechanics engine for doubles team
//! building: damage distributions bit-identical to the community
//! calculator, stat and speed math, EV spread optimization against
//! speed and survival benchmarks, and team matchup analysis with
//! priority-aware game plans.
//!
//! ## Architecture Overview
//!
//! - `types`: closed enumerations (types, natures, stats, field states)
//!   and error types
//! - `data`: immutable species/move records and the provider traits
//!   collaborators implement
//! - `engine`: the calculation core (type chart, modifier pipeline,
//!   damage, KO math, priority, chip damage)
//! - `search`: EV optimization over level-50 breakpoints
//! - `team`: matchup matrices, threat ranking and game-plan synthesis
//! - `diff`: team version comparison with per-field change explanations
//! - `rules`: regulation catalog and team legality
//! - `io`: Showdown paste codec and the CLI surface
//!
//! The engine is pure and synchronous: all I/O happens in collaborators
//! before an engine call, every function is a value-in/value-out
//! transformation, and identical inputs produce byte-identical output.

pub mod adapter;
pub mod config;
pub mod data;
pub mod diff;
pub mod engine;
pub mod io;
pub mod pokemon;
pub mod rules;
pub mod search;
pub mod stats;
pub mod team;
pub mod types;
pub mod utils;

// Primary API exports.
pub use engine::{
    calculate_damage, ko_probability, multi_hit_ko_probability, project_chip_damage,
    DamageResult, Effectiveness, KoProbability, Modifier, ModifierContext,
};
pub use engine::{determine_turn_order, effective_priority, effective_speed, MoveChoice, TurnOrder};
pub use pokemon::{BaseStats, EvSpread, IvSpread, PokemonBuild, Team};
pub use stats::{calculate_all_stats, calculate_hp, calculate_stat, find_speed_evs, max_speed, FinalStats};
pub use types::{
    EngineError, EngineResult, MoveCategory, MoveTarget, Nature, PokemonType, Stat, Terrain,
    Weather,
};

// Search re-exports.
pub use search::{
    design_spread_with_benchmarks, find_optimal_nature, optimize_dual_survival, CancelToken,
    DualSurvivalOutcome,
};

// Team analysis re-exports.
pub use team::{build_profile, generate_game_plan, GamePlan, PokemonProfile};

// Team diff re-exports.
pub use diff::{compare_pokemon, generate_team_diff, PokemonDiff, TeamDiff};

// Rules re-exports.
pub use rules::{validate_team, LegalityReport, Regulation, RegulationCatalog};

// Utility re-exports.
pub use utils::normalize_name;
