//! # Reference Data Layer
//!
//! Immutable species/move/ability records and the provider traits
//! collaborators implement. The engine never performs I/O itself: callers
//! fetch records up front (through these traits) and hand them in by
//! value. Lookup misses get one retry with the form suffix stripped, and
//! unknown names come back with fuzzy-match suggestions.

pub mod fuzzy;
pub mod usage;

use crate::pokemon::BaseStats;
use crate::types::{EngineError, MoveCategory, MoveTarget, PokemonType, ProviderError};
use crate::utils::{normalize_name, strip_form_suffix};
use serde::{Deserialize, Serialize};

pub use usage::{SpreadUsage, UsageProvider, UsageStats};

/// Immutable species reference record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    /// Canonical lowercase-hyphenated name, form suffix preserved.
    pub name: String,
    pub base_stats: BaseStats,
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub abilities: Vec<String>,
}

/// Multi-hit descriptor for moves that strike more than once per use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiHit {
    pub min_hits: u8,
    pub max_hits: u8,
    /// Surging Strikes / Wicked Blow land critical hits on every strike.
    pub always_crit: bool,
}

/// Immutable move reference record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    /// None for status moves and unresolved variable-power moves. The
    /// damage calculator requires the caller to resolve variable power
    /// before the call.
    #[serde(default)]
    pub base_power: Option<u16>,
    #[serde(default)]
    pub accuracy: Option<u8>,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub target: MoveTarget,
    #[serde(default)]
    pub effect_chance: Option<u8>,
    #[serde(default)]
    pub multi_hit: Option<MultiHit>,
    #[serde(default)]
    pub makes_contact: bool,
}

impl MoveData {
    /// A bare damaging move, for call sites that assemble moves inline.
    pub fn damaging(
        name: impl Into<String>,
        move_type: PokemonType,
        category: MoveCategory,
        base_power: u16,
    ) -> Self {
        let name = normalize_name(&name.into());
        let multi_hit = multi_hit_for(&name);
        Self {
            name,
            move_type,
            category,
            base_power: Some(base_power),
            accuracy: Some(100),
            priority: 0,
            target: MoveTarget::SingleAdjacent,
            effect_chance: None,
            multi_hit,
            makes_contact: category == MoveCategory::Physical,
        }
    }

    /// A status move (no base power).
    pub fn status(name: impl Into<String>, move_type: PokemonType) -> Self {
        Self {
            name: normalize_name(&name.into()),
            move_type,
            category: MoveCategory::Status,
            base_power: None,
            accuracy: None,
            priority: 0,
            target: MoveTarget::SingleAdjacent,
            effect_chance: None,
            multi_hit: None,
            makes_contact: false,
        }
    }

    pub fn is_damaging(&self) -> bool {
        self.category.is_damaging()
    }

    pub fn with_target(mut self, target: MoveTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_effect_chance(mut self, chance: u8) -> Self {
        self.effect_chance = Some(chance);
        self
    }
}

/// Immutable ability reference record: the name plus a canonical effect
/// tag the engine matches against its closed handler tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityData {
    pub name: String,
    pub effect_tag: String,
}

/// Known multi-hit moves and their hit counts.
pub fn multi_hit_for(normalized_name: &str) -> Option<MultiHit> {
    match normalized_name {
        "surging-strikes" => Some(MultiHit { min_hits: 3, max_hits: 3, always_crit: true }),
        "wicked-blow" => Some(MultiHit { min_hits: 1, max_hits: 1, always_crit: true }),
        "population-bomb" => Some(MultiHit { min_hits: 1, max_hits: 10, always_crit: false }),
        "icicle-spear" | "rock-blast" | "bullet-seed" | "pin-missile" | "scale-shot"
        | "water-shuriken" => Some(MultiHit { min_hits: 2, max_hits: 5, always_crit: false }),
        "dragon-darts" | "double-hit" | "dual-wingbeat" | "twin-beam" | "double-kick"
        | "tachyon-cutter" => Some(MultiHit { min_hits: 2, max_hits: 2, always_crit: false }),
        "triple-dive" => Some(MultiHit { min_hits: 3, max_hits: 3, always_crit: false }),
        "triple-axel" => Some(MultiHit { min_hits: 1, max_hits: 3, always_crit: false }),
        _ => None,
    }
}

/// Species/move/ability data source. Collaborators (REST client over a
/// disk cache in the reference deployment) implement this; tests use an
/// in-memory table.
pub trait DataProvider {
    fn get_species(&self, name: &str) -> Result<SpeciesData, ProviderError>;
    fn get_move(&self, name: &str) -> Result<MoveData, ProviderError>;
    fn get_ability(&self, name: &str) -> Result<AbilityData, ProviderError>;
}

/// Maximum retries for transient provider failures.
const MAX_TRANSIENT_RETRIES: u32 = 3;

fn with_retries<T>(
    mut call: impl FnMut() -> Result<T, ProviderError>,
) -> Result<T, ProviderError> {
    let mut attempt = 0;
    loop {
        match call() {
            Err(ProviderError::Transient { reason }) if attempt < MAX_TRANSIENT_RETRIES => {
                attempt += 1;
                std::thread::sleep(std::time::Duration::from_millis(100 << attempt));
                let _ = reason;
            }
            other => return other,
        }
    }
}

/// Fetch a species record, retrying transient failures and falling back
/// to the form-stripped name on a miss. An unrecoverable miss surfaces
/// fuzzy-match suggestions.
pub fn fetch_species(provider: &dyn DataProvider, name: &str) -> Result<SpeciesData, EngineError> {
    let normalized = normalize_name(name);
    match with_retries(|| provider.get_species(&normalized)) {
        Ok(species) => Ok(species),
        Err(ProviderError::NotFound { .. }) => {
            if let Some(base) = strip_form_suffix(&normalized) {
                if let Ok(species) = with_retries(|| provider.get_species(&base)) {
                    return Ok(species);
                }
            }
            Err(EngineError::UnknownSpecies {
                name: normalized.clone(),
                suggestions: fuzzy::suggest_species(&normalized),
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// Fetch a move record, retrying transient failures. An unrecoverable
/// miss surfaces fuzzy-match suggestions.
pub fn fetch_move(provider: &dyn DataProvider, name: &str) -> Result<MoveData, EngineError> {
    let normalized = normalize_name(name);
    match with_retries(|| provider.get_move(&normalized)) {
        Ok(move_data) => Ok(move_data),
        Err(ProviderError::NotFound { .. }) => Err(EngineError::UnknownMove {
            name: normalized.clone(),
            suggestions: fuzzy::suggest_move(&normalized),
        }),
        Err(err) => Err(err.into()),
    }
}
