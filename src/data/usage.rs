//! # Usage Statistics
//!
//! Smogon-style usage data records and the provider trait the set
//! adapter consumes. Format strings follow `gen9vgc<year>reg<letter>`
//! with an optional `bo3` suffix.

use crate::pokemon::EvSpread;
use crate::types::{Nature, ProviderError};
use serde::{Deserialize, Serialize};

/// Valid rating cutoffs for usage queries.
pub const RATING_CUTOFFS: [u16; 4] = [0, 1500, 1630, 1760];

/// Default rating cutoff: the top-level ladder slice.
pub const DEFAULT_RATING: u16 = 1760;

/// One observed spread with its usage share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadUsage {
    pub nature: Nature,
    pub evs: EvSpread,
    pub usage_pct: f64,
}

/// Aggregated usage statistics for one species in one format/rating
/// slice, most-used entries first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    #[serde(default)]
    pub top_items: Vec<String>,
    #[serde(default)]
    pub top_abilities: Vec<String>,
    #[serde(default)]
    pub top_spreads: Vec<SpreadUsage>,
    #[serde(default)]
    pub top_moves: Vec<String>,
    #[serde(default)]
    pub top_tera_types: Vec<String>,
    #[serde(default)]
    pub top_teammates: Vec<String>,
}

/// Usage data source. Implemented by the Smogon stats collaborator;
/// tests use a fixed table.
pub trait UsageProvider {
    fn get_usage(&self, species: &str, format: &str, rating: u16) -> Result<UsageStats, ProviderError>;

    /// Whether a newer month of data appeared since this provider was
    /// opened. Surfaced to the caller as a freshness notice; the engine
    /// itself caches nothing.
    fn newer_data_available(&self) -> bool {
        false
    }
}

/// Build a Smogon format string: `gen9vgc2026regf`, optionally `...bo3`.
pub fn smogon_format(year: u16, regulation_letter: char, bo3: bool) -> String {
    let base = format!("gen9vgc{}reg{}", year, regulation_letter.to_ascii_lowercase());
    if bo3 {
        format!("{}bo3", base)
    } else {
        base
    }
}

/// Snap an arbitrary rating to the nearest valid cutoff at or below it.
pub fn clamp_rating(rating: u16) -> u16 {
    RATING_CUTOFFS
        .iter()
        .rev()
        .copied()
        .find(|&cutoff| cutoff <= rating)
        .unwrap_or(0)
}
