//! # Typical-Set Adapter
//!
//! Synthesizes an opponent build from usage statistics when the caller
//! has no concrete data: top-1 spread, item and ability from the usage
//! provider, then a small known-meta synergy table, then a bland
//! 252 HP / 252 attacking-stat fallback.

use crate::data::{fetch_species, DataProvider, UsageProvider, UsageStats};
use crate::pokemon::{EvSpread, PokemonBuild};
use crate::types::{EngineResult, Nature};
use crate::utils::normalize_name;
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Known meta synergies: species -> (item, ability), used when the
    /// usage provider has nothing.
    static ref META_SYNERGIES: HashMap<&'static str, (&'static str, &'static str)> = {
        let mut m = HashMap::new();
        m.insert("landorus", ("life-orb", "sheer-force"));
        m.insert("landorus-incarnate", ("life-orb", "sheer-force"));
        m.insert("nidoking", ("life-orb", "sheer-force"));
        m.insert("nidoqueen", ("life-orb", "sheer-force"));
        m.insert("conkeldurr", ("flame-orb", "guts"));
        m.insert("ursaluna", ("flame-orb", "guts"));
        m.insert("ursaluna-bloodmoon", ("life-orb", "minds-eye"));
        m.insert("urshifu", ("choice-band", "unseen-fist"));
        m.insert("urshifu-single-strike", ("choice-band", "unseen-fist"));
        m.insert("urshifu-rapid-strike", ("choice-band", "unseen-fist"));
        m.insert("ogerpon", ("teal-mask", "defiant"));
        m.insert("ogerpon-teal-mask", ("teal-mask", "defiant"));
        m.insert("ogerpon-hearthflame", ("hearthflame-mask", "mold-breaker"));
        m.insert("ogerpon-wellspring", ("wellspring-mask", "water-absorb"));
        m.insert("ogerpon-cornerstone", ("cornerstone-mask", "sturdy"));
        m.insert("chien-pao", ("focus-sash", "sword-of-ruin"));
        m.insert("chi-yu", ("choice-specs", "beads-of-ruin"));
        m.insert("ting-lu", ("leftovers", "vessel-of-ruin"));
        m.insert("wo-chien", ("rocky-helmet", "tablets-of-ruin"));
        m
    };

    /// Item -> abilities that pair with it, most synergistic first.
    static ref ITEM_ABILITY_SYNERGIES: HashMap<&'static str, Vec<&'static str>> = {
        let mut m = HashMap::new();
        m.insert("life-orb", vec!["sheer-force"]);
        m.insert("choice-band", vec!["huge-power", "pure-power", "gorilla-tactics"]);
        m.insert("choice-specs", vec!["adaptability"]);
        m.insert("assault-vest", vec!["regenerator"]);
        m.insert("rocky-helmet", vec!["rough-skin", "iron-barbs"]);
        m.insert("leftovers", vec!["regenerator", "poison-heal"]);
        m.insert("black-sludge", vec!["regenerator", "poison-heal"]);
        m.insert("flame-orb", vec!["guts", "marvel-scale"]);
        m.insert("toxic-orb", vec!["poison-heal", "guts", "marvel-scale"]);
        m.insert("booster-energy", vec!["protosynthesis", "quark-drive"]);
        m
    };
}

/// Pick the ability to pair with `item` from a usage-ordered ability
/// list: a known synergy when present, otherwise the most used.
pub fn synergy_ability(item: &str, abilities: &[String]) -> Option<String> {
    if abilities.is_empty() {
        return None;
    }
    if let Some(preferred) = ITEM_ABILITY_SYNERGIES.get(normalize_name(item).as_str()) {
        for candidate in preferred {
            if let Some(found) = abilities.iter().find(|a| normalize_name(a) == *candidate) {
                return Some(normalize_name(found));
            }
        }
    }
    Some(normalize_name(&abilities[0]))
}

/// Whether an item/ability pair is a known synergy.
pub fn has_synergy(item: &str, ability: &str) -> bool {
    ITEM_ABILITY_SYNERGIES
        .get(normalize_name(item).as_str())
        .is_some_and(|preferred| preferred.contains(&normalize_name(ability).as_str()))
}

/// Synthesize the most typical build of a species: usage-stats top-1
/// first, then the known-meta table, then the bland fallback.
pub fn typical_set(
    data: &dyn DataProvider,
    usage: Option<&dyn UsageProvider>,
    species_name: &str,
    format: &str,
    rating: u16,
) -> EngineResult<PokemonBuild> {
    let species = fetch_species(data, species_name)?;
    let mut build = PokemonBuild::new(species.name.clone(), species.base_stats, species.types.clone());

    let stats = usage.and_then(|provider| provider.get_usage(&species.name, format, rating).ok());
    apply_usage(&mut build, stats.as_ref());

    // Known meta synergies when usage left gaps.
    if let Some((item, ability)) = META_SYNERGIES.get(normalize_name(&species.name).as_str()) {
        if build.item.is_none() {
            build.item = Some((*item).to_string());
        }
        if build.ability.is_none() {
            build.ability = Some((*ability).to_string());
        }
    }

    // Bland fallback: 252 HP / 252 attacking stat, neutral nature,
    // first listed ability.
    if build.evs.total() == 0 {
        build.evs = EvSpread { hp: 252, ..Default::default() };
        if build.base_stats.is_physical_attacker() {
            build.evs.attack = 252;
        } else {
            build.evs.special_attack = 252;
        }
        build.nature = Nature::Serious;
    }
    if build.ability.is_none() {
        build.ability = species.abilities.first().map(|a| normalize_name(a));
    }

    Ok(build)
}

fn apply_usage(build: &mut PokemonBuild, stats: Option<&UsageStats>) {
    let Some(stats) = stats else { return };

    if let Some(top_spread) = stats.top_spreads.first() {
        build.nature = top_spread.nature;
        build.evs = top_spread.evs;
    }
    if let Some(top_item) = stats.top_items.first() {
        build.item = Some(normalize_name(top_item));
        build.ability = synergy_ability(top_item, &stats.top_abilities);
    } else if let Some(top_ability) = stats.top_abilities.first() {
        build.ability = Some(normalize_name(top_ability));
    }
    build.moves = stats.top_moves.iter().take(4).map(|m| normalize_name(m)).collect();
}
