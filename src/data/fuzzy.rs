//! # Fuzzy Name Matching
//!
//! "Did you mean...?" suggestions for unknown species, move and nature
//! names, surfaced inside `UnknownSpecies` / `UnknownMove` errors.

use crate::types::Nature;
use crate::utils::normalize_name;

/// Popular VGC species used as the suggestion pool. A subset is enough:
/// suggestions only need to catch typos of names people actually enter.
const COMMON_SPECIES: &[&str] = &[
    // Restricted
    "koraidon", "miraidon", "calyrex-shadow", "calyrex-ice", "zacian",
    "kyogre", "groudon", "rayquaza", "dialga", "palkia", "giratina",
    "reshiram", "zekrom", "kyurem", "xerneas", "yveltal", "lunala",
    "solgaleo", "necrozma", "eternatus", "terapagos",
    // Reg F-H meta staples
    "flutter-mane", "iron-hands", "iron-bundle", "iron-valiant", "iron-moth",
    "roaring-moon", "great-tusk", "iron-treads", "chi-yu", "chien-pao",
    "ting-lu", "wo-chien", "landorus-therian", "landorus", "incineroar",
    "rillaboom", "urshifu-rapid-strike", "urshifu-single-strike", "urshifu",
    "tornadus", "thundurus", "amoonguss", "grimmsnarl", "whimsicott",
    "dragapult", "garchomp", "tyranitar", "excadrill", "pelipper",
    "politoed", "kingambit", "gholdengo", "annihilape", "palafin",
    "arcanine", "arcanine-hisui", "ninetales-alola", "talonflame",
    "murkrow", "dondozo", "tatsugiri", "farigiraf", "indeedee-female",
    "indeedee", "gothitelle", "oranguru", "porygon2", "dusclops",
    "hatterene", "torkoal", "lilligant-hisui", "bronzong", "cresselia",
    "regieleki", "raging-bolt", "gouging-fire", "iron-crown", "iron-boulder",
    "ogerpon", "ogerpon-wellspring", "ogerpon-hearthflame", "ogerpon-cornerstone",
    "entei", "raikou", "suicune", "ferrothorn", "amoonguss", "charizard",
    "azumarill", "medicham", "dragonite", "gyarados", "snorlax", "gengar",
    "salamence", "metagross", "lucario", "togekiss", "hydreigon",
    "volcarona", "mimikyu", "toxapex", "rotom-wash", "rotom-heat", "clefable",
];

/// Common moves used as the suggestion pool.
const COMMON_MOVES: &[&str] = &[
    "close-combat", "earthquake", "rock-slide", "iron-head", "play-rough",
    "crunch", "knock-off", "u-turn", "fake-out", "sucker-punch",
    "extreme-speed", "aqua-jet", "ice-shard", "mach-punch", "bullet-punch",
    "brave-bird", "flare-blitz", "wild-charge", "wood-hammer", "head-smash",
    "stone-edge", "sacred-sword", "wicked-blow", "surging-strikes",
    "fire-punch", "ivy-cudgel", "wave-crash",
    "moonblast", "dazzling-gleam", "shadow-ball", "psychic", "thunderbolt",
    "ice-beam", "flamethrower", "hydro-pump", "energy-ball", "earth-power",
    "sludge-bomb", "dark-pulse", "aura-sphere", "flash-cannon", "draco-meteor",
    "overheat", "leaf-storm", "volt-switch", "scald", "heat-wave",
    "muddy-water", "icy-wind", "snarl", "electroweb",
    "protect", "detect", "follow-me", "rage-powder", "ally-switch",
    "trick-room", "tailwind", "helping-hand", "spore", "sleep-powder",
    "thunder-wave", "will-o-wisp", "taunt", "encore", "disable",
    "light-screen", "reflect", "aurora-veil", "spikes", "sticky-web",
    "swords-dance", "dragon-dance", "calm-mind", "nasty-plot", "quiver-dance",
    "substitute", "endure", "wide-guard", "quick-guard", "grassy-glide",
];

/// Similarity ratio in [0, 1] based on edit distance, the same measure
/// difflib-style matchers use in spirit.
fn similarity(a: &str, b: &str) -> f64 {
    let dist = levenshtein(a, b);
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - dist as f64 / longest as f64
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[b.len()]
}

fn closest(input: &str, pool: &[&str], max_suggestions: usize, cutoff: f64) -> Vec<String> {
    let normalized = normalize_name(input);

    // Exact hit after normalization needs no fuzzy pass.
    if pool.contains(&normalized.as_str()) {
        return vec![normalized];
    }

    // Hyphen-insensitive exact match ("flutter mane" -> "flutter-mane").
    let squashed = normalized.replace('-', "");
    for candidate in pool {
        if candidate.replace('-', "") == squashed {
            return vec![candidate.to_string()];
        }
    }

    let mut scored: Vec<(f64, &str)> = pool
        .iter()
        .map(|candidate| (similarity(&normalized, candidate), *candidate))
        .filter(|(score, _)| *score >= cutoff)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.dedup_by(|a, b| a.1 == b.1);
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Suggest species names for a typo. At most three, similarity >= 0.6.
pub fn suggest_species(input: &str) -> Vec<String> {
    closest(input, COMMON_SPECIES, 3, 0.6)
}

/// Suggest move names for a typo.
pub fn suggest_move(input: &str) -> Vec<String> {
    closest(input, COMMON_MOVES, 3, 0.6)
}

/// Suggest nature names for a typo.
pub fn suggest_nature(input: &str) -> Vec<String> {
    let pool: Vec<&str> = Nature::all().iter().map(|n| n.display_name()).collect();
    let normalized = input.to_lowercase();
    let mut scored: Vec<(f64, &str)> = pool
        .iter()
        .map(|candidate| (similarity(&normalized, &candidate.to_lowercase()), *candidate))
        .filter(|(score, _)| *score >= 0.6)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(3).map(|(_, name)| name.to_string()).collect()
}
