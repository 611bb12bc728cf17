//! # Item Effects
//!
//! Competitive item mechanics: stat-modifying items (Choice, Assault
//! Vest, Eviolite), damage-modifying items (Life Orb, Expert Belt, type
//! items, the Ogerpon masks, Metronome), Booster Energy, berry
//! activation thresholds and the Focus Sash survival check.

use crate::engine::modifiers::Modifier;
use crate::pokemon::BaseStats;
use crate::types::{MoveCategory, PokemonType, Stat};
use crate::utils::{base_species, normalize_name};

/// Paradox Pokemon eligible for Booster Energy.
pub const PARADOX_POKEMON: &[&str] = &[
    "great-tusk", "scream-tail", "brute-bonnet", "flutter-mane",
    "slither-wing", "sandy-shocks", "roaring-moon", "walking-wake",
    "gouging-fire", "raging-bolt",
    "iron-treads", "iron-bundle", "iron-hands", "iron-jugulis",
    "iron-moth", "iron-thorns", "iron-valiant", "iron-leaves",
    "iron-boulder", "iron-crown",
];

/// Not-fully-evolved species that benefit from Eviolite. A competitive
/// subset; the full NFE list is much longer.
pub const NFE_POKEMON: &[&str] = &[
    "chansey", "porygon2", "dusclops", "rhydon", "magmar", "electabuzz",
    "scyther", "pikachu", "clefairy", "haunter", "kadabra", "machoke",
    "graveler", "magneton", "slowpoke", "shellder", "onix", "lickitung",
    "tangela", "seadra", "murkrow", "misdreavus", "gligar", "sneasel",
    "togetic", "vigoroth", "nosepass", "roselia", "duskull", "snorunt",
];

/// Type-boosting held items (1.2x on the matching move type).
const TYPE_ITEMS: &[(&str, PokemonType)] = &[
    ("charcoal", PokemonType::Fire),
    ("mystic-water", PokemonType::Water),
    ("magnet", PokemonType::Electric),
    ("miracle-seed", PokemonType::Grass),
    ("never-melt-ice", PokemonType::Ice),
    ("black-belt", PokemonType::Fighting),
    ("poison-barb", PokemonType::Poison),
    ("soft-sand", PokemonType::Ground),
    ("sharp-beak", PokemonType::Flying),
    ("twisted-spoon", PokemonType::Psychic),
    ("silver-powder", PokemonType::Bug),
    ("hard-stone", PokemonType::Rock),
    ("spell-tag", PokemonType::Ghost),
    ("dragon-fang", PokemonType::Dragon),
    ("black-glasses", PokemonType::Dark),
    ("metal-coat", PokemonType::Steel),
    ("fairy-feather", PokemonType::Fairy),
    ("silk-scarf", PokemonType::Normal),
];

/// Attacking-stat multiplier from the attacker's item (Choice Band on
/// physical, Choice Specs on special). Applied to the stat, not damage.
pub fn attacker_stat_item_modifier(item: &str, category: MoveCategory) -> Option<Modifier> {
    match (normalize_name(item).as_str(), category) {
        ("choice-band", MoveCategory::Physical) => Some(Modifier::ONE_POINT_FIVE),
        ("choice-specs", MoveCategory::Special) => Some(Modifier::ONE_POINT_FIVE),
        _ => None,
    }
}

/// Defending-stat multiplier from the defender's item: Eviolite (NFE
/// holders, both defenses) and Assault Vest (Special Defense only).
pub fn defender_stat_item_modifier(
    item: &str,
    defender_species: &str,
    category: MoveCategory,
) -> Option<Modifier> {
    match (normalize_name(item).as_str(), category) {
        ("eviolite", _) if NFE_POKEMON.contains(&normalize_name(defender_species).as_str()) => {
            Some(Modifier::ONE_POINT_FIVE)
        }
        ("assault-vest", MoveCategory::Special) => Some(Modifier::ONE_POINT_FIVE),
        _ => None,
    }
}

/// Mask boost for Ogerpon: the Hearthflame, Wellspring and Cornerstone
/// masks boost ALL of the matching form's moves by 1.2x. The Teal Mask
/// provides no boost, and masks do nothing off-form.
pub fn ogerpon_mask_modifier(item: &str, holder_species: &str) -> Modifier {
    let item = normalize_name(item);
    let holder = normalize_name(holder_species);
    if base_species(&holder) != "ogerpon" {
        return Modifier::ONE;
    }
    let form = match item.as_str() {
        "hearthflame-mask" => "hearthflame",
        "wellspring-mask" => "wellspring",
        "cornerstone-mask" => "cornerstone",
        _ => return Modifier::ONE,
    };
    if holder.contains(form) {
        Modifier::ONE_POINT_TWO
    } else {
        Modifier::ONE
    }
}

/// Each Ogerpon form Terastallizes into a fixed type.
pub fn ogerpon_fixed_tera_type(species: &str) -> Option<PokemonType> {
    let normalized = normalize_name(species);
    if base_species(&normalized) != "ogerpon" {
        return None;
    }
    if normalized.contains("wellspring") {
        Some(PokemonType::Water)
    } else if normalized.contains("hearthflame") {
        Some(PokemonType::Fire)
    } else if normalized.contains("cornerstone") {
        Some(PokemonType::Rock)
    } else {
        Some(PokemonType::Grass)
    }
}

/// The signature mask of an Ogerpon form.
pub fn ogerpon_signature_item(species: &str) -> Option<&'static str> {
    let normalized = normalize_name(species);
    if base_species(&normalized) != "ogerpon" {
        return None;
    }
    if normalized.contains("wellspring") {
        Some("wellspring-mask")
    } else if normalized.contains("hearthflame") {
        Some("hearthflame-mask")
    } else if normalized.contains("cornerstone") {
        Some("cornerstone-mask")
    } else {
        Some("teal-mask")
    }
}

/// Damage-stage item multiplier for the attacker's item, applied per
/// roll. Covers Life Orb, Muscle Band, Wise Glasses, type items, Expert
/// Belt (super-effective hits only), the Ogerpon masks and Metronome.
pub fn attacker_damage_item_modifier(
    item: &str,
    attacker_species: &str,
    move_type: PokemonType,
    category: MoveCategory,
    is_super_effective: bool,
    metronome_uses: u8,
) -> Modifier {
    let normalized = normalize_name(item);
    match normalized.as_str() {
        // Life Orb is 5324/4096 in Gen 5+, not 5325.
        "life-orb" => Modifier(5324),
        "muscle-band" if category == MoveCategory::Physical => Modifier::ONE_POINT_ONE,
        "wise-glasses" if category == MoveCategory::Special => Modifier::ONE_POINT_ONE,
        "expert-belt" if is_super_effective => Modifier::ONE_POINT_TWO,
        "metronome" => {
            let uses = metronome_uses.max(1) as u32;
            Modifier((4096 + 819 * (uses - 1)).min(8192))
        }
        _ => {
            if TYPE_ITEMS
                .iter()
                .any(|(name, t)| *name == normalized && *t == move_type)
            {
                return Modifier::ONE_POINT_TWO;
            }
            ogerpon_mask_modifier(&normalized, attacker_species)
        }
    }
}

/// Result of an item effect analysis (Booster Energy, Eviolite, etc.).
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEffect {
    pub item: String,
    pub applies: bool,
    pub stat_modifiers: Vec<(Stat, f64)>,
    pub description: String,
}

/// Booster Energy boosts a Paradox holder's highest non-HP stat by 30%
/// (50% for Speed). Nature is taken into account when ranking stats.
pub fn booster_energy_boost(species: &str, base_stats: &BaseStats, nature: crate::types::Nature) -> ItemEffect {
    let normalized = normalize_name(species);
    if !PARADOX_POKEMON.contains(&normalized.as_str()) {
        return ItemEffect {
            item: "Booster Energy".into(),
            applies: false,
            stat_modifiers: vec![],
            description: format!("{} is not a Paradox Pokemon", species),
        };
    }

    let mut best = (Stat::Attack, 0u32);
    for stat in Stat::nature_stats() {
        let value = (base_stats.get(stat) as f64 * nature.multiplier(stat)) as u32;
        if value > best.1 {
            best = (stat, value);
        }
    }
    let (stat, _) = best;
    let boost = if stat == Stat::Speed { 1.5 } else { 1.3 };

    ItemEffect {
        item: "Booster Energy".into(),
        applies: true,
        stat_modifiers: vec![(stat, boost)],
        description: format!("Booster Energy: +{}% {}", ((boost - 1.0) * 100.0) as u32, stat.display_name()),
    }
}

/// Berry activation analysis for HP-threshold berries.
#[derive(Debug, Clone, PartialEq)]
pub struct BerryActivation {
    pub berry: String,
    pub threshold_pct: u8,
    pub would_activate: bool,
    pub heal: u16,
    pub hp_after: u16,
}

/// Check whether an HP-threshold berry would fire at the given HP.
/// Sitrus heals 1/4 below 50%; the pinch berries heal 1/3 below 25%.
pub fn berry_activation(berry: &str, current_hp: u16, max_hp: u16) -> Option<BerryActivation> {
    let normalized = normalize_name(berry);
    let hp_pct = current_hp as u32 * 100 / max_hp.max(1) as u32;

    let (threshold, heal) = if normalized.starts_with("sitrus") {
        (50u8, max_hp / 4)
    } else if ["figy", "wiki", "mago", "aguav", "iapapa"]
        .iter()
        .any(|b| normalized.starts_with(b))
    {
        (25u8, max_hp / 3)
    } else {
        return None;
    };

    let would_activate = hp_pct <= threshold as u32;
    Some(BerryActivation {
        berry: normalized,
        threshold_pct: threshold,
        would_activate,
        heal,
        hp_after: if would_activate {
            (current_hp + heal).min(max_hp)
        } else {
            current_hp
        },
    })
}

/// Focus Sash analysis: survives a would-be KO from full HP with 1 HP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SashOutcome {
    pub sash_activates: bool,
    pub hp_after: u16,
}

pub fn focus_sash_survival(damage: u16, current_hp: u16, max_hp: u16) -> SashOutcome {
    let at_full = current_hp == max_hp;
    let would_ko = damage >= current_hp;
    if at_full && would_ko {
        SashOutcome { sash_activates: true, hp_after: 1 }
    } else {
        SashOutcome {
            sash_activates: false,
            hp_after: current_hp.saturating_sub(damage),
        }
    }
}
