//! # Team Version Diff
//!
//! Compare two snapshots of a team and explain what changed: members
//! added or removed, and per-Pokemon field changes (nature, EVs, IVs,
//! item, ability, Tera type, moves, level) with pattern-based
//! human-readable reasons. Pure function over two value snapshots;
//! nothing here stores state.

use crate::pokemon::PokemonBuild;
use crate::types::Stat;
use crate::utils::normalize_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a Pokemon differs between versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// In version 2 but not version 1.
    Added,
    /// In version 1 but not version 2.
    Removed,
    /// In both, with differences.
    Modified,
}

/// Which field changed on a Pokemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffField {
    Evs,
    Ivs,
    Nature,
    Item,
    Ability,
    TeraType,
    Moves,
    Level,
}

impl DiffField {
    /// Snake-case key used in summaries, matching the serialized form.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Evs => "evs",
            Self::Ivs => "ivs",
            Self::Nature => "nature",
            Self::Item => "item",
            Self::Ability => "ability",
            Self::TeraType => "tera_type",
            Self::Moves => "moves",
            Self::Level => "level",
        }
    }
}

/// A single stat delta inside an EV or IV change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta {
    pub stat: Stat,
    pub before: u16,
    pub after: u16,
}

impl StatDelta {
    pub fn delta(&self) -> i32 {
        self.after as i32 - self.before as i32
    }
}

/// Moveset additions and removals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveChanges {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

/// One field change with its before/after display strings and a
/// pattern-based explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: DiffField,
    pub before: String,
    pub after: String,
    pub reason: String,
    /// Per-stat breakdown for EV/IV changes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stat_deltas: Vec<StatDelta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_changes: Option<MoveChanges>,
}

/// Diff result for a single Pokemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonDiff {
    pub species: String,
    pub change_kind: ChangeKind,
    pub changes: Vec<FieldChange>,
}

/// Summary statistics over a team diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub total_field_changes: usize,
    /// Field name -> how many modified Pokemon touched it.
    pub field_changes: BTreeMap<String, usize>,
}

/// Complete diff between two team versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDiff {
    pub version1_name: String,
    pub version2_name: String,
    pub pokemon_diffs: Vec<PokemonDiff>,
    /// Species present in both versions with no changes.
    pub unchanged: Vec<String>,
}

impl TeamDiff {
    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary { unchanged: self.unchanged.len(), ..Default::default() };
        for diff in &self.pokemon_diffs {
            match diff.change_kind {
                ChangeKind::Added => summary.added += 1,
                ChangeKind::Removed => summary.removed += 1,
                ChangeKind::Modified => {
                    summary.modified += 1;
                    summary.total_field_changes += diff.changes.len();
                    for change in &diff.changes {
                        *summary.field_changes.entry(change.field.key().to_string()).or_insert(0) += 1;
                    }
                }
            }
        }
        summary
    }
}

/// Match Pokemon between two team versions by species name. Forms are
/// distinct species ("ogerpon-wellspring" never matches
/// "ogerpon-hearthflame"); duplicate names pair off first-to-first.
pub fn match_pokemon_by_species<'a>(
    team1: &'a [PokemonBuild],
    team2: &'a [PokemonBuild],
) -> (
    Vec<(&'a PokemonBuild, &'a PokemonBuild)>,
    Vec<&'a PokemonBuild>,
    Vec<&'a PokemonBuild>,
) {
    let mut by_name_1: BTreeMap<String, Vec<&PokemonBuild>> = BTreeMap::new();
    for member in team1 {
        by_name_1.entry(normalize_name(&member.name)).or_default().push(member);
    }
    let mut by_name_2: BTreeMap<String, Vec<&PokemonBuild>> = BTreeMap::new();
    for member in team2 {
        by_name_2.entry(normalize_name(&member.name)).or_default().push(member);
    }

    let mut matched = Vec::new();
    let mut removed = Vec::new();
    let mut added = Vec::new();

    for (name, v1_list) in &by_name_1 {
        match by_name_2.get(name) {
            Some(v2_list) => {
                for (i, v1_member) in v1_list.iter().enumerate() {
                    match v2_list.get(i) {
                        Some(v2_member) => matched.push((*v1_member, *v2_member)),
                        None => removed.push(*v1_member),
                    }
                }
                for v2_member in v2_list.iter().skip(v1_list.len()) {
                    added.push(*v2_member);
                }
            }
            None => removed.extend(v1_list.iter().copied()),
        }
    }
    for (name, v2_list) in &by_name_2 {
        if !by_name_1.contains_key(name) {
            added.extend(v2_list.iter().copied());
        }
    }

    (matched, removed, added)
}

fn format_ev_line(build: &PokemonBuild) -> String {
    let parts: Vec<String> = Stat::all()
        .iter()
        .filter(|&&stat| build.evs.get(stat) > 0)
        .map(|&stat| format!("{} {}", build.evs.get(stat), stat.abbreviation()))
        .collect();
    if parts.is_empty() {
        "0 EVs".into()
    } else {
        parts.join(" / ")
    }
}

fn format_iv_line(build: &PokemonBuild) -> String {
    let parts: Vec<String> = Stat::all()
        .iter()
        .filter(|&&stat| build.ivs.get(stat) != 31)
        .map(|&stat| format!("{} {}", build.ivs.get(stat), stat.abbreviation()))
        .collect();
    if parts.is_empty() {
        "31 all".into()
    } else {
        parts.join(" / ")
    }
}

fn is_bulk_stat(stat: Stat) -> bool {
    matches!(stat, Stat::Hp | Stat::Defense | Stat::SpecialDefense)
}

fn is_offense_stat(stat: Stat) -> bool {
    matches!(stat, Stat::Attack | Stat::SpecialAttack)
}

/// Explain an EV reallocation from its per-stat deltas.
fn explain_ev_change(deltas: &[StatDelta]) -> String {
    let gains: Vec<&StatDelta> = deltas.iter().filter(|d| d.delta() > 0).collect();
    let losses: Vec<&StatDelta> = deltas.iter().filter(|d| d.delta() < 0).collect();

    if gains.is_empty() && losses.is_empty() {
        return "Minor EV adjustment".into();
    }

    // Simple 1:1 swap.
    if gains.len() == 1 && losses.len() == 1 {
        let gain = gains[0];
        let loss = losses[0];
        let amount = loss.delta().unsigned_abs();
        let moved = format!(
            "Moved {} EVs from {} to {}",
            amount,
            loss.stat.abbreviation(),
            gain.stat.abbreviation(),
        );
        return if loss.stat == Stat::Speed && is_bulk_stat(gain.stat) {
            format!("{} (bulk over speed)", moved)
        } else if is_offense_stat(loss.stat) && is_bulk_stat(gain.stat) {
            format!("{} (bulk over offense)", moved)
        } else if gain.stat == Stat::Speed {
            format!("{} (more speed)", moved)
        } else {
            moved
        };
    }

    let gain_names: Vec<&str> = gains.iter().map(|d| d.stat.abbreviation()).collect();
    let loss_names: Vec<&str> = losses.iter().map(|d| d.stat.abbreviation()).collect();
    let gained_bulk = gains.iter().any(|d| is_bulk_stat(d.stat));
    let lost_offense = losses.iter().any(|d| is_offense_stat(d.stat));
    let lost_speed = losses.iter().any(|d| d.stat == Stat::Speed);

    if gained_bulk && lost_offense {
        format!("Reallocated EVs for more bulk (-{})", loss_names.join("/"))
    } else if gained_bulk && lost_speed {
        format!("Traded speed for bulk (+{})", gain_names.join("/"))
    } else if gains.iter().any(|d| d.stat == Stat::Speed) {
        format!("Invested more in Speed (-{})", loss_names.join("/"))
    } else {
        format!(
            "Reallocated EVs: +{}, -{}",
            gain_names.join("/"),
            loss_names.join("/"),
        )
    }
}

/// Explain a nature change from the stat pairs the two natures touch.
fn explain_nature_change(before: crate::types::Nature, after: crate::types::Nature) -> String {
    let (before_up, before_down) = before.effect();
    let (after_up, after_down) = after.effect();
    let before_neutral = before.is_neutral();
    let after_neutral = after.is_neutral();

    if before_neutral && after_neutral {
        return "Neutral nature swap".into();
    }
    if before_neutral {
        return format!("Now boosts {}", after_up.abbreviation());
    }
    if after_neutral {
        return "Switched to neutral nature".into();
    }
    if before_up == after_up {
        return format!(
            "Same +{}, now -{} instead of -{}",
            before_up.abbreviation(),
            after_down.abbreviation(),
            before_down.abbreviation(),
        );
    }
    if after_up == Stat::Speed && is_offense_stat(before_up) {
        return format!(
            "+{}, -{} (prioritizes speed)",
            after_up.abbreviation(),
            after_down.abbreviation(),
        );
    }
    if before_up == Stat::Speed && is_offense_stat(after_up) {
        return format!(
            "+{}, -{} (trades speed for power)",
            after_up.abbreviation(),
            after_down.abbreviation(),
        );
    }
    format!("+{} instead of +{}", after_up.abbreviation(), before_up.abbreviation())
}

/// Item categories for contextual item-change explanations.
const OFFENSIVE_ITEMS: &[&str] = &[
    "choice-band", "choice-specs", "life-orb", "expert-belt",
    "muscle-band", "wise-glasses", "charcoal", "mystic-water",
    "miracle-seed", "never-melt-ice", "black-glasses", "dragon-fang",
    "punching-glove", "loaded-dice",
];
const DEFENSIVE_ITEMS: &[&str] = &[
    "assault-vest", "leftovers", "sitrus-berry", "rocky-helmet",
    "safety-goggles", "covert-cloak", "clear-amulet", "shed-shell",
    "eviolite", "weakness-policy", "aguav-berry", "figy-berry",
    "iapapa-berry", "mago-berry", "wiki-berry",
];
const SPEED_ITEMS: &[&str] = &["choice-scarf", "booster-energy", "quick-claw"];
const FOCUS_ITEMS: &[&str] = &["focus-sash"];

fn item_category(item: Option<&str>) -> &'static str {
    let Some(item) = item else { return "none" };
    let normalized = normalize_name(item);
    if OFFENSIVE_ITEMS.contains(&normalized.as_str()) {
        "offensive"
    } else if DEFENSIVE_ITEMS.contains(&normalized.as_str()) {
        "defensive"
    } else if SPEED_ITEMS.contains(&normalized.as_str()) {
        "speed"
    } else if FOCUS_ITEMS.contains(&normalized.as_str()) {
        "focus"
    } else {
        "other"
    }
}

/// Explain an item change from the categories involved.
fn explain_item_change(before: Option<&str>, after: Option<&str>) -> String {
    let before_cat = item_category(before);
    let after_cat = item_category(after);

    if before_cat == after_cat && before_cat != "none" && before_cat != "other" {
        return format!("Item swap within {} category", before_cat);
    }

    match (before_cat, after_cat) {
        ("speed", "defensive") => "Trades speed control for bulk".into(),
        ("speed", "offensive") => "Trades speed control for raw power".into(),
        ("offensive", "defensive") => "Trades damage output for survivability".into(),
        ("offensive", "speed") => "Trades raw power for speed control".into(),
        ("defensive", "offensive") => "Trades bulk for damage output".into(),
        ("defensive", "speed") => "Trades bulk for speed control".into(),
        ("focus", "offensive") => "Trades OHKO protection for damage".into(),
        ("focus", "defensive") => "Trades OHKO protection for sustained bulk".into(),
        ("focus", "speed") => "Trades OHKO protection for speed".into(),
        ("offensive", "focus") | ("defensive", "focus") => "Trades for OHKO protection".into(),
        ("none", _) => match after {
            Some(item) => format!("Added {}", item),
            None => "Item changed".into(),
        },
        _ => match (before, after) {
            (Some(b), Some(a)) => format!("Changed from {} to {}", b, a),
            (None, Some(a)) => format!("Added {}", a),
            (Some(b), None) => format!("Removed {}", b),
            (None, None) => "Item changed".into(),
        },
    }
}

/// Explain moveset additions and removals.
fn explain_move_change(added: &[String], removed: &[String]) -> String {
    if added.len() == 1 && removed.len() == 1 {
        return format!("Replaced {} with {}", removed[0], added[0]);
    }
    if !added.is_empty() && removed.is_empty() {
        return if added.len() == 1 {
            format!("Added {}", added[0])
        } else {
            format!("Added: {}", added.join(", "))
        };
    }
    if !removed.is_empty() && added.is_empty() {
        return if removed.len() == 1 {
            format!("Removed {}", removed[0])
        } else {
            format!("Removed: {}", removed.join(", "))
        };
    }
    let mut parts = Vec::new();
    if !added.is_empty() {
        parts.push(format!("+{}", added.join(", ")));
    }
    if !removed.is_empty() {
        parts.push(format!("-{}", removed.join(", ")));
    }
    parts.join("; ")
}

fn option_label(value: Option<&str>) -> String {
    value.map(String::from).unwrap_or_else(|| "None".into())
}

/// Compare two versions of the same Pokemon. Checks nature, EVs, IVs,
/// item, ability, Tera type, moves and level.
pub fn compare_pokemon(v1: &PokemonBuild, v2: &PokemonBuild) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if v1.nature != v2.nature {
        changes.push(FieldChange {
            field: DiffField::Nature,
            before: v1.nature.to_string(),
            after: v2.nature.to_string(),
            reason: explain_nature_change(v1.nature, v2.nature),
            stat_deltas: Vec::new(),
            move_changes: None,
        });
    }

    let ev_deltas: Vec<StatDelta> = Stat::all()
        .iter()
        .filter(|&&stat| v1.evs.get(stat) != v2.evs.get(stat))
        .map(|&stat| StatDelta { stat, before: v1.evs.get(stat), after: v2.evs.get(stat) })
        .collect();
    if !ev_deltas.is_empty() {
        changes.push(FieldChange {
            field: DiffField::Evs,
            before: format_ev_line(v1),
            after: format_ev_line(v2),
            reason: explain_ev_change(&ev_deltas),
            stat_deltas: ev_deltas,
            move_changes: None,
        });
    }

    let iv_deltas: Vec<StatDelta> = Stat::all()
        .iter()
        .filter(|&&stat| v1.ivs.get(stat) != v2.ivs.get(stat))
        .map(|&stat| StatDelta {
            stat,
            before: v1.ivs.get(stat) as u16,
            after: v2.ivs.get(stat) as u16,
        })
        .collect();
    if !iv_deltas.is_empty() {
        changes.push(FieldChange {
            field: DiffField::Ivs,
            before: format_iv_line(v1),
            after: format_iv_line(v2),
            reason: "IV spread changed".into(),
            stat_deltas: iv_deltas,
            move_changes: None,
        });
    }

    let item1 = v1.item.as_deref().map(normalize_name);
    let item2 = v2.item.as_deref().map(normalize_name);
    if item1 != item2 {
        changes.push(FieldChange {
            field: DiffField::Item,
            before: option_label(v1.item.as_deref()),
            after: option_label(v2.item.as_deref()),
            reason: explain_item_change(v1.item.as_deref(), v2.item.as_deref()),
            stat_deltas: Vec::new(),
            move_changes: None,
        });
    }

    let ability1 = v1.ability.as_deref().map(normalize_name);
    let ability2 = v2.ability.as_deref().map(normalize_name);
    if ability1 != ability2 {
        let reason = match (v1.ability.as_deref(), v2.ability.as_deref()) {
            (Some(b), Some(a)) => format!("Changed from {} to {}", b, a),
            (None, Some(a)) => format!("Set ability to {}", a),
            (Some(b), None) => format!("Removed {}", b),
            (None, None) => unreachable!("unequal options cannot both be None"),
        };
        changes.push(FieldChange {
            field: DiffField::Ability,
            before: option_label(v1.ability.as_deref()),
            after: option_label(v2.ability.as_deref()),
            reason,
            stat_deltas: Vec::new(),
            move_changes: None,
        });
    }

    if v1.tera_type != v2.tera_type {
        let reason = match (v1.tera_type, v2.tera_type) {
            (Some(b), Some(a)) => format!("Changed Tera from {} to {}", b, a),
            (None, Some(a)) => format!("Set Tera type to {}", a),
            (Some(_), None) => "Removed Tera type".into(),
            (None, None) => unreachable!("unequal options cannot both be None"),
        };
        changes.push(FieldChange {
            field: DiffField::TeraType,
            before: v1.tera_type.map(|t| t.display_name().to_string()).unwrap_or_else(|| "None".into()),
            after: v2.tera_type.map(|t| t.display_name().to_string()).unwrap_or_else(|| "None".into()),
            reason,
            stat_deltas: Vec::new(),
            move_changes: None,
        });
    }

    let moves1: Vec<String> = v1.moves.iter().map(|m| normalize_name(m)).collect();
    let moves2: Vec<String> = v2.moves.iter().map(|m| normalize_name(m)).collect();
    let added: Vec<String> = moves2.iter().filter(|m| !moves1.contains(m)).cloned().collect();
    let removed: Vec<String> = moves1.iter().filter(|m| !moves2.contains(m)).cloned().collect();
    if !added.is_empty() || !removed.is_empty() {
        changes.push(FieldChange {
            field: DiffField::Moves,
            before: if moves1.is_empty() { "No moves".into() } else { moves1.join(", ") },
            after: if moves2.is_empty() { "No moves".into() } else { moves2.join(", ") },
            reason: explain_move_change(&added, &removed),
            stat_deltas: Vec::new(),
            move_changes: Some(MoveChanges { added, removed }),
        });
    }

    if v1.level != v2.level {
        changes.push(FieldChange {
            field: DiffField::Level,
            before: v1.level.to_string(),
            after: v2.level.to_string(),
            reason: format!("Level {} to {}", v1.level, v2.level),
            stat_deltas: Vec::new(),
            move_changes: None,
        });
    }

    changes
}

/// Generate the complete diff between two team versions. The main entry
/// point for team comparison.
pub fn generate_team_diff(
    team1: &[PokemonBuild],
    team2: &[PokemonBuild],
    v1_name: &str,
    v2_name: &str,
) -> TeamDiff {
    let (matched, removed, added) = match_pokemon_by_species(team1, team2);

    let mut pokemon_diffs = Vec::new();
    let mut unchanged = Vec::new();

    for member in removed {
        pokemon_diffs.push(PokemonDiff {
            species: member.name.clone(),
            change_kind: ChangeKind::Removed,
            changes: Vec::new(),
        });
    }
    for member in added {
        pokemon_diffs.push(PokemonDiff {
            species: member.name.clone(),
            change_kind: ChangeKind::Added,
            changes: Vec::new(),
        });
    }
    for (v1_member, v2_member) in matched {
        let changes = compare_pokemon(v1_member, v2_member);
        if changes.is_empty() {
            unchanged.push(v1_member.name.clone());
        } else {
            pokemon_diffs.push(PokemonDiff {
                species: v1_member.name.clone(),
                change_kind: ChangeKind::Modified,
                changes,
            });
        }
    }

    TeamDiff {
        version1_name: v1_name.to_string(),
        version2_name: v2_name.to_string(),
        pokemon_diffs,
        unchanged,
    }
}
