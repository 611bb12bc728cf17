//! # Input/Output Module
//!
//! The Showdown paste codec and the CLI surface. The canonical paste
//! form is
//!
//! ```text
//! <Nickname> (<Species>) @ <Item>
//! Ability: <Ability>
//! Level: 50
//! Tera Type: <Type>
//! EVs: <n> HP / <n> Atk / ...
//! IVs: <n> HP / ...           (optional, defaults 31)
//! <Nature> Nature
//! - <Move> (up to four)
//! ```
//!
//! Teams are blocks separated by a blank line. Export round-trips
//! through import for builds constructed from round-trippable fields.

use crate::pokemon::{EvSpread, IvSpread, PokemonBuild};
use crate::types::{EngineError, EngineResult, Nature, PokemonType, Stat};
use crate::utils::normalize_name;
use clap::{Parser, Subcommand};

/// A Pokemon block parsed out of a Showdown paste. Species and move
/// names are carried verbatim; the caller resolves them against the
/// data provider to construct a `PokemonBuild`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSet {
    pub species: String,
    pub nickname: Option<String>,
    pub item: Option<String>,
    pub ability: Option<String>,
    pub level: u8,
    pub tera_type: Option<PokemonType>,
    pub nature: Nature,
    pub evs: EvSpread,
    pub ivs: IvSpread,
    pub moves: Vec<String>,
}

fn parse_stat_line(line: &str, field: &str) -> EngineResult<Vec<(Stat, u16)>> {
    let mut pairs = Vec::new();
    for part in line.split('/') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let mut tokens = part.split_whitespace();
        let value: u16 = tokens
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| EngineError::ParseError(format!("bad {} entry: {:?}", field, part)))?;
        let stat_name = tokens.collect::<Vec<_>>().join(" ");
        let stat = Stat::from_normalized_str(&stat_name)
            .ok_or_else(|| EngineError::ParseError(format!("unknown stat in {}: {:?}", field, stat_name)))?;
        pairs.push((stat, value));
    }
    Ok(pairs)
}

/// Parse one Pokemon block.
pub fn parse_set(paste: &str) -> EngineResult<ParsedSet> {
    let mut lines = paste.lines().map(str::trim).filter(|l| !l.is_empty());
    let header = lines
        .next()
        .ok_or_else(|| EngineError::ParseError("empty paste".into()))?;

    let mut set = ParsedSet { level: 50, ..Default::default() };

    // Header: "Name (Species) (M) @ Item" with every piece optional
    // except the name.
    let (name_part, item_part) = match header.split_once('@') {
        Some((name, item)) => (name.trim(), Some(item.trim())),
        None => (header, None),
    };
    set.item = item_part.filter(|i| !i.is_empty()).map(String::from);

    let name_part = name_part
        .trim_end_matches("(M)")
        .trim_end_matches("(F)")
        .trim();
    if let Some(open) = name_part.rfind('(') {
        let close = name_part[open..]
            .find(')')
            .map(|c| open + c)
            .ok_or_else(|| EngineError::ParseError(format!("unbalanced parentheses: {:?}", header)))?;
        set.nickname = Some(name_part[..open].trim().to_string()).filter(|n| !n.is_empty());
        set.species = name_part[open + 1..close].trim().to_string();
    } else {
        set.species = name_part.to_string();
    }
    if set.species.is_empty() {
        return Err(EngineError::ParseError(format!("no species in header: {:?}", header)));
    }

    for line in lines {
        if let Some(rest) = line.strip_prefix("Ability:") {
            set.ability = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("Level:") {
            set.level = rest
                .trim()
                .parse()
                .map_err(|_| EngineError::ParseError(format!("bad level: {:?}", rest)))?;
        } else if let Some(rest) = line.strip_prefix("Tera Type:") {
            set.tera_type = Some(
                PokemonType::from_normalized_str(rest.trim())
                    .ok_or_else(|| EngineError::ParseError(format!("unknown Tera type: {:?}", rest)))?,
            );
        } else if let Some(rest) = line.strip_prefix("EVs:") {
            for (stat, value) in parse_stat_line(rest, "EVs")? {
                set.evs.set(stat, value);
            }
        } else if let Some(rest) = line.strip_prefix("IVs:") {
            for (stat, value) in parse_stat_line(rest, "IVs")? {
                let value = value.min(31) as u8;
                match stat {
                    Stat::Hp => set.ivs.hp = value,
                    Stat::Attack => set.ivs.attack = value,
                    Stat::Defense => set.ivs.defense = value,
                    Stat::SpecialAttack => set.ivs.special_attack = value,
                    Stat::SpecialDefense => set.ivs.special_defense = value,
                    Stat::Speed => set.ivs.speed = value,
                }
            }
        } else if let Some(rest) = line.strip_suffix("Nature") {
            set.nature = Nature::from_normalized_str(rest.trim())
                .ok_or_else(|| EngineError::ParseError(format!("unknown nature: {:?}", rest)))?;
        } else if let Some(rest) = line.strip_prefix('-') {
            if set.moves.len() < 4 {
                set.moves.push(rest.trim().to_string());
            }
        }
        // Unrecognized lines (Shiny, Happiness, ...) are skipped.
    }

    Ok(set)
}

/// Parse a whole team: blocks separated by blank lines.
pub fn parse_team(paste: &str) -> EngineResult<Vec<ParsedSet>> {
    let mut sets = Vec::new();
    for block in paste.split("\n\n").map(str::trim).filter(|b| !b.is_empty()) {
        sets.push(parse_set(block)?);
        if sets.len() == 6 {
            break;
        }
    }
    if sets.is_empty() {
        return Err(EngineError::ParseError("no Pokemon found in paste".into()));
    }
    Ok(sets)
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// "urshifu-rapid-strike" -> "Urshifu-Rapid-Strike" (species keep
/// their hyphens).
fn title_case_name(name: &str) -> String {
    name.split('-').map(title_case_word).collect::<Vec<_>>().join("-")
}

/// "choice-scarf" -> "Choice Scarf" (items, abilities and moves are
/// written with spaces, the way Showdown prints them).
fn spaced_title_case(name: &str) -> String {
    name.split('-').map(title_case_word).collect::<Vec<_>>().join(" ")
}

fn format_stat_line(values: [(Stat, u16); 6], default: u16) -> Option<String> {
    let shown: Vec<String> = values
        .iter()
        .filter(|(_, v)| *v != default)
        .map(|(stat, v)| format!("{} {}", v, stat.abbreviation()))
        .collect();
    if shown.is_empty() {
        None
    } else {
        Some(shown.join(" / "))
    }
}

/// Export one build to Showdown paste form.
pub fn export_set(build: &PokemonBuild) -> String {
    let mut out = String::new();

    out.push_str(&title_case_name(&build.name));
    if let Some(item) = &build.item {
        out.push_str(&format!(" @ {}", spaced_title_case(&normalize_name(item))));
    }
    out.push('\n');

    if let Some(ability) = &build.ability {
        out.push_str(&format!("Ability: {}\n", spaced_title_case(&normalize_name(ability))));
    }
    out.push_str(&format!("Level: {}\n", build.level));
    if let Some(tera) = build.tera_type {
        out.push_str(&format!("Tera Type: {}\n", tera.display_name()));
    }

    let evs = [
        (Stat::Hp, build.evs.hp),
        (Stat::Attack, build.evs.attack),
        (Stat::Defense, build.evs.defense),
        (Stat::SpecialAttack, build.evs.special_attack),
        (Stat::SpecialDefense, build.evs.special_defense),
        (Stat::Speed, build.evs.speed),
    ];
    if let Some(line) = format_stat_line(evs, 0) {
        out.push_str(&format!("EVs: {}\n", line));
    }

    let ivs = [
        (Stat::Hp, build.ivs.hp as u16),
        (Stat::Attack, build.ivs.attack as u16),
        (Stat::Defense, build.ivs.defense as u16),
        (Stat::SpecialAttack, build.ivs.special_attack as u16),
        (Stat::SpecialDefense, build.ivs.special_defense as u16),
        (Stat::Speed, build.ivs.speed as u16),
    ];
    if let Some(line) = format_stat_line(ivs, 31) {
        out.push_str(&format!("IVs: {}\n", line));
    }

    out.push_str(&format!("{} Nature\n", build.nature));
    for m in &build.moves {
        out.push_str(&format!("- {}\n", spaced_title_case(&normalize_name(m))));
    }

    out
}

/// Export a team: blocks separated by one blank line.
pub fn export_team(builds: &[PokemonBuild]) -> String {
    builds.iter().map(export_set).collect::<Vec<_>>().join("\n")
}

/// vgc-engine CLI
#[derive(Parser)]
#[command(name = "vgc-engine")]
#[command(about = "Gen 9 VGC damage, speed and matchup calculation engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a Showdown paste file and audit its EV spreads
    Audit {
        /// Path to the paste file
        paste: String,
    },

    /// Validate a team paste against a regulation
    Validate {
        /// Path to the team paste file
        paste: String,

        /// Regulation code (e.g. "reg_f")
        #[arg(short, long)]
        regulation: Option<String>,

        /// Path to a regulations.json catalog
        #[arg(short, long)]
        catalog: Option<String>,
    },

    /// Show engine information
    Info,
}

/// Print engine information.
pub fn print_engine_info() {
    println!("vgc-engine");
    println!("==========");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Gen 9 VGC damage, speed and matchup calculation engine");
    println!();
    println!("Components:");
    println!("  - 16-roll damage distributions with the full Gen 9 modifier pipeline");
    println!("  - Stat, speed and priority calculations");
    println!("  - EV spread optimization against speed and survival benchmarks");
    println!("  - Team matchup matrices and priority-aware game plans");
    println!("  - Regulation legality checks");
}
