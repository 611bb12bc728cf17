//! # vgc-engine CLI
//!
//! Command-line interface for paste audits and regulation checks.

use clap::Parser;
use colored::Colorize;
use vgc_engine::config::{normalize_evs, MAX_TOTAL_EVS};
use vgc_engine::io::{parse_team, print_engine_info, Cli, Commands};
use vgc_engine::pokemon::{BaseStats, PokemonBuild, Team};
use vgc_engine::rules::{validate_team, RegulationCatalog};
use vgc_engine::types::{EngineResult, PokemonType, Stat};
use vgc_engine::utils::normalize_name;

fn main() -> EngineResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit { paste } => audit_paste(&paste),
        Commands::Validate { paste, regulation, catalog } => {
            validate_paste(&paste, regulation.as_deref(), catalog.as_deref())
        }
        Commands::Info => {
            print_engine_info();
            Ok(())
        }
    }
}

fn read_paste(path: &str) -> EngineResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| vgc_engine::types::EngineError::ParseError(format!("{}: {}", path, e)))
}

/// Paste-level EV audit: totals, leftover budget and wasted EVs.
fn audit_paste(path: &str) -> EngineResult<()> {
    let sets = parse_team(&read_paste(path)?)?;

    for set in &sets {
        let total = set.evs.total();
        println!("{} ({} Nature, level {})", set.species.bold(), set.nature, set.level);

        let line = format!(
            "  EVs: {} HP / {} Atk / {} Def / {} SpA / {} SpD / {} Spe ({} total)",
            set.evs.hp, set.evs.attack, set.evs.defense,
            set.evs.special_attack, set.evs.special_defense, set.evs.speed, total,
        );
        if total > MAX_TOTAL_EVS {
            println!("{}", line.red());
            println!("  {}", format!("total exceeds {}", MAX_TOTAL_EVS).red());
        } else {
            println!("{}", line);
            if total < MAX_TOTAL_EVS {
                println!("  {} EVs unspent", MAX_TOTAL_EVS - total);
            }
        }

        for stat in Stat::all() {
            let value = set.evs.get(stat);
            let snapped = normalize_evs(value);
            if value != snapped {
                println!(
                    "  {}",
                    format!(
                        "{}: {} wasted EVs (same stat as {})",
                        stat.display_name(),
                        value - snapped,
                        snapped,
                    )
                    .yellow(),
                );
            }
        }
        println!();
    }

    Ok(())
}

/// Run the regulation evaluator over a team paste. Legality only needs
/// names and items, so unresolved species use placeholder stats.
fn validate_paste(path: &str, regulation: Option<&str>, catalog_path: Option<&str>) -> EngineResult<()> {
    let sets = parse_team(&read_paste(path)?)?;

    let catalog = match catalog_path {
        Some(path) => RegulationCatalog::from_file(path)?,
        None => RegulationCatalog::builtin_default(),
    };
    let regulation = catalog.get(regulation)?;

    let placeholder = BaseStats { hp: 100, attack: 100, defense: 100, special_attack: 100, special_defense: 100, speed: 100 };
    let members: Vec<PokemonBuild> = sets
        .iter()
        .map(|set| {
            let mut build =
                PokemonBuild::new(normalize_name(&set.species), placeholder, vec![PokemonType::Normal]);
            build.item = set.item.clone();
            build
        })
        .collect();
    let team = Team { name: "imported".into(), members };

    let report = validate_team(&team, regulation);
    if report.valid {
        println!("{}", format!("Team is legal for {}", regulation.name).green());
        println!(
            "Restricted Pokemon: {}/{}",
            report.restricted_count, regulation.restricted_limit,
        );
    } else {
        println!("{}", format!("Team has {} violation(s):", report.violations.len()).red());
        for violation in &report.violations {
            println!("  - {}", violation.message());
        }
    }

    Ok(())
}
