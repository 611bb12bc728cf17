//! # Regulation Rules
//!
//! VGC regulation catalog (persisted JSON) and the team legality
//! evaluator: team size, species clause (base-species normalization),
//! restricted count, banned list and item clause.
//!
//! The catalog is loaded once at startup and treated as read-only;
//! callers that hot-swap regulations replace the shared reference
//! atomically (e.g. behind an `Arc`) rather than mutating in place. A
//! session override selects a non-current regulation without touching
//! the catalog itself.

use crate::pokemon::Team;
use crate::types::{EngineError, EngineResult};
use crate::utils::{base_species, normalize_name};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// One VGC regulation's rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Regulation {
    pub name: String,
    pub restricted_limit: usize,
    pub item_clause: bool,
    pub species_clause: bool,
    pub level: u8,
    pub pokemon_limit: usize,
    pub bring_limit: usize,
    /// Lowercase-hyphenated names.
    pub restricted_pokemon: Vec<String>,
    pub banned_pokemon: Vec<String>,
    pub smogon_formats: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Default for Regulation {
    fn default() -> Self {
        Self {
            name: String::new(),
            restricted_limit: 2,
            item_clause: true,
            species_clause: true,
            level: 50,
            pokemon_limit: 6,
            bring_limit: 4,
            restricted_pokemon: Vec::new(),
            banned_pokemon: Vec::new(),
            smogon_formats: Vec::new(),
            start_date: None,
            end_date: None,
        }
    }
}

impl Regulation {
    fn name_matches(list: &[String], pokemon_name: &str) -> bool {
        let normalized = normalize_name(pokemon_name);
        if list.iter().any(|n| *n == normalized) {
            return true;
        }
        // Form fallback: "calyrex-ice" counts when "calyrex" is listed.
        let base = base_species(&normalized);
        list.iter().any(|n| *n == base)
    }

    pub fn is_restricted(&self, pokemon_name: &str) -> bool {
        Self::name_matches(&self.restricted_pokemon, pokemon_name)
    }

    pub fn is_banned(&self, pokemon_name: &str) -> bool {
        Self::name_matches(&self.banned_pokemon, pokemon_name)
    }
}

/// The full regulation catalog as persisted on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegulationCatalog {
    #[serde(default)]
    pub current_regulation: Option<String>,
    #[serde(default)]
    pub regulations: BTreeMap<String, Regulation>,
    #[serde(skip)]
    session_override: Option<String>,
}

/// Normalize a regulation code: "Reg F" / "reg-f" / "f" -> "reg_f".
fn normalize_code(code: &str) -> String {
    let code = code.to_lowercase().replace([' ', '-'], "_");
    if code.starts_with("reg_") {
        code
    } else {
        format!("reg_{}", code)
    }
}

impl RegulationCatalog {
    pub fn from_json(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| EngineError::ParseError(format!("regulation config: {}", e)))
    }

    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| EngineError::ParseError(format!("regulation config: {}", e)))?;
        Self::from_json(&raw)
    }

    /// Minimal built-in fallback when no config file is present.
    pub fn builtin_default() -> Self {
        let mut regulations = BTreeMap::new();
        regulations.insert(
            "reg_f".to_string(),
            Regulation {
                name: "Regulation F".into(),
                smogon_formats: vec!["gen9vgc2026regfbo3".into(), "gen9vgc2026regf".into()],
                ..Default::default()
            },
        );
        Self {
            current_regulation: Some("reg_f".into()),
            regulations,
            session_override: None,
        }
    }

    /// The active regulation code: session override first, then the
    /// explicit `current_regulation`, then the first catalog entry.
    pub fn current_code(&self) -> Option<String> {
        if let Some(code) = &self.session_override {
            return Some(code.clone());
        }
        if let Some(code) = &self.current_regulation {
            return Some(code.clone());
        }
        self.regulations.keys().next().cloned()
    }

    /// Override the active regulation for this session. Fails on an
    /// unknown code.
    pub fn set_session_regulation(&mut self, code: &str) -> EngineResult<()> {
        let normalized = normalize_code(code);
        if !self.regulations.contains_key(&normalized) {
            return Err(EngineError::UnknownRegulation { code: normalized });
        }
        self.session_override = Some(normalized);
        Ok(())
    }

    pub fn clear_session_override(&mut self) {
        self.session_override = None;
    }

    /// Look up a regulation, accepting loose code formats; None falls
    /// back to the current regulation.
    pub fn get(&self, code: Option<&str>) -> EngineResult<&Regulation> {
        let code = match code {
            Some(code) => normalize_code(code),
            None => self
                .current_code()
                .ok_or_else(|| EngineError::UnknownRegulation { code: "<empty catalog>".into() })?,
        };
        self.regulations
            .get(&code)
            .ok_or(EngineError::UnknownRegulation { code })
    }

    pub fn codes(&self) -> Vec<&str> {
        self.regulations.keys().map(String::as_str).collect()
    }
}

/// One rule violation found on a team.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    TeamTooLarge { size: usize, limit: usize },
    BannedPokemon { name: String },
    RestrictedLimitExceeded { count: usize, limit: usize, names: Vec<String> },
    SpeciesClause { base: String },
    ItemClause { item: String, count: usize },
}

impl Violation {
    pub fn message(&self) -> String {
        match self {
            Self::TeamTooLarge { size, limit } => {
                format!("Team has {} Pokemon (max {})", size, limit)
            }
            Self::BannedPokemon { name } => format!("Banned Pokemon on team: {}", name),
            Self::RestrictedLimitExceeded { count, limit, names } => format!(
                "Too many restricted Pokemon: {}/{} ({})",
                count,
                limit,
                names.join(", "),
            ),
            Self::SpeciesClause { base } => {
                format!("Species clause violation: duplicate {}", base)
            }
            Self::ItemClause { item, count } => {
                format!("Item clause violation: {} (x{})", item, count)
            }
        }
    }
}

/// Result of a legality evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct LegalityReport {
    pub valid: bool,
    pub violations: Vec<Violation>,
    pub restricted_count: usize,
    pub restricted_pokemon: Vec<String>,
}

/// Evaluate a team against a regulation. Every violation is reported,
/// not just the first.
pub fn validate_team(team: &Team, regulation: &Regulation) -> LegalityReport {
    let mut violations = Vec::new();

    if team.size() > regulation.pokemon_limit {
        violations.push(Violation::TeamTooLarge {
            size: team.size(),
            limit: regulation.pokemon_limit,
        });
    }

    for member in &team.members {
        if regulation.is_banned(&member.name) {
            violations.push(Violation::BannedPokemon { name: member.name.clone() });
        }
    }

    let restricted_pokemon: Vec<String> = team
        .members
        .iter()
        .filter(|m| regulation.is_restricted(&m.name))
        .map(|m| m.name.clone())
        .collect();
    if restricted_pokemon.len() > regulation.restricted_limit {
        violations.push(Violation::RestrictedLimitExceeded {
            count: restricted_pokemon.len(),
            limit: regulation.restricted_limit,
            names: restricted_pokemon.clone(),
        });
    }

    if regulation.species_clause {
        let mut seen: HashMap<String, usize> = HashMap::new();
        for member in &team.members {
            *seen.entry(base_species(&member.name)).or_insert(0) += 1;
        }
        let mut duplicates: Vec<&String> = seen.iter().filter(|(_, &c)| c > 1).map(|(b, _)| b).collect();
        duplicates.sort();
        for base in duplicates {
            violations.push(Violation::SpeciesClause { base: base.clone() });
        }
    }

    if regulation.item_clause {
        let mut items: HashMap<String, usize> = HashMap::new();
        for member in &team.members {
            if let Some(item) = &member.item {
                *items.entry(normalize_name(item)).or_insert(0) += 1;
            }
        }
        let mut duplicated: Vec<(&String, &usize)> = items.iter().filter(|(_, &c)| c > 1).collect();
        duplicated.sort();
        for (item, &count) in duplicated {
            violations.push(Violation::ItemClause { item: item.clone(), count });
        }
    }

    LegalityReport {
        valid: violations.is_empty(),
        restricted_count: restricted_pokemon.len(),
        restricted_pokemon,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::{BaseStats, PokemonBuild};
    use crate::types::PokemonType;

    fn reg_g() -> Regulation {
        Regulation {
            name: "Regulation G".into(),
            restricted_limit: 1,
            restricted_pokemon: vec!["koraidon".into(), "miraidon".into(), "calyrex".into()],
            banned_pokemon: vec!["mew".into(), "deoxys".into()],
            ..Default::default()
        }
    }

    fn mon(name: &str, item: Option<&str>) -> PokemonBuild {
        let mut build = PokemonBuild::new(
            name,
            BaseStats { hp: 80, attack: 80, defense: 80, special_attack: 80, special_defense: 80, speed: 80 },
            vec![PokemonType::Normal],
        );
        build.item = item.map(String::from);
        build
    }

    fn loose_team(members: Vec<PokemonBuild>) -> Team {
        // Bypass Team::add so rule violations reach the evaluator.
        Team { name: "test".into(), members }
    }

    #[test]
    fn test_catalog_round_trip() {
        let json = r#"{
            "current_regulation": "reg_g",
            "regulations": {
                "reg_g": {
                    "name": "Regulation G",
                    "restricted_limit": 1,
                    "item_clause": true,
                    "species_clause": true,
                    "level": 50,
                    "pokemon_limit": 6,
                    "bring_limit": 4,
                    "restricted_pokemon": ["koraidon"],
                    "banned_pokemon": [],
                    "smogon_formats": ["gen9vgc2025regg"],
                    "start_date": "2025-01-06",
                    "end_date": "2025-04-30"
                }
            }
        }"#;
        let catalog = RegulationCatalog::from_json(json).unwrap();
        assert_eq!(catalog.current_code().as_deref(), Some("reg_g"));
        let reg = catalog.get(None).unwrap();
        assert_eq!(reg.restricted_limit, 1);
        assert!(reg.is_restricted("Koraidon"));
    }

    #[test]
    fn test_session_override() {
        let mut catalog = RegulationCatalog::builtin_default();
        assert!(catalog.set_session_regulation("reg_q").is_err());
        catalog.set_session_regulation("Reg F").unwrap();
        assert_eq!(catalog.current_code().as_deref(), Some("reg_f"));
        catalog.clear_session_override();
        assert_eq!(catalog.current_code().as_deref(), Some("reg_f"));
    }

    #[test]
    fn test_loose_code_formats() {
        let catalog = RegulationCatalog::builtin_default();
        assert!(catalog.get(Some("F")).is_ok());
        assert!(catalog.get(Some("reg-f")).is_ok());
        assert!(catalog.get(Some("REG F")).is_ok());
        assert!(catalog.get(Some("reg_z")).is_err());
    }

    #[test]
    fn test_restricted_base_form_fallback() {
        let reg = reg_g();
        assert!(reg.is_restricted("calyrex-shadow"));
        assert!(reg.is_restricted("calyrex"));
        assert!(!reg.is_restricted("incineroar"));
    }

    #[test]
    fn test_restricted_limit() {
        let team = loose_team(vec![mon("koraidon", None), mon("miraidon", None)]);
        let report = validate_team(&team, &reg_g());
        assert!(!report.valid);
        assert_eq!(report.restricted_count, 2);
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::RestrictedLimitExceeded { limit: 1, .. })));
    }

    #[test]
    fn test_species_clause_on_forms() {
        let team = loose_team(vec![
            mon("urshifu-rapid-strike", None),
            mon("urshifu-single-strike", None),
        ]);
        let report = validate_team(&team, &reg_g());
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::SpeciesClause { base } if base == "urshifu")));
    }

    #[test]
    fn test_item_clause() {
        let team = loose_team(vec![
            mon("incineroar", Some("Leftovers")),
            mon("rillaboom", Some("leftovers")),
            mon("tornadus", Some("Focus Sash")),
        ]);
        let report = validate_team(&team, &reg_g());
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::ItemClause { item, count: 2 } if item == "leftovers")));

        let mut no_clause = reg_g();
        no_clause.item_clause = false;
        let report = validate_team(&team, &no_clause);
        assert!(report.valid);
    }

    #[test]
    fn test_banned_pokemon() {
        let team = loose_team(vec![mon("mew", None)]);
        let report = validate_team(&team, &reg_g());
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::BannedPokemon { name } if name == "mew")));
    }

    #[test]
    fn test_legal_team_passes() {
        let team = loose_team(vec![
            mon("koraidon", Some("Clear Amulet")),
            mon("incineroar", Some("Safety Goggles")),
            mon("rillaboom", Some("Assault Vest")),
        ]);
        let report = validate_team(&team, &reg_g());
        assert!(report.valid);
        assert_eq!(report.restricted_count, 1);
    }
}
