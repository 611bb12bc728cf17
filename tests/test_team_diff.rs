//! # Team Diff Tests
//!
//! Version comparison over two team snapshots: member matching by
//! species (forms distinct), per-field change detection and the
//! pattern-based change explanations.

use vgc_engine::diff::{generate_team_diff, ChangeKind, DiffField};
use vgc_engine::io::parse_team;
use vgc_engine::{compare_pokemon, BaseStats, EvSpread, Nature, PokemonBuild, PokemonType};

fn urshifu() -> PokemonBuild {
    let mut build = PokemonBuild::new(
        "urshifu-rapid-strike",
        BaseStats { hp: 100, attack: 130, defense: 100, special_attack: 63, special_defense: 60, speed: 97 },
        vec![PokemonType::Fighting, PokemonType::Water],
    );
    build.nature = Nature::Jolly;
    build.evs = EvSpread { hp: 4, attack: 252, speed: 252, ..Default::default() };
    build.item = Some("choice-scarf".into());
    build.ability = Some("unseen-fist".into());
    build.tera_type = Some(PokemonType::Water);
    build.moves = vec![
        "surging-strikes".into(),
        "close-combat".into(),
        "u-turn".into(),
        "aqua-jet".into(),
    ];
    build
}

fn amoonguss() -> PokemonBuild {
    let mut build = PokemonBuild::new(
        "amoonguss",
        BaseStats { hp: 114, attack: 85, defense: 70, special_attack: 85, special_defense: 80, speed: 30 },
        vec![PokemonType::Grass, PokemonType::Poison],
    );
    build.nature = Nature::Bold;
    build.evs = EvSpread { hp: 252, defense: 180, special_defense: 76, ..Default::default() };
    build.item = Some("rocky-helmet".into());
    build
}

#[test]
fn test_roster_swap_detected() {
    let rillaboom = PokemonBuild::new(
        "rillaboom",
        BaseStats { hp: 100, attack: 125, defense: 90, special_attack: 60, special_defense: 70, speed: 85 },
        vec![PokemonType::Grass],
    );

    let team1 = vec![urshifu(), amoonguss()];
    let team2 = vec![urshifu(), rillaboom];

    let diff = generate_team_diff(&team1, &team2, "Week 1", "Week 2");
    let summary = diff.summary();
    assert_eq!(summary.removed, 1);
    assert_eq!(summary.added, 1);
    assert_eq!(summary.unchanged, 1);

    let removed: Vec<&str> = diff
        .pokemon_diffs
        .iter()
        .filter(|d| d.change_kind == ChangeKind::Removed)
        .map(|d| d.species.as_str())
        .collect();
    assert_eq!(removed, vec!["amoonguss"]);
    assert_eq!(diff.unchanged, vec!["urshifu-rapid-strike".to_string()]);
}

#[test]
fn test_modified_member_fields_and_reasons() {
    let v1 = urshifu();
    let mut v2 = urshifu();
    v2.nature = Nature::Adamant;
    v2.evs = EvSpread { hp: 132, attack: 252, speed: 124, ..Default::default() };
    v2.item = Some("focus-sash".into());
    v2.moves = vec![
        "surging-strikes".into(),
        "close-combat".into(),
        "u-turn".into(),
        "detect".into(),
    ];

    let changes = compare_pokemon(&v1, &v2);
    let fields: Vec<DiffField> = changes.iter().map(|c| c.field).collect();
    assert!(fields.contains(&DiffField::Nature));
    assert!(fields.contains(&DiffField::Evs));
    assert!(fields.contains(&DiffField::Item));
    assert!(fields.contains(&DiffField::Moves));

    // Jolly (+Spe) to Adamant (+Atk) trades speed for power.
    let nature = changes.iter().find(|c| c.field == DiffField::Nature).unwrap();
    assert_eq!(nature.reason, "+Atk, -SpA (trades speed for power)");

    // Speed EVs moved into HP.
    let evs = changes.iter().find(|c| c.field == DiffField::Evs).unwrap();
    assert_eq!(evs.reason, "Moved 128 EVs from Spe to HP (bulk over speed)");

    let moves = changes.iter().find(|c| c.field == DiffField::Moves).unwrap();
    assert_eq!(moves.reason, "Replaced aqua-jet with detect");
}

#[test]
fn test_tera_and_ability_changes() {
    let v1 = urshifu();
    let mut v2 = urshifu();
    v2.tera_type = Some(PokemonType::Dark);
    v2.ability = None;

    let changes = compare_pokemon(&v1, &v2);
    let tera = changes.iter().find(|c| c.field == DiffField::TeraType).unwrap();
    assert_eq!(tera.reason, "Changed Tera from Water to Dark");
    let ability = changes.iter().find(|c| c.field == DiffField::Ability).unwrap();
    assert_eq!(ability.reason, "Removed unseen-fist");
}

#[test]
fn test_diff_over_parsed_pastes() {
    // The codec output feeds the diff directly: parse two paste
    // versions and compare the rebuilt teams.
    let v1_paste = "\
Amoonguss @ Rocky Helmet
Ability: Regenerator
Level: 50
EVs: 252 HP / 180 Def / 76 SpD
Bold Nature
- Spore
- Rage Powder
- Pollen Puff
- Protect";
    let v2_paste = "\
Amoonguss @ Sitrus Berry
Ability: Regenerator
Level: 50
EVs: 252 HP / 180 Def / 76 SpD
Bold Nature
- Spore
- Rage Powder
- Pollen Puff
- Clear Smog";

    let base = amoonguss().base_stats;
    let types = amoonguss().types.clone();
    let rebuild = |paste: &str| -> Vec<PokemonBuild> {
        parse_team(paste)
            .unwrap()
            .into_iter()
            .map(|set| {
                let mut build = PokemonBuild::new(set.species, base, types.clone());
                build.nature = set.nature;
                build.evs = set.evs;
                build.ivs = set.ivs;
                build.level = set.level;
                build.item = set.item;
                build.ability = set.ability;
                build.tera_type = set.tera_type;
                build.moves = set.moves;
                build
            })
            .collect()
    };

    let diff = generate_team_diff(&rebuild(v1_paste), &rebuild(v2_paste), "v1", "v2");
    let summary = diff.summary();
    assert_eq!(summary.modified, 1);
    assert_eq!(summary.field_changes.get("item"), Some(&1));
    assert_eq!(summary.field_changes.get("moves"), Some(&1));
    assert_eq!(summary.total_field_changes, 2);

    let modified = &diff.pokemon_diffs[0];
    assert_eq!(modified.change_kind, ChangeKind::Modified);
    let moves = modified.changes.iter().find(|c| c.field == DiffField::Moves).unwrap();
    assert_eq!(moves.reason, "Replaced protect with clear-smog");
}

#[test]
fn test_duplicate_species_pair_first_to_first() {
    let base = BaseStats { hp: 80, attack: 80, defense: 80, special_attack: 80, special_defense: 80, speed: 80 };
    let first = PokemonBuild::new("ditto", base, vec![PokemonType::Normal]);
    let mut second = first.clone();
    second.item = Some("choice-scarf".into());

    // Two dittos against one: the extra counts as removed.
    let diff = generate_team_diff(&[first.clone(), second], &[first], "v1", "v2");
    let summary = diff.summary();
    assert_eq!(summary.removed, 1);
    assert_eq!(summary.added, 0);
    assert_eq!(summary.unchanged, 1);
}
