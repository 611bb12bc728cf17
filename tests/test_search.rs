//! # EV Optimization Tests
//!
//! Nature auto-selection, speed benchmarks and the survival searches,
//! including the IMPOSSIBLE verdict and the re-run invariant: a spread
//! the search returns always satisfies the benchmark it was asked for.

use vgc_engine::data::MoveData;
use vgc_engine::search::nature::{Benchmarks, RolePreference};
use vgc_engine::search::survival::AttackProfile;
use vgc_engine::search::{speed::outspeed_evs, CancelToken};
use vgc_engine::{
    calculate_damage, design_spread_with_benchmarks, find_optimal_nature, optimize_dual_survival,
    BaseStats, EvSpread, ModifierContext, MoveCategory, Nature, PokemonBuild, PokemonType,
};

fn entei_base() -> BaseStats {
    BaseStats { hp: 115, attack: 115, defense: 85, special_attack: 90, special_defense: 75, speed: 100 }
}

fn ogerpon_wellspring() -> PokemonBuild {
    let mut build = PokemonBuild::new(
        "ogerpon-wellspring",
        BaseStats { hp: 80, attack: 120, defense: 84, special_attack: 60, special_defense: 96, speed: 110 },
        vec![PokemonType::Grass, PokemonType::Water],
    );
    build.nature = Nature::Jolly;
    build
}

fn urshifu_wicked_blow() -> AttackProfile {
    let mut attacker = PokemonBuild::new(
        "urshifu-single-strike",
        BaseStats { hp: 100, attack: 130, defense: 100, special_attack: 63, special_defense: 60, speed: 97 },
        vec![PokemonType::Fighting, PokemonType::Dark],
    );
    attacker.nature = Nature::Adamant;
    attacker.evs = EvSpread { attack: 252, ..Default::default() };
    AttackProfile {
        attacker,
        move_data: MoveData::damaging("wicked-blow", PokemonType::Dark, MoveCategory::Physical, 75),
        ctx: ModifierContext::doubles(),
    }
}

fn landorus_sludge_bomb() -> AttackProfile {
    let mut attacker = PokemonBuild::new(
        "landorus",
        BaseStats { hp: 89, attack: 125, defense: 90, special_attack: 115, special_defense: 80, speed: 101 },
        vec![PokemonType::Ground, PokemonType::Flying],
    );
    attacker.nature = Nature::Modest;
    attacker.evs = EvSpread { special_attack: 252, ..Default::default() };
    let mut ctx = ModifierContext::doubles();
    ctx.attacker_item = Some("life-orb".into());
    ctx.attacker_ability = Some("sheer-force".into());
    AttackProfile {
        attacker,
        move_data: MoveData::damaging("sludge-bomb", PokemonType::Poison, MoveCategory::Special, 90)
            .with_effect_chance(30),
        ctx,
    }
}

#[test]
fn test_entei_selects_adamant() {
    // Speed 137 (outpacing -1 Chien-Pao) while maximizing Attack:
    // Adamant, never Timid.
    let benchmarks = Benchmarks {
        speed_target: Some(137),
        prioritize: Some(RolePreference::Offense),
        offensive_evs: 252,
    };
    let choice = find_optimal_nature(&entei_base(), &benchmarks, true, false, "offensive")
        .expect("benchmarks are reachable");

    assert_eq!(choice.nature, Nature::Adamant);
    assert!(choice.final_stats.attack >= 167, "attack {}", choice.final_stats.attack);
    assert!(choice.final_stats.speed >= 137, "speed {}", choice.final_stats.speed);
    assert!(choice.evs.total() <= 508);
}

#[test]
fn test_unreachable_speed_benchmark_is_none() {
    let benchmarks = Benchmarks {
        speed_target: Some(300),
        prioritize: Some(RolePreference::Offense),
        offensive_evs: 252,
    };
    assert!(find_optimal_nature(&entei_base(), &benchmarks, true, false, "offensive").is_none());
}

#[test]
fn test_outspeed_evs_reruns_clean() {
    // Invariant: a returned speed investment actually meets the target.
    let target_speed = 135;
    let evs = outspeed_evs(100, target_speed, Nature::Jolly, 50).expect("reachable");
    let mut build = PokemonBuild::new("entei", entei_base(), vec![PokemonType::Fire]);
    build.nature = Nature::Jolly;
    build.evs.speed = evs;
    let stats = vgc_engine::calculate_all_stats(&build);
    assert!(stats.speed > target_speed);
}

#[test]
fn test_dual_survival_verdict_contract() {
    // Ogerpon-Wellspring against Wicked Blow and Sludge Bomb at 93.75%:
    // either a minimum-total spread surviving both, or IMPOSSIBLE with
    // best-effort percentages.
    let defender = ogerpon_wellspring();
    let first = urshifu_wicked_blow();
    let second = landorus_sludge_bomb();

    let outcome = optimize_dual_survival(&defender, &first, &second, 93.75, 508, None).unwrap();
    let report = outcome.report();
    assert!(report.spread.total() <= 508);

    if outcome.is_possible() {
        assert!(report.survival_pcts.iter().all(|&p| p >= 93.75));

        // Re-run the engine with the found spread: the benchmark holds.
        let mut resolved = defender.clone();
        resolved.evs.hp = report.spread.hp;
        resolved.evs.defense = report.spread.defense;
        resolved.evs.special_defense = report.spread.special_defense;
        for attack in [&first, &second] {
            let result =
                calculate_damage(&attack.attacker, &resolved, &attack.move_data, &attack.ctx).unwrap();
            assert!(result.survival_pct() >= 93.75);
        }
    } else {
        assert!(report.survival_pcts.iter().any(|&p| p < 93.75));
    }
}

#[test]
fn test_dual_survival_minimum_against_weak_attacks() {
    // Two weak neutral hits: the zero spread already survives, and the
    // search must return exactly that, not an over-investment.
    let defender = ogerpon_wellspring();
    let mut weak1 = urshifu_wicked_blow();
    weak1.move_data = MoveData::damaging("aqua-jet", PokemonType::Water, MoveCategory::Physical, 40);
    let mut weak2 = landorus_sludge_bomb();
    weak2.move_data = MoveData::damaging("snarl", PokemonType::Dark, MoveCategory::Special, 55);
    weak2.ctx = ModifierContext::doubles();

    let outcome = optimize_dual_survival(&defender, &weak1, &weak2, 93.75, 508, None).unwrap();
    assert!(outcome.is_possible());
    assert_eq!(outcome.report().spread.total(), 0);
}

#[test]
fn test_combined_speed_and_survival_budget() {
    // Outspeed a 130-speed target and survive Wicked Blow inside one
    // 508 budget.
    let defender = ogerpon_wellspring();
    let designed = design_spread_with_benchmarks(
        &defender,
        Some(130),
        Some(&urshifu_wicked_blow()),
        0,
        None,
    )
    .unwrap();

    assert!(designed.evs.total() <= 508);
    assert!(designed.final_stats.speed > 130);
    if let Some(result) = &designed.survival_result {
        assert!(result.max_percent < 100.0, "survives: {}", result.damage_range());
    }
}

#[test]
fn test_cancellation_aborts_search() {
    let token = CancelToken::new();
    token.cancel();
    let err = optimize_dual_survival(
        &ogerpon_wellspring(),
        &urshifu_wicked_blow(),
        &landorus_sludge_bomb(),
        93.75,
        508,
        Some(&token),
    );
    assert!(matches!(err, Err(vgc_engine::EngineError::Cancelled)));
}
