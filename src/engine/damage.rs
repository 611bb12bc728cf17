//! # Damage Calculator
//!
//! The full Gen 9 damage pipeline:
//!
//! base = floor(floor(floor(L_factor * Power * Atk / Def) / 50) + 2)
//!
//! followed by, in order (each step floored): spread, weather, terrain,
//! critical, then per roll (0.85..=1.00 in 16 steps): STAB, type
//! effectiveness, burn, screens, items, Helping Hand, Friend Guard,
//! 1-damage clamp and the multi-hit multiplier. Stat-stage, Choice item,
//! stat-doubling ability, Ruin aura, Paradox boost and defensive item
//! modifiers are applied to the stats before the base formula.
//!
//! All arithmetic is integer; same inputs produce byte-identical output.

use crate::config::DAMAGE_ROLL_COUNT;
use crate::data::MoveData;
use crate::engine::items::{
    attacker_damage_item_modifier, attacker_stat_item_modifier, defender_stat_item_modifier,
};
use crate::engine::modifiers::{
    apply_stage, screen_modifier, stab_modifier, terrain_modifier, weather_modifier, Modifier,
    ModifierContext,
};
use crate::engine::type_chart::{type_effectiveness, Effectiveness};
use crate::pokemon::PokemonBuild;
use crate::stats::calculate_all_stats;
use crate::types::{EngineError, EngineResult, MoveCategory, Stat};

/// Punch moves for Iron Fist / Punching Glove.
const PUNCH_MOVES: &[&str] = &[
    "fire-punch", "ice-punch", "thunder-punch", "mach-punch", "bullet-punch",
    "drain-punch", "focus-punch", "shadow-punch", "sky-uppercut", "mega-punch",
    "hammer-arm", "meteor-mash", "plasma-fists", "wicked-blow", "surging-strikes",
    "jet-punch", "rage-fist", "double-iron-bash",
];

/// Bite moves for Strong Jaw.
const BITE_MOVES: &[&str] = &[
    "bite", "crunch", "fire-fang", "ice-fang", "thunder-fang", "poison-fang",
    "psychic-fangs", "hyper-fang", "jaw-lock", "fishious-rend",
];

/// Pulse moves for Mega Launcher.
const PULSE_MOVES: &[&str] = &[
    "water-pulse", "dark-pulse", "dragon-pulse", "aura-sphere", "origin-pulse",
    "terrain-pulse",
];

/// Result of one damage calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageResult {
    pub min_damage: u32,
    pub max_damage: u32,
    /// Percentages truncated to one decimal (98.49% -> 98.4%).
    pub min_percent: f64,
    pub max_percent: f64,
    /// The 16 rolls, monotonically non-decreasing.
    pub rolls: [u32; DAMAGE_ROLL_COUNT],
    pub defender_hp: u16,
    pub ko_chance: String,
    pub is_guaranteed_ohko: bool,
    pub is_possible_ohko: bool,
    /// Non-damaging move: zero distribution.
    pub is_status: bool,
    /// Hits per use for multi-hit moves, 1 otherwise.
    pub hit_count: u8,
    /// Audit trail of the modifiers that actually applied, for display.
    pub applied_modifiers: Vec<String>,
}

impl DamageResult {
    /// Formatted damage range string for reports.
    pub fn damage_range(&self) -> String {
        format!(
            "{}-{} ({:.1}%-{:.1}%)",
            self.min_damage, self.max_damage, self.min_percent, self.max_percent
        )
    }

    /// Fraction of rolls that leave the defender standing, in percent.
    pub fn survival_pct(&self) -> f64 {
        let survives = self.rolls.iter().filter(|&&r| r < self.defender_hp as u32).count();
        survives as f64 / DAMAGE_ROLL_COUNT as f64 * 100.0
    }

    fn status(defender_hp: u16) -> Self {
        Self {
            min_damage: 0,
            max_damage: 0,
            min_percent: 0.0,
            max_percent: 0.0,
            rolls: [0; DAMAGE_ROLL_COUNT],
            defender_hp,
            ko_chance: "N/A (Status move)".into(),
            is_guaranteed_ohko: false,
            is_possible_ohko: false,
            is_status: true,
            hit_count: 0,
            applied_modifiers: vec!["Status move".into()],
        }
    }
}

/// Percentage of defender HP, truncated to one decimal.
fn truncated_percent(damage: u32, defender_hp: u16) -> f64 {
    (damage as u64 * 1000 / defender_hp.max(1) as u64) as f64 / 10.0
}

/// Compute the damage distribution of one move from `attacker` against
/// `defender` under `ctx`.
pub fn calculate_damage(
    attacker: &PokemonBuild,
    defender: &PokemonBuild,
    move_data: &MoveData,
    ctx: &ModifierContext,
) -> EngineResult<DamageResult> {
    attacker.validate()?;
    defender.validate()?;

    let defender_stats = calculate_all_stats(defender);
    let defender_hp = defender_stats.hp;

    if !move_data.is_damaging() {
        return Ok(DamageResult::status(defender_hp));
    }

    let power = move_data.base_power.ok_or_else(|| {
        EngineError::invalid_input(
            "move.base_power",
            format!("{} is damaging but has no resolved base power", move_data.name),
        )
    })? as u64;

    let mut applied: Vec<String> = Vec::new();

    // Multi-hit resolution. Always-crit moves force the crit flag.
    let mut ctx = ctx.clone();
    let mut hit_count: u8 = 1;
    let mut always_crit = false;
    if let Some(multi) = move_data.multi_hit {
        hit_count = if ctx.move_hits > 0 { ctx.move_hits } else { multi.max_hits };
        always_crit = multi.always_crit;
        if always_crit {
            ctx.is_critical = true;
        }
    }

    // Phase A/B - stat selection and stages. A crit ignores the
    // defender's positive defense stage and the attacker's negative
    // attack stage, but honours the unfavourable directions.
    let attacker_stats = calculate_all_stats(attacker);
    let (mut atk, atk_stage, mut def, def_stage) = match move_data.category {
        MoveCategory::Physical => (
            attacker_stats.attack as u32,
            ctx.attack_stage,
            defender_stats.defense as u32,
            ctx.defense_stage,
        ),
        MoveCategory::Special => (
            attacker_stats.special_attack as u32,
            ctx.special_attack_stage,
            defender_stats.special_defense as u32,
            ctx.special_defense_stage,
        ),
        MoveCategory::Status => unreachable!("status handled above"),
    };
    if !(ctx.is_critical && atk_stage < 0) {
        atk = apply_stage(atk, atk_stage);
    }
    if !(ctx.is_critical && def_stage > 0) {
        def = apply_stage(def, def_stage);
    }

    // Phase C - stat-modifying items and abilities, in pipeline order.
    if let Some(item) = ctx.attacker_item.as_deref() {
        if let Some(modifier) = attacker_stat_item_modifier(item, move_data.category) {
            atk = modifier.apply(atk);
            applied.push(format!("{} (1.5x {})", item, stat_label(move_data.category)));
        }
    }
    if move_data.category == MoveCategory::Physical {
        if let Some(ability) = ctx.attacker_ability_normalized() {
            if ability == "huge-power" || ability == "pure-power" {
                atk = Modifier::DOUBLE.apply(atk);
                applied.push("Huge Power (2x Attack)".into());
            }
        }
    }
    if ctx.commander_active {
        atk = Modifier::DOUBLE.apply(atk);
        applied.push("Commander (2x all stats)".into());
    }
    if ctx.defender_commander_active {
        def = Modifier::DOUBLE.apply(def);
    }
    if ctx.sword_of_ruin && move_data.category == MoveCategory::Physical {
        def = Modifier::THREE_QUARTERS.apply(def);
        applied.push("Sword of Ruin (0.75x Def)".into());
    }
    if ctx.beads_of_ruin && move_data.category == MoveCategory::Special {
        def = Modifier::THREE_QUARTERS.apply(def);
        applied.push("Beads of Ruin (0.75x SpD)".into());
    }
    if ctx.tablets_of_ruin && move_data.category == MoveCategory::Physical {
        atk = Modifier::THREE_QUARTERS.apply(atk);
        applied.push("Tablets of Ruin (0.75x Atk)".into());
    }
    if ctx.vessel_of_ruin && move_data.category == MoveCategory::Special {
        atk = Modifier::THREE_QUARTERS.apply(atk);
        applied.push("Vessel of Ruin (0.75x SpA)".into());
    }
    for boost in [ctx.attacker_protosynthesis_boost, ctx.attacker_quark_drive_boost] {
        let boosted = match (boost, move_data.category) {
            (Some(Stat::Attack), MoveCategory::Physical) => true,
            (Some(Stat::SpecialAttack), MoveCategory::Special) => true,
            _ => false,
        };
        if boosted {
            atk = Modifier::ONE_POINT_THREE.apply(atk);
            applied.push("Paradox boost (1.3x)".into());
        }
    }
    for boost in [ctx.defender_protosynthesis_boost, ctx.defender_quark_drive_boost] {
        let boosted = match (boost, move_data.category) {
            (Some(Stat::Defense), MoveCategory::Physical) => true,
            (Some(Stat::SpecialDefense), MoveCategory::Special) => true,
            _ => false,
        };
        if boosted {
            def = Modifier::ONE_POINT_THREE.apply(def);
        }
    }
    if let Some(item) = ctx.defender_item.as_deref() {
        if let Some(modifier) = defender_stat_item_modifier(item, &defender.name, move_data.category) {
            def = modifier.apply(def);
            applied.push(format!("{} (1.5x {})", item, defense_label(move_data.category)));
        }
    }

    // Phase D - base power modifiers.
    let mut power = power;
    if let Some(ability) = ctx.attacker_ability_normalized() {
        let move_name = move_data.name.as_str();
        let boost = match ability.as_str() {
            "technician" if power <= 60 => Some(Modifier::ONE_POINT_FIVE),
            "sheer-force" if move_data.effect_chance.is_some() => Some(Modifier::ONE_POINT_THREE),
            "iron-fist" if PUNCH_MOVES.contains(&move_name) => Some(Modifier::ONE_POINT_TWO),
            "strong-jaw" if BITE_MOVES.contains(&move_name) => Some(Modifier::ONE_POINT_FIVE),
            "tough-claws" if move_data.makes_contact => Some(Modifier::ONE_POINT_THREE),
            "mega-launcher" if PULSE_MOVES.contains(&move_name) => Some(Modifier::ONE_POINT_FIVE),
            _ => None,
        };
        if let Some(modifier) = boost {
            power = modifier.apply(power as u32) as u64;
            applied.push(format!("{} ({:.1}x power)", ability, modifier.as_f64()));
        }
    }
    if let Some(item) = ctx.attacker_item_normalized() {
        if item == "punching-glove" && PUNCH_MOVES.contains(&move_data.name.as_str()) {
            power = Modifier::ONE_POINT_ONE.apply(power as u32) as u64;
            applied.push("Punching Glove (1.1x power)".into());
        }
    }

    // Phase E - base damage.
    let level_factor = (2 * attacker.level as u64) / 5 + 2;
    let mut base = level_factor * power * atk as u64 / def.max(1) as u64 / 50 + 2;

    // Phase F - pre-random multipliers, each floored.
    if ctx.is_doubles && ctx.multiple_targets && move_data.target.is_spread() {
        base = Modifier::THREE_QUARTERS.apply(base as u32) as u64;
        applied.push("Spread (0.75x)".into());
    }
    if let Some(modifier) = weather_modifier(ctx.weather, move_data.move_type) {
        base = modifier.apply(base as u32) as u64;
        applied.push(format!("{} ({:.1}x)", ctx.weather.display_name(), modifier.as_f64()));
    }
    if let Some(modifier) = terrain_modifier(
        ctx.terrain,
        move_data.move_type,
        &move_data.name,
        attacker.is_grounded(),
        defender.is_grounded(),
    ) {
        base = modifier.apply(base as u32) as u64;
        applied.push(format!("{} ({:.1}x)", ctx.terrain.display_name(), modifier.as_f64()));
    }
    if ctx.is_critical {
        base = Modifier::ONE_POINT_FIVE.apply(base as u32) as u64;
        applied.push("Critical (1.5x)".into());
    }

    // Defender typing for the chart lookup: an active Tera replaces the
    // whole list.
    let defender_types: Vec<_> = match (ctx.defender_tera_active, ctx.defender_tera_type) {
        (true, Some(tera)) => vec![tera],
        _ => defender.types.clone(),
    };
    let effectiveness = type_effectiveness(move_data.move_type, &defender_types);

    let stab = stab_modifier(&attacker.types, move_data.move_type, &ctx);

    // Phase G - the 16 rolls.
    let mut rolls = [0u32; DAMAGE_ROLL_COUNT];
    for (i, roll) in rolls.iter_mut().enumerate() {
        if effectiveness.is_immune() {
            // Zero effectiveness short-circuits every other multiplier.
            *roll = 0;
            continue;
        }

        let mut damage = (base * (85 + i as u64) / 100) as u32;
        damage = stab.apply(damage);
        damage = (damage as u64 * effectiveness.quarters() as u64 / 4) as u32;

        if ctx.attacker_burned
            && move_data.category == MoveCategory::Physical
            && !ctx.has_guts
            && move_data.name != "facade"
        {
            damage = Modifier::HALF.apply(damage);
        }
        if let Some(modifier) = screen_modifier(&ctx, move_data.category) {
            damage = modifier.apply(damage);
        }
        if let Some(item) = ctx.attacker_item.as_deref() {
            let modifier = attacker_damage_item_modifier(
                item,
                &attacker.name,
                move_data.move_type,
                move_data.category,
                effectiveness.is_super_effective(),
                ctx.metronome_uses,
            );
            damage = modifier.apply(damage);
        }
        if ctx.helping_hand {
            damage = Modifier::ONE_POINT_FIVE.apply(damage);
        }
        if ctx.friend_guard {
            damage = Modifier::THREE_QUARTERS.apply(damage);
        }

        damage = damage.max(1);
        damage *= hit_count as u32;
        *roll = damage;
    }

    debug_assert!(rolls.windows(2).all(|w| w[0] <= w[1]), "rolls must be non-decreasing");

    // Audit entries computed once per call, not per roll.
    if !stab.is_neutral() {
        if stab == Modifier::DOUBLE {
            applied.push("STAB (2.0x - Tera/Adaptability)".into());
        } else {
            applied.push("STAB (1.5x)".into());
        }
    }
    if effectiveness != Effectiveness::NEUTRAL {
        applied.push(effectiveness.label().into());
    }
    if ctx.attacker_burned
        && move_data.category == MoveCategory::Physical
        && !ctx.has_guts
        && move_data.name != "facade"
        && !effectiveness.is_immune()
    {
        applied.push("Burn (0.5x)".into());
    }
    if screen_modifier(&ctx, move_data.category).is_some() && !effectiveness.is_immune() {
        applied.push(if ctx.is_doubles { "Screen (0.67x)".into() } else { "Screen (0.5x)".into() });
    }
    if ctx.helping_hand {
        applied.push("Helping Hand (1.5x)".into());
    }
    if ctx.friend_guard {
        applied.push("Friend Guard (0.75x)".into());
    }
    if hit_count > 1 {
        let crit_note = if always_crit { " (always crits)" } else { "" };
        applied.push(format!("Multi-hit ({} hits{})", hit_count, crit_note));
    }

    let min_damage = rolls[0];
    let max_damage = rolls[DAMAGE_ROLL_COUNT - 1];
    let min_percent = truncated_percent(min_damage, defender_hp);
    let max_percent = truncated_percent(max_damage, defender_hp);

    let kos = rolls.iter().filter(|&&r| r >= defender_hp as u32).count();
    let is_guaranteed_ohko = kos == DAMAGE_ROLL_COUNT;
    let is_possible_ohko = kos > 0;
    let ko_chance = if is_guaranteed_ohko {
        "Guaranteed OHKO".to_string()
    } else if kos == 0 {
        format!("0% OHKO ({:.1}% max)", max_percent)
    } else {
        format!("{:.1}% OHKO", kos as f64 / DAMAGE_ROLL_COUNT as f64 * 100.0)
    };

    Ok(DamageResult {
        min_damage,
        max_damage,
        min_percent,
        max_percent,
        rolls,
        defender_hp,
        ko_chance,
        is_guaranteed_ohko,
        is_possible_ohko,
        is_status: false,
        hit_count,
        applied_modifiers: applied,
    })
}

fn stat_label(category: MoveCategory) -> &'static str {
    match category {
        MoveCategory::Physical => "Atk",
        MoveCategory::Special => "SpA",
        MoveCategory::Status => "-",
    }
}

fn defense_label(category: MoveCategory) -> &'static str {
    match category {
        MoveCategory::Physical => "Def",
        MoveCategory::Special => "SpD",
        MoveCategory::Status => "-",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::{BaseStats, EvSpread, PokemonBuild};
    use crate::types::{Nature, PokemonType};

    fn landorus() -> PokemonBuild {
        PokemonBuild::new(
            "landorus",
            BaseStats { hp: 89, attack: 125, defense: 90, special_attack: 115, special_defense: 80, speed: 101 },
            vec![PokemonType::Ground, PokemonType::Flying],
        )
        .with_nature(Nature::Adamant)
        .with_evs(EvSpread { attack: 252, speed: 252, ..Default::default() })
    }

    fn incineroar() -> PokemonBuild {
        PokemonBuild::new(
            "incineroar",
            BaseStats { hp: 95, attack: 115, defense: 90, special_attack: 80, special_defense: 90, speed: 60 },
            vec![PokemonType::Fire, PokemonType::Dark],
        )
        .with_nature(Nature::Careful)
        .with_evs(EvSpread { hp: 252, special_defense: 252, ..Default::default() })
    }

    fn earthquake() -> MoveData {
        MoveData::damaging("earthquake", PokemonType::Ground, MoveCategory::Physical, 100)
            .with_target(crate::types::MoveTarget::AllAdjacent)
    }

    #[test]
    fn test_rolls_non_decreasing_and_min_one() {
        let result = calculate_damage(&landorus(), &incineroar(), &earthquake(), &ModifierContext::doubles()).unwrap();
        assert!(result.rolls.windows(2).all(|w| w[0] <= w[1]));
        assert!(result.min_damage >= 1);
    }

    #[test]
    fn test_spread_ratio() {
        let single = calculate_damage(&landorus(), &incineroar(), &earthquake(), &ModifierContext::doubles()).unwrap();
        let mut ctx = ModifierContext::doubles();
        ctx.multiple_targets = true;
        let spread = calculate_damage(&landorus(), &incineroar(), &earthquake(), &ctx).unwrap();

        assert!(spread.max_damage < single.max_damage);
        let ratio = spread.max_damage as f64 / single.max_damage as f64;
        assert!((0.74..=0.76).contains(&ratio), "spread ratio {ratio}");
    }

    #[test]
    fn test_immunity_short_circuits() {
        let tornadus = PokemonBuild::new(
            "tornadus",
            BaseStats { hp: 79, attack: 115, defense: 70, special_attack: 125, special_defense: 80, speed: 111 },
            vec![PokemonType::Flying],
        );
        let result = calculate_damage(&landorus(), &tornadus, &earthquake(), &ModifierContext::doubles()).unwrap();
        assert_eq!(result.max_damage, 0);
        assert!(result.applied_modifiers.iter().any(|m| m.contains("Immune")));
    }

    #[test]
    fn test_status_move_zero_distribution() {
        let taunt = MoveData::status("taunt", PokemonType::Dark);
        let result = calculate_damage(&landorus(), &incineroar(), &taunt, &ModifierContext::doubles()).unwrap();
        assert!(result.is_status);
        assert_eq!(result.rolls, [0; DAMAGE_ROLL_COUNT]);
    }

    #[test]
    fn test_deterministic() {
        let a = calculate_damage(&landorus(), &incineroar(), &earthquake(), &ModifierContext::doubles()).unwrap();
        let b = calculate_damage(&landorus(), &incineroar(), &earthquake(), &ModifierContext::doubles()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_percent_truncation() {
        // 170 HP defender taking 167 max: 167*1000/170 = 982 -> 98.2%.
        assert_eq!(truncated_percent(167, 170), 98.2);
        // The rounding-up trap: 98.49% stays 98.4%.
        assert_eq!(truncated_percent(9849, 10000), 98.4);
    }

    #[test]
    fn test_crit_ignores_positive_defense_stage_only() {
        let mut boosted = ModifierContext::doubles();
        boosted.defense_stage = 2;
        let through_boost = calculate_damage(&landorus(), &incineroar(), &earthquake(), &boosted).unwrap();

        let mut crit_boosted = boosted.clone();
        crit_boosted.is_critical = true;
        let crit = calculate_damage(&landorus(), &incineroar(), &earthquake(), &crit_boosted).unwrap();

        let mut crit_clean = ModifierContext::doubles();
        crit_clean.is_critical = true;
        let crit_baseline = calculate_damage(&landorus(), &incineroar(), &earthquake(), &crit_clean).unwrap();

        // Crit through +2 Def deals the same as crit through +0.
        assert_eq!(crit.max_damage, crit_baseline.max_damage);
        assert!(crit.max_damage > through_boost.max_damage);

        // Negative defense stage is NOT ignored by a crit.
        let mut crit_lowered = ModifierContext::doubles();
        crit_lowered.is_critical = true;
        crit_lowered.defense_stage = -2;
        let crit_low = calculate_damage(&landorus(), &incineroar(), &earthquake(), &crit_lowered).unwrap();
        assert!(crit_low.max_damage > crit_baseline.max_damage);
    }

    #[test]
    fn test_ev_overflow_rejected() {
        let mut broken = landorus();
        broken.evs.hp = 252;
        broken.evs.defense = 252;
        let err = calculate_damage(&broken, &incineroar(), &earthquake(), &ModifierContext::doubles());
        assert!(matches!(err, Err(EngineError::InvalidInput { .. })));
    }
}
