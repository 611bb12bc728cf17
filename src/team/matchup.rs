//! # Team Matchup Engine
//!
//! The 6x6 matchup matrix, threat ranking, opponent-lead prediction,
//! lead scoring, turn-1 priority projection and game-plan synthesis.
//! Scores live in roughly [-100, 100]; positive favours the row
//! Pokemon.

use crate::data::MoveData;
use crate::engine::damage::calculate_damage;
use crate::engine::modifiers::ModifierContext;
use crate::engine::priority::{base_priority, effective_priority, MoveChoice};
use crate::engine::type_chart::type_effectiveness;
use crate::pokemon::PokemonBuild;
use crate::stats::{calculate_all_stats, FinalStats};
use crate::types::{MoveCategory, PokemonType, Terrain};
use crate::utils::normalize_name;

/// Broad role classification used by lead scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRole {
    Sweeper,
    SpeedControl,
    Support,
    Balanced,
}

impl ProfileRole {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sweeper => "sweeper",
            Self::SpeedControl => "speed_control",
            Self::Support => "support",
            Self::Balanced => "balanced",
        }
    }
}

/// A build annotated with everything the matchup engine reads per
/// Pokemon: final stats, priority tooling, speed-control and support
/// flags.
#[derive(Debug, Clone)]
pub struct PokemonProfile {
    pub build: PokemonBuild,
    pub moves: Vec<MoveData>,
    pub ability: String,
    pub final_stats: FinalStats,
    pub has_fake_out: bool,
    pub is_prankster: bool,
    /// Status moves gaining +1 from Prankster.
    pub prankster_moves: Vec<String>,
    pub is_tailwind_setter: bool,
    pub is_trick_room_setter: bool,
    pub is_intimidate: bool,
    /// (move name, effective priority) for every off-bracket-zero move.
    pub priority_moves: Vec<(String, i8)>,
    pub role: ProfileRole,
}

/// Build a profile from a build, its resolved moves and its ability.
/// Fake Out and setter detection read the move list, never the ability
/// name.
pub fn build_profile(build: &PokemonBuild, moves: &[MoveData], ability: &str) -> PokemonProfile {
    let ability_norm = normalize_name(ability);
    let final_stats = calculate_all_stats(build);

    let has_move = |name: &str| moves.iter().any(|m| m.name == name);
    let has_fake_out = has_move("fake-out");
    let is_tailwind_setter = has_move("tailwind");
    let is_trick_room_setter = has_move("trick-room");
    let is_prankster = ability_norm == "prankster";
    let is_intimidate = ability_norm == "intimidate";

    let prankster_moves = if is_prankster {
        moves
            .iter()
            .filter(|m| m.category == MoveCategory::Status)
            .map(|m| m.name.clone())
            .collect()
    } else {
        Vec::new()
    };

    let mut priority_moves = Vec::new();
    for m in moves {
        let choice = MoveChoice {
            move_name: m.name.clone(),
            is_status: m.category == MoveCategory::Status,
            move_type: Some(m.move_type),
            ability: Some(ability_norm.clone()),
            hp_percent: 100.0,
        };
        let priority = effective_priority(&choice, Terrain::None);
        if priority != 0 {
            priority_moves.push((m.name.clone(), priority));
        }
    }

    let role = if is_tailwind_setter || is_trick_room_setter {
        ProfileRole::SpeedControl
    } else if build.base_stats.attack.max(build.base_stats.special_attack) >= 120 {
        ProfileRole::Sweeper
    } else if moves
        .iter()
        .filter(|m| m.category == MoveCategory::Status)
        .count()
        >= 2
    {
        ProfileRole::Support
    } else {
        ProfileRole::Balanced
    };

    PokemonProfile {
        build: build.clone(),
        moves: moves.to_vec(),
        ability: ability_norm,
        final_stats,
        has_fake_out,
        is_prankster,
        prankster_moves,
        is_tailwind_setter,
        is_trick_room_setter,
        is_intimidate,
        priority_moves,
        role,
    }
}

impl PokemonProfile {
    pub fn name(&self) -> &str {
        &self.build.name
    }

    /// Strongest damaging move against a defender: highest max-roll
    /// percentage in a neutral doubles context.
    pub fn best_move_against(&self, defender: &PokemonBuild) -> Option<(String, crate::engine::damage::DamageResult)> {
        let ctx = ModifierContext::doubles();
        let mut best: Option<(String, crate::engine::damage::DamageResult)> = None;
        for m in &self.moves {
            if !m.is_damaging() || m.base_power.is_none() {
                continue;
            }
            if let Ok(result) = calculate_damage(&self.build, defender, m, &ctx) {
                if best.as_ref().is_none_or(|(_, b)| result.max_percent > b.max_percent) {
                    best = Some((m.name.clone(), result));
                }
            }
        }
        best
    }
}

/// 6x6 (or smaller) matchup scores; `scores[row][col]` is the row
/// Pokemon's edge over the column Pokemon.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupMatrix {
    pub row_names: Vec<String>,
    pub col_names: Vec<String>,
    pub scores: Vec<Vec<i32>>,
}

impl MatchupMatrix {
    pub fn row_sum(&self, row: usize) -> i32 {
        self.scores[row].iter().sum()
    }

    pub fn average(&self) -> f64 {
        let cells: Vec<i32> = self.scores.iter().flatten().copied().collect();
        if cells.is_empty() {
            return 0.0;
        }
        cells.iter().sum::<i32>() as f64 / cells.len() as f64
    }
}

fn cell_score(yours: &PokemonProfile, theirs: &PokemonProfile) -> i32 {
    let mut score: f64 = 0.0;

    // Speed advantage.
    if yours.final_stats.speed > theirs.final_stats.speed {
        score += 15.0;
    } else if yours.final_stats.speed < theirs.final_stats.speed {
        score -= 15.0;
    }

    // Best-case damage each way.
    let your_best = yours.best_move_against(&theirs.build).map(|(_, r)| r.max_percent).unwrap_or(0.0);
    let their_best = theirs.best_move_against(&yours.build).map(|(_, r)| r.max_percent).unwrap_or(0.0);
    score += ((your_best.min(200.0) - their_best.min(200.0)) / 200.0) * 45.0;
    if your_best >= 100.0 {
        score += 15.0;
    }
    if their_best >= 100.0 {
        score -= 15.0;
    }

    // STAB type advantage count.
    let your_edges = yours
        .build
        .types
        .iter()
        .filter(|t| type_effectiveness(**t, &theirs.build.types).is_super_effective())
        .count() as f64;
    let their_edges = theirs
        .build
        .types
        .iter()
        .filter(|t| type_effectiveness(**t, &yours.build.types).is_super_effective())
        .count() as f64;
    score += (your_edges - their_edges) * 10.0;

    // Priority-move ownership.
    let yours_priority = yours.priority_moves.iter().any(|(_, p)| *p > 0);
    let theirs_priority = theirs.priority_moves.iter().any(|(_, p)| *p > 0);
    if yours_priority && !theirs_priority {
        score += 5.0;
    } else if theirs_priority && !yours_priority {
        score -= 5.0;
    }

    (score.round() as i32).clamp(-100, 100)
}

/// Build the full matchup matrix between two teams.
pub fn build_matchup_matrix(yours: &[PokemonProfile], theirs: &[PokemonProfile]) -> MatchupMatrix {
    let scores = yours
        .iter()
        .map(|row| theirs.iter().map(|col| cell_score(row, col)).collect())
        .collect();
    MatchupMatrix {
        row_names: yours.iter().map(|p| p.name().to_string()).collect(),
        col_names: theirs.iter().map(|p| p.name().to_string()).collect(),
        scores,
    }
}

/// Threat severity buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// One opposing Pokemon's threat assessment against your team.
#[derive(Debug, Clone)]
pub struct ThreatAssessment {
    pub name: String,
    pub threat_level: ThreatLevel,
    /// How many of your Pokemon it outspeeds.
    pub outspeeds: usize,
    /// How many of your Pokemon its best move OHKOs or 2HKOs.
    pub koed: usize,
    pub notes: Vec<String>,
}

/// Rank every opposing Pokemon by how many of your team members it
/// outspeeds and removes in one or two hits.
pub fn rank_threats(
    yours: &[PokemonProfile],
    theirs: &[PokemonProfile],
    _matrix: &MatchupMatrix,
) -> Vec<ThreatAssessment> {
    let mut threats: Vec<ThreatAssessment> = theirs
        .iter()
        .map(|threat| {
            let outspeeds = yours
                .iter()
                .filter(|mine| threat.final_stats.speed > mine.final_stats.speed)
                .count();
            let mut koed = 0;
            let mut notes = Vec::new();
            for mine in yours {
                if let Some((move_name, result)) = threat.best_move_against(&mine.build) {
                    if result.is_possible_ohko {
                        koed += 1;
                        notes.push(format!("{} OHKOs {} ({})", move_name, mine.name(), result.ko_chance));
                    } else if result.max_percent >= 50.0 {
                        koed += 1;
                        notes.push(format!("{} 2HKOs {}", move_name, mine.name()));
                    }
                }
            }

            let threat_level = match (koed, outspeeds) {
                (k, o) if k >= 4 || (k >= 3 && o >= 3) => ThreatLevel::Critical,
                (k, o) if k >= 2 && o >= 2 => ThreatLevel::High,
                (k, o) if k >= 1 || o >= 2 => ThreatLevel::Medium,
                _ => ThreatLevel::Low,
            };

            ThreatAssessment {
                name: threat.name().to_string(),
                threat_level,
                outspeeds,
                koed,
                notes,
            }
        })
        .collect();

    threats.sort_by(|a, b| b.threat_level.cmp(&a.threat_level).then(b.koed.cmp(&a.koed)));
    threats
}

/// Lead score for the opponent-lead prediction heuristic:
/// 100 for Fake Out, 80 for Prankster Tailwind or a Trick Room setter,
/// 40 for Intimidate, plus Speed / 2 as the tiebreaker.
pub fn lead_score(profile: &PokemonProfile) -> u32 {
    let mut score = 0;
    if profile.has_fake_out {
        score += 100;
    }
    if (profile.is_prankster && profile.is_tailwind_setter) || profile.is_trick_room_setter {
        score += 80;
    }
    if profile.is_intimidate {
        score += 40;
    }
    score + profile.final_stats.speed as u32 / 2
}

/// Predicted opponent leads: the top two by lead score.
pub fn predict_opponent_leads(theirs: &[PokemonProfile]) -> Vec<usize> {
    let mut indexed: Vec<(usize, u32)> = theirs.iter().map(lead_score).enumerate().collect();
    indexed.sort_by(|a, b| b.1.cmp(&a.1));
    indexed.into_iter().take(2).map(|(i, _)| i).collect()
}

/// Score one of your lead pairs into the predicted opposing leads:
/// matrix edge against the predicted pair plus synergy bonuses for
/// Fake Out support and speed control.
pub fn score_lead_pair(
    pair: (usize, usize),
    yours: &[PokemonProfile],
    predicted_leads: &[usize],
    matrix: &MatchupMatrix,
) -> i32 {
    let (a, b) = pair;
    let mut score = 0;

    for &opp in predicted_leads {
        score += matrix.scores[a][opp] + matrix.scores[b][opp];
    }

    let first = &yours[a];
    let second = &yours[b];
    // Fake Out + a speed-control partner is the classic opening.
    if (first.has_fake_out && second.role == ProfileRole::SpeedControl)
        || (second.has_fake_out && first.role == ProfileRole::SpeedControl)
    {
        score += 40;
    }
    if first.has_fake_out || second.has_fake_out {
        score += 15;
    }
    if first.is_intimidate || second.is_intimidate {
        score += 10;
    }
    score
}

/// A recommended lead pair with its reasoning.
#[derive(Debug, Clone)]
pub struct LeadRecommendation {
    pub pokemon_1: String,
    pub pokemon_2: String,
    pub score: i32,
    pub reasoning: String,
}

/// Top three lead pairs against the predicted opposing leads.
pub fn recommend_leads(
    yours: &[PokemonProfile],
    theirs: &[PokemonProfile],
    matrix: &MatchupMatrix,
) -> Vec<LeadRecommendation> {
    let predicted = predict_opponent_leads(theirs);
    let mut scored: Vec<((usize, usize), i32)> = Vec::new();

    for a in 0..yours.len() {
        for b in (a + 1)..yours.len() {
            scored.push(((a, b), score_lead_pair((a, b), yours, &predicted, matrix)));
        }
    }
    scored.sort_by(|x, y| y.1.cmp(&x.1));

    scored
        .into_iter()
        .take(3)
        .map(|((a, b), score)| {
            let first = &yours[a];
            let second = &yours[b];
            let mut reasons = Vec::new();
            if first.has_fake_out || second.has_fake_out {
                reasons.push("Fake Out pressure");
            }
            if first.role == ProfileRole::SpeedControl || second.role == ProfileRole::SpeedControl {
                reasons.push("speed control");
            }
            if first.is_intimidate || second.is_intimidate {
                reasons.push("Intimidate support");
            }
            if reasons.is_empty() {
                reasons.push("best matrix matchup into the predicted leads");
            }
            LeadRecommendation {
                pokemon_1: first.name().to_string(),
                pokemon_2: second.name().to_string(),
                score,
                reasoning: reasons.join(", "),
            }
        })
        .collect()
}

/// Which side a turn-1 actor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Yours,
    Theirs,
}

/// One projected turn-1 action.
#[derive(Debug, Clone)]
pub struct Turn1Action {
    pub pokemon: String,
    pub side: Side,
    pub move_name: String,
    pub priority: i8,
    pub speed: u16,
}

/// The most likely opening move of a profile: Fake Out first, then the
/// highest-priority move, then Tailwind/Trick Room, then the strongest
/// damaging move.
pub fn best_turn1_move(profile: &PokemonProfile) -> Option<(String, i8)> {
    if profile.has_fake_out {
        return Some(("fake-out".into(), 3));
    }
    if profile.is_tailwind_setter {
        let choice = MoveChoice {
            move_name: "tailwind".into(),
            is_status: true,
            move_type: None,
            ability: Some(profile.ability.clone()),
            hp_percent: 100.0,
        };
        return Some(("tailwind".into(), effective_priority(&choice, Terrain::None)));
    }
    if profile.is_trick_room_setter {
        return Some(("trick-room".into(), base_priority("trick-room")));
    }
    if let Some((name, priority)) = profile
        .priority_moves
        .iter()
        .max_by_key(|(_, p)| *p)
        .filter(|(_, p)| *p > 0)
    {
        return Some((name.clone(), *priority));
    }
    profile
        .moves
        .iter()
        .filter(|m| m.is_damaging())
        .max_by_key(|m| m.base_power.unwrap_or(0))
        .map(|m| (m.name.clone(), m.priority))
}

/// Project the four leads' turn-1 actions in execution order: priority
/// brackets first, Speed inside a bracket, Trick Room aware.
pub fn turn1_priority_order(
    your_leads: &[&PokemonProfile],
    their_leads: &[&PokemonProfile],
    trick_room: bool,
) -> Vec<Turn1Action> {
    let mut actions: Vec<Turn1Action> = Vec::new();

    for (side, leads) in [(Side::Yours, your_leads), (Side::Theirs, their_leads)] {
        for profile in leads {
            if let Some((move_name, priority)) = best_turn1_move(profile) {
                actions.push(Turn1Action {
                    pokemon: profile.name().to_string(),
                    side,
                    move_name,
                    priority,
                    speed: profile.final_stats.speed,
                });
            }
        }
    }

    actions.sort_by(|a, b| {
        b.priority.cmp(&a.priority).then_with(|| {
            if trick_room {
                a.speed.cmp(&b.speed)
            } else {
                b.speed.cmp(&a.speed)
            }
        })
    });
    actions
}

/// Overall win condition derived from the matrix aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinCondition {
    OffensivePressure,
    DefensivePivoting,
    BalancedPlay,
}

impl WinCondition {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OffensivePressure => "Offensive pressure",
            Self::DefensivePivoting => "Defensive pivoting",
            Self::BalancedPlay => "Balanced play",
        }
    }
}

pub fn determine_win_condition(matrix: &MatchupMatrix) -> (WinCondition, Vec<String>) {
    let average = matrix.average();
    let (condition, detail) = if average > 15.0 {
        (
            WinCondition::OffensivePressure,
            vec![
                format!("Matrix average {:+.0}: your attackers out-trade theirs", average),
                "Lead aggressively and force early KOs".to_string(),
            ],
        )
    } else if average < -15.0 {
        (
            WinCondition::DefensivePivoting,
            vec![
                format!("Matrix average {:+.0}: they hit harder on paper", average),
                "Pivot around their threats and win the long game with chip damage".to_string(),
            ],
        )
    } else {
        (
            WinCondition::BalancedPlay,
            vec![
                format!("Matrix average {:+.0}: the matchup is close", average),
                "Play positioning-first and take favourable trades as they appear".to_string(),
            ],
        )
    };
    (condition, detail)
}

/// Which four of your six to bring, ranked by matrix row sum.
#[derive(Debug, Clone)]
pub struct BringRecommendation {
    pub bring: Vec<String>,
    pub leave_behind: Vec<String>,
}

pub fn recommend_bring_four(yours: &[PokemonProfile], matrix: &MatchupMatrix) -> BringRecommendation {
    let mut ranked: Vec<(usize, i32)> = (0..yours.len()).map(|i| (i, matrix.row_sum(i))).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let bring: Vec<String> = ranked.iter().take(4).map(|(i, _)| yours[*i].name().to_string()).collect();
    let leave_behind: Vec<String> = ranked.iter().skip(4).map(|(i, _)| yours[*i].name().to_string()).collect();
    BringRecommendation { bring, leave_behind }
}

/// Notes on the Fake Out mirror: who gets theirs off first.
pub fn analyze_fake_out_war(yours: &[PokemonProfile], theirs: &[PokemonProfile]) -> Vec<String> {
    let mut notes = Vec::new();
    let your_users: Vec<&PokemonProfile> = yours.iter().filter(|p| p.has_fake_out).collect();
    let their_users: Vec<&PokemonProfile> = theirs.iter().filter(|p| p.has_fake_out).collect();

    for mine in &your_users {
        if their_users.is_empty() {
            notes.push(format!("{} has uncontested Fake Out", mine.name()));
            continue;
        }
        for opposing in &their_users {
            if mine.final_stats.speed > opposing.final_stats.speed {
                notes.push(format!(
                    "{} gets Fake Out off FIRST against {} ({} vs {})",
                    mine.name(), opposing.name(), mine.final_stats.speed, opposing.final_stats.speed,
                ));
            } else if mine.final_stats.speed < opposing.final_stats.speed {
                notes.push(format!(
                    "{} Fake Outs FIRST against your {} ({} vs {})",
                    opposing.name(), mine.name(), opposing.final_stats.speed, mine.final_stats.speed,
                ));
            } else {
                notes.push(format!(
                    "Fake Out speed tie between {} and {} ({})",
                    mine.name(), opposing.name(), mine.final_stats.speed,
                ));
            }
        }
    }
    if your_users.is_empty() {
        for opposing in &their_users {
            notes.push(format!("{} has uncontested Fake Out", opposing.name()));
        }
    }
    notes
}

/// Notes on opposing Prankster users, including which of your Pokemon
/// blank their boosted moves outright (Dark types).
pub fn analyze_prankster_interactions(
    yours: &[PokemonProfile],
    theirs: &[PokemonProfile],
) -> Vec<String> {
    let mut notes = Vec::new();
    for opposing in theirs.iter().filter(|p| p.is_prankster && !p.prankster_moves.is_empty()) {
        notes.push(format!(
            "{} has Prankster priority on: {}",
            opposing.name(),
            opposing.prankster_moves.join(", "),
        ));
        for mine in yours {
            if mine.build.types.contains(&PokemonType::Dark) {
                notes.push(format!(
                    "{} is IMMUNE to Prankster-boosted moves (Dark-type)",
                    mine.name(),
                ));
            }
        }
    }
    notes
}

/// The assembled game plan.
#[derive(Debug, Clone)]
pub struct GamePlan {
    pub matrix: MatchupMatrix,
    pub lead_recommendations: Vec<LeadRecommendation>,
    pub turn_1_priority_order: Vec<Turn1Action>,
    pub threat_assessment: Vec<ThreatAssessment>,
    pub win_condition: WinCondition,
    pub win_condition_detail: Vec<String>,
    pub bring_recommendation: BringRecommendation,
    /// "Favorable", "Even" or "Unfavorable".
    pub overall_matchup: &'static str,
    pub fake_out_notes: Vec<String>,
    pub prankster_notes: Vec<String>,
    pub markdown_summary: String,
}

/// Generate the full priority-aware game plan for your team against
/// theirs.
pub fn generate_game_plan(yours: &[PokemonProfile], theirs: &[PokemonProfile]) -> GamePlan {
    let matrix = build_matchup_matrix(yours, theirs);
    let lead_recommendations = recommend_leads(yours, theirs, &matrix);
    let threat_assessment = rank_threats(yours, theirs, &matrix);
    let (win_condition, win_condition_detail) = determine_win_condition(&matrix);
    let bring_recommendation = recommend_bring_four(yours, &matrix);
    let fake_out_notes = analyze_fake_out_war(yours, theirs);
    let prankster_notes = analyze_prankster_interactions(yours, theirs);

    // Turn 1: your best lead pair against the predicted opposing leads.
    let your_leads: Vec<&PokemonProfile> = match lead_recommendations.first() {
        Some(lead) => yours
            .iter()
            .filter(|p| p.name() == lead.pokemon_1 || p.name() == lead.pokemon_2)
            .collect(),
        None => yours.iter().take(2).collect(),
    };
    let predicted = predict_opponent_leads(theirs);
    let their_leads: Vec<&PokemonProfile> = predicted.iter().map(|&i| &theirs[i]).collect();
    let trick_room_expected = their_leads.iter().any(|p| p.is_trick_room_setter);
    let turn_1_priority_order = turn1_priority_order(&your_leads, &their_leads, false);

    let average = matrix.average();
    let overall_matchup = if average > 10.0 {
        "Favorable"
    } else if average < -10.0 {
        "Unfavorable"
    } else {
        "Even"
    };

    let markdown_summary = render_markdown(
        &matrix,
        &lead_recommendations,
        &turn_1_priority_order,
        &threat_assessment,
        win_condition,
        &win_condition_detail,
        &bring_recommendation,
        overall_matchup,
        &fake_out_notes,
        &prankster_notes,
        trick_room_expected,
    );

    GamePlan {
        matrix,
        lead_recommendations,
        turn_1_priority_order,
        threat_assessment,
        win_condition,
        win_condition_detail,
        bring_recommendation,
        overall_matchup,
        fake_out_notes,
        prankster_notes,
        markdown_summary,
    }
}

#[allow(clippy::too_many_arguments)]
fn render_markdown(
    matrix: &MatchupMatrix,
    leads: &[LeadRecommendation],
    turn1: &[Turn1Action],
    threats: &[ThreatAssessment],
    win_condition: WinCondition,
    win_detail: &[String],
    bring: &BringRecommendation,
    overall: &str,
    fake_out_notes: &[String],
    prankster_notes: &[String],
    trick_room_expected: bool,
) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Game Plan ({} matchup)\n\n", overall));

    md.push_str("## Matchup Matrix\n\n");
    md.push_str(&format!("| | {} |\n", matrix.col_names.join(" | ")));
    md.push_str(&format!("|---|{}|\n", "---|".repeat(matrix.col_names.len())));
    for (row, name) in matrix.row_names.iter().enumerate() {
        let cells: Vec<String> = matrix.scores[row].iter().map(|s| format!("{:+}", s)).collect();
        md.push_str(&format!("| {} | {} |\n", name, cells.join(" | ")));
    }

    md.push_str("\n## Threat Assessment\n\n");
    for threat in threats {
        md.push_str(&format!(
            "- **{}** [{}]: outspeeds {}, removes {}\n",
            threat.name,
            threat.threat_level.label(),
            threat.outspeeds,
            threat.koed,
        ));
    }

    md.push_str("\n## Recommended Leads\n\n");
    for lead in leads {
        md.push_str(&format!(
            "- {} + {} (score {:+}): {}\n",
            lead.pokemon_1, lead.pokemon_2, lead.score, lead.reasoning,
        ));
    }

    md.push_str("\n## Turn 1 Priority Order\n\n");
    if trick_room_expected {
        md.push_str("_Expect Trick Room: the order below inverts once it is up._\n\n");
    }
    for (i, action) in turn1.iter().enumerate() {
        let side = match action.side {
            Side::Yours => "you",
            Side::Theirs => "them",
        };
        md.push_str(&format!(
            "{}. {} ({}): {} ({:+} priority, {} Speed)\n",
            i + 1,
            action.pokemon,
            side,
            action.move_name,
            action.priority,
            action.speed,
        ));
    }

    if !fake_out_notes.is_empty() || !prankster_notes.is_empty() {
        md.push_str("\n## Priority Interactions\n\n");
        for note in fake_out_notes.iter().chain(prankster_notes) {
            md.push_str(&format!("- {}\n", note));
        }
    }

    md.push_str(&format!("\n## Win Condition: {}\n\n", win_condition.label()));
    for line in win_detail {
        md.push_str(&format!("- {}\n", line));
    }

    md.push_str("\n## Bring 4\n\n");
    md.push_str(&format!("Bring: {}\n", bring.bring.join(", ")));
    if !bring.leave_behind.is_empty() {
        md.push_str(&format!("Leave behind: {}\n", bring.leave_behind.join(", ")));
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::BaseStats;

    fn make_build(name: &str, types: Vec<PokemonType>, base: BaseStats) -> PokemonBuild {
        PokemonBuild::new(name, base, types)
    }

    fn stats(atk: u8, spa: u8, spe: u8) -> BaseStats {
        BaseStats { hp: 80, attack: atk, defense: 80, special_attack: spa, special_defense: 80, speed: spe }
    }

    fn incineroar() -> PokemonProfile {
        build_profile(
            &make_build("incineroar", vec![PokemonType::Fire, PokemonType::Dark], stats(115, 80, 60)),
            &[
                MoveData::damaging("fake-out", PokemonType::Normal, MoveCategory::Physical, 40),
                MoveData::damaging("flare-blitz", PokemonType::Fire, MoveCategory::Physical, 120),
            ],
            "intimidate",
        )
    }

    fn tornadus() -> PokemonProfile {
        build_profile(
            &make_build("tornadus", vec![PokemonType::Flying], stats(115, 125, 111)),
            &[
                MoveData::status("tailwind", PokemonType::Flying),
                MoveData::damaging("hurricane", PokemonType::Flying, MoveCategory::Special, 110),
            ],
            "prankster",
        )
    }

    fn kingambit() -> PokemonProfile {
        build_profile(
            &make_build("kingambit", vec![PokemonType::Dark, PokemonType::Steel], stats(135, 60, 50)),
            &[MoveData::damaging("sucker-punch", PokemonType::Dark, MoveCategory::Physical, 70)],
            "supreme-overlord",
        )
    }

    fn flutter_mane() -> PokemonProfile {
        build_profile(
            &make_build("flutter-mane", vec![PokemonType::Ghost, PokemonType::Fairy], stats(55, 135, 135)),
            &[MoveData::damaging("moonblast", PokemonType::Fairy, MoveCategory::Special, 95)],
            "protosynthesis",
        )
    }

    fn rillaboom() -> PokemonProfile {
        build_profile(
            &make_build("rillaboom", vec![PokemonType::Grass], stats(125, 60, 85)),
            &[
                MoveData::damaging("wood-hammer", PokemonType::Grass, MoveCategory::Physical, 120),
                MoveData::damaging("fake-out", PokemonType::Normal, MoveCategory::Physical, 40),
            ],
            "grassy-surge",
        )
    }

    #[test]
    fn test_fake_out_detected_from_moves_not_ability() {
        let profile = incineroar();
        assert!(profile.has_fake_out);
        assert!(profile.is_intimidate);

        // Tornadus has no Fake Out even with an ability set.
        assert!(!tornadus().has_fake_out);
    }

    #[test]
    fn test_prankster_moves_are_status_only() {
        let profile = tornadus();
        assert!(profile.is_prankster);
        assert!(profile.prankster_moves.contains(&"tailwind".to_string()));
        assert!(!profile.prankster_moves.contains(&"hurricane".to_string()));
    }

    #[test]
    fn test_setter_detection_and_roles() {
        let torn = tornadus();
        assert!(torn.is_tailwind_setter);
        assert!(!torn.is_trick_room_setter);
        assert_eq!(torn.role, ProfileRole::SpeedControl);

        let trick_room = build_profile(
            &make_build("porygon2", vec![PokemonType::Normal], stats(80, 105, 60)),
            &[MoveData::status("trick-room", PokemonType::Psychic)],
            "download",
        );
        assert!(trick_room.is_trick_room_setter);
        assert_eq!(trick_room.role, ProfileRole::SpeedControl);

        assert_eq!(flutter_mane().role, ProfileRole::Sweeper);
    }

    #[test]
    fn test_priority_moves_tracked() {
        let rilla = rillaboom();
        let fake_out = rilla.priority_moves.iter().find(|(n, _)| n == "fake-out");
        assert_eq!(fake_out, Some(&("fake-out".to_string(), 3)));
    }

    #[test]
    fn test_matrix_shape_and_bounds() {
        let yours = vec![incineroar(), tornadus()];
        let theirs = vec![flutter_mane(), rillaboom(), kingambit()];
        let matrix = build_matchup_matrix(&yours, &theirs);
        assert_eq!(matrix.scores.len(), 2);
        assert_eq!(matrix.scores[0].len(), 3);
        for row in &matrix.scores {
            for &cell in row {
                assert!((-100..=100).contains(&cell));
            }
        }
    }

    #[test]
    fn test_lead_prediction_prefers_fake_out_over_speed() {
        let theirs = vec![flutter_mane(), incineroar(), tornadus()];
        let predicted = predict_opponent_leads(&theirs);
        // Incineroar (Fake Out + Intimidate = 170) and Tornadus
        // (Prankster Tailwind = 135ish) both outrank the fast sweeper.
        assert!(predicted.contains(&1), "Fake Out user predicted: {predicted:?}");
        assert!(predicted.contains(&2), "Prankster Tailwind predicted: {predicted:?}");
    }

    #[test]
    fn test_fake_out_plus_speed_control_leads() {
        let yours = vec![incineroar(), tornadus(), flutter_mane(), kingambit()];
        let theirs = vec![rillaboom(), flutter_mane()];
        let matrix = build_matchup_matrix(&yours, &theirs);
        let leads = recommend_leads(&yours, &theirs, &matrix);
        let top_pairs: Vec<[&str; 2]> = leads
            .iter()
            .map(|l| [l.pokemon_1.as_str(), l.pokemon_2.as_str()])
            .collect();
        assert!(
            top_pairs.iter().any(|p| p.contains(&"incineroar") && p.contains(&"tornadus")),
            "Fake Out + Prankster Tailwind should be a top pair, got {top_pairs:?}",
        );
    }

    #[test]
    fn test_turn1_order_brackets() {
        let yours = vec![incineroar(), tornadus()];
        let theirs = vec![flutter_mane(), rillaboom()];
        let your_refs: Vec<&PokemonProfile> = yours.iter().collect();
        let their_refs: Vec<&PokemonProfile> = theirs.iter().collect();
        let order = turn1_priority_order(&your_refs, &their_refs, false);

        let fake_out_idx = order.iter().position(|a| a.move_name == "fake-out" && a.side == Side::Yours).unwrap();
        let tailwind_idx = order.iter().position(|a| a.move_name == "tailwind").unwrap();
        assert!(fake_out_idx < tailwind_idx, "Fake Out (+3) before Prankster Tailwind (+1)");

        if let Some(normal_idx) = order.iter().position(|a| a.priority == 0) {
            assert!(tailwind_idx < normal_idx, "Tailwind (+1) before bracket-0 moves");
        }
    }

    #[test]
    fn test_dark_type_blocks_prankster_noted() {
        let yours = vec![kingambit()];
        let theirs = vec![tornadus()];
        let notes = analyze_prankster_interactions(&yours, &theirs);
        assert!(notes.iter().any(|n| n.contains("Prankster") && n.contains("tornadus")));
        assert!(notes.iter().any(|n| n.contains("IMMUNE") && n.contains("kingambit")));

        // No Dark type, no immunity note.
        let notes = analyze_prankster_interactions(&[flutter_mane()], &theirs);
        assert!(notes.iter().any(|n| n.contains("Prankster")));
        assert!(!notes.iter().any(|n| n.contains("IMMUNE")));
    }

    #[test]
    fn test_fake_out_war() {
        let fast_rilla = rillaboom();
        let slow_incin = incineroar();
        let notes = analyze_fake_out_war(&[fast_rilla], &[slow_incin]);
        assert!(notes.iter().any(|n| n.contains("rillaboom") && n.contains("FIRST")));

        // Neither side: no notes.
        let notes = analyze_fake_out_war(&[flutter_mane()], &[kingambit()]);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_full_game_plan_sections() {
        let yours = vec![incineroar(), tornadus(), flutter_mane(), kingambit()];
        let theirs = vec![rillaboom(), flutter_mane(), kingambit()];
        let plan = generate_game_plan(&yours, &theirs);

        assert!(!plan.lead_recommendations.is_empty());
        assert!(plan.turn_1_priority_order.len() >= 2);
        assert_eq!(plan.threat_assessment.len(), 3);
        assert!(!plan.win_condition_detail.is_empty());
        assert!(plan.bring_recommendation.bring.len() >= 2);
        assert!(["Favorable", "Even", "Unfavorable"].contains(&plan.overall_matchup));
        assert!(plan.markdown_summary.contains("Turn 1 Priority Order"));
        assert!(plan.markdown_summary.contains("Matchup Matrix"));
    }

    #[test]
    fn test_small_team_brings_everyone() {
        let yours = vec![incineroar(), tornadus(), kingambit()];
        let theirs = vec![rillaboom(), flutter_mane()];
        let plan = generate_game_plan(&yours, &theirs);
        assert_eq!(plan.bring_recommendation.bring.len(), 3);
        assert!(plan.bring_recommendation.leave_behind.is_empty());
    }

    #[test]
    fn test_no_moves_profile_is_harmless() {
        let bare = build_profile(
            &make_build("ditto", vec![PokemonType::Normal], stats(48, 48, 48)),
            &[],
            "imposter",
        );
        assert!(!bare.has_fake_out);
        assert!(bare.priority_moves.is_empty());
        assert!(best_turn1_move(&bare).is_none());

        let plan = generate_game_plan(&[bare.clone()], &[bare]);
        assert_eq!(plan.threat_assessment.len(), 1);
    }

    #[test]
    fn test_threat_ranking() {
        let yours = vec![incineroar(), rillaboom()];
        let theirs = vec![flutter_mane()];
        let matrix = build_matchup_matrix(&yours, &theirs);
        let threats = rank_threats(&yours, &theirs, &matrix);
        assert_eq!(threats.len(), 1);
        assert!(matches!(
            threats[0].threat_level,
            ThreatLevel::Critical | ThreatLevel::High | ThreatLevel::Medium,
        ));
    }
}
