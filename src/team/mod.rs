//! # Team-Level Analysis
//!
//! The matchup engine (matrix, threats, leads, game plans) and team
//! composition analysis (coverage, speed tiers, roles).

pub mod analysis;
pub mod matchup;

pub use analysis::{
    analyze_defensive_coverage, analyze_offensive_coverage, analyze_roles, DefensiveCoverage,
    OffensiveCoverage, RoleBreakdown,
};
pub use matchup::{
    analyze_fake_out_war, analyze_prankster_interactions, build_matchup_matrix, build_profile,
    generate_game_plan, predict_opponent_leads, rank_threats, recommend_bring_four,
    recommend_leads, turn1_priority_order, BringRecommendation, GamePlan, LeadRecommendation,
    MatchupMatrix, PokemonProfile, ProfileRole, ThreatAssessment, ThreatLevel, Turn1Action,
    WinCondition,
};
