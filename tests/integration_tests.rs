//! Integration tests for the swiss-arena tournament simulator
//!
//! These tests validate the entire system working together, including:
//! - Complete tournament runs over generated and supplied strengths
//! - Structural invariants of every round's pairing
//! - Seed-based reproducibility and re-run semantics
//! - Ranking evaluation and multi-trial simulation

use std::collections::HashSet;

use swiss_arena::config::{AppConfig, TournamentSettings};
use swiss_arena::metrics::RankingEvaluator;
use swiss_arena::simulation::Simulation;
use swiss_arena::strength::StrengthDistribution;
use swiss_arena::types::MatchRecord;
use swiss_arena::Tournament;

fn settings(n_teams: usize, n_rounds: u32, seed: u64) -> TournamentSettings {
    TournamentSettings {
        n_teams,
        n_rounds,
        seed: Some(seed),
        top_k: (n_teams / 2).max(1),
        ..TournamentSettings::default()
    }
}

/// Group match records by round, preserving record order
fn rounds_of(matches: &[MatchRecord], n_rounds: u32) -> Vec<Vec<&MatchRecord>> {
    (0..n_rounds)
        .map(|round| matches.iter().filter(|m| m.round == round).collect())
        .collect()
}

#[test]
fn test_complete_tournament_run() {
    let mut tournament = Tournament::new(settings(16, 4, 42)).unwrap();
    let result = tournament.run().unwrap();

    // One row per competitor, positive strengths
    let table = result.table();
    assert_eq!(table.len(), 16);
    assert!(table.strengths().iter().all(|&s| s > 0.0 && s.is_finite()));

    // Each round awards one win per match, so totals are fixed
    assert_eq!(table.total_wins(), 4 * (16 / 2));
    assert_eq!(result.matches().len(), 4 * (16 / 2) as usize);
    assert!(table.wins().iter().all(|&w| w <= 4));
}

#[test]
fn test_every_round_is_a_perfect_matching() {
    let mut tournament = Tournament::new(settings(12, 5, 7)).unwrap();
    let result = tournament.run().unwrap();

    for round in rounds_of(result.matches(), 5) {
        assert_eq!(round.len(), 6);
        let mut seen = HashSet::new();
        for record in round {
            assert!(record.home < 12 && record.away < 12);
            assert_ne!(record.home, record.away);
            assert!(seen.insert(record.home), "competitor paired twice in a round");
            assert!(seen.insert(record.away), "competitor paired twice in a round");
            assert!(record.winner == record.home || record.winner == record.away);
        }
        assert_eq!(seen.len(), 12);
    }
}

#[test]
fn test_no_pair_ever_meets_twice() {
    // 12 teams over 6 rounds: the unplayed graph keeps minimum degree
    // n/2 through the last round, so a rematch-free schedule always exists
    let mut tournament = Tournament::new(settings(12, 6, 123)).unwrap();
    let result = tournament.run().unwrap();

    let mut met = HashSet::new();
    for record in result.matches() {
        assert!(
            met.insert(record.pair()),
            "rematch between {} and {}",
            record.home,
            record.away
        );
    }
}

#[test]
fn test_same_seed_reproduces_everything() {
    let mut first = Tournament::new(settings(16, 4, 2024)).unwrap();
    let mut second = Tournament::new(settings(16, 4, 2024)).unwrap();

    let result_a = first.run().unwrap();
    let result_b = second.run().unwrap();

    assert_eq!(result_a.table().strengths(), result_b.table().strengths());
    assert_eq!(result_a.table().wins(), result_b.table().wins());
    assert_eq!(result_a.matches(), result_b.matches());
}

#[test]
fn test_different_seeds_diverge() {
    let mut first = Tournament::new(settings(16, 4, 1)).unwrap();
    let mut second = Tournament::new(settings(16, 4, 2)).unwrap();

    let result_a = first.run().unwrap();
    let result_b = second.run().unwrap();
    assert_ne!(result_a.table().strengths(), result_b.table().strengths());
}

#[test]
fn test_rerun_keeps_field_but_varies_outcomes() {
    let mut tournament = Tournament::new(settings(16, 4, 555)).unwrap();
    let first = tournament.run().unwrap();
    let second = tournament.run().unwrap();

    // Same field and same opening pairing, fresh outcome stream
    assert_eq!(first.table().strengths(), second.table().strengths());
    let opening_a: Vec<_> = first
        .matches()
        .iter()
        .filter(|m| m.round == 0)
        .map(|m| m.pair())
        .collect();
    let opening_b: Vec<_> = second
        .matches()
        .iter()
        .filter(|m| m.round == 0)
        .map(|m| m.pair())
        .collect();
    assert_eq!(opening_a, opening_b);
}

#[test]
fn test_dominant_competitor_goes_undefeated() {
    let mut strengths = vec![1.0; 16];
    strengths[3] = 1e12;
    let config = TournamentSettings {
        strengths: Some(strengths),
        ..settings(16, 4, 9)
    };

    let mut tournament = Tournament::new(config).unwrap();
    let result = tournament.run().unwrap();
    assert_eq!(result.table().rows()[3].wins, 4);
}

#[test]
fn test_minimal_tournament() {
    // Four competitors, one round: exactly two matches, two winners
    let mut tournament = Tournament::new(settings(4, 1, 3)).unwrap();
    let result = tournament.run().unwrap();

    assert_eq!(result.matches().len(), 2);
    assert_eq!(result.table().total_wins(), 2);
    assert_eq!(result.table().wins().iter().filter(|&&w| w == 1).count(), 2);
}

#[test]
fn test_odd_field_is_rejected() {
    assert!(Tournament::new(settings(7, 3, 1)).is_err());
    assert!(Tournament::new(settings(0, 3, 1)).is_err());
}

#[test]
fn test_equal_strengths_center_correlations_near_zero() {
    // With an even field every ranking outcome is luck; the mean tau over
    // many seeds should hover around zero
    let mut taus = Vec::new();
    for seed in 0..40 {
        let config = TournamentSettings {
            strengths: Some(vec![1.0; 8]),
            ..settings(8, 3, seed)
        };
        let mut tournament = Tournament::new(config).unwrap();
        let result = tournament.run().unwrap();
        let summary = RankingEvaluator::new(3, 4).evaluate(result.table()).unwrap();
        if summary.tau.is_finite() {
            taus.push(summary.tau);
        }
    }
    assert!(!taus.is_empty());
    let mean = taus.iter().sum::<f64>() / taus.len() as f64;
    assert!(mean.abs() < 0.25, "mean tau {mean} too far from zero");
}

#[test]
fn test_strong_field_recovers_ranking() {
    // Widely separated strengths: the win ranking should agree with the
    // strength ranking far more often than chance
    let config = TournamentSettings {
        strengths: Some((1..=16).map(|i| (i as f64).exp()).collect()),
        ..settings(16, 8, 77)
    };
    let mut tournament = Tournament::new(config).unwrap();
    let result = tournament.run().unwrap();
    let summary = RankingEvaluator::new(8, 8).evaluate(result.table()).unwrap();

    assert!(summary.tau > 0.5, "tau {} unexpectedly low", summary.tau);
    assert!(summary.ndcg > 0.8, "ndcg {} unexpectedly low", summary.ndcg);
}

#[test]
fn test_each_distribution_produces_valid_fields() {
    let distributions = [
        StrengthDistribution::Exponential { scale: 1.0 },
        StrengthDistribution::Uniform { low: 0.0, high: 1.0 },
        StrengthDistribution::Lognormal { mu: 0.0, sigma: 1.0 },
        StrengthDistribution::Beta { shape1: 2.0, shape2: 5.0 },
        StrengthDistribution::Gamma { shape: 2.0, scale: 1.0 },
    ];
    for distribution in distributions {
        let config = TournamentSettings {
            distribution,
            ..settings(8, 3, 11)
        };
        let mut tournament = Tournament::new(config).unwrap();
        let result = tournament.run().unwrap();
        assert!(result
            .table()
            .strengths()
            .iter()
            .all(|&s| s > 0.0 && s.is_finite()));
    }
}

#[test]
fn test_simulation_end_to_end() {
    let mut config = AppConfig::default();
    config.tournament = settings(8, 3, 31);
    config.tournament.top_k = 4;
    config.simulation.trials = 25;

    let mut simulation = Simulation::new(&config).unwrap();
    let report = simulation.run().unwrap();

    assert_eq!(report.summaries.len(), 25);
    let aggregate = &report.aggregate;
    assert!((0.0..=1.0).contains(&aggregate.undefeated_champion_rate));
    assert!((0.0..=1.0).contains(&aggregate.ndcg));
    assert!(aggregate.defined_correlations <= 25);
}
