//! Common types used throughout the tournament simulator

use serde::{Deserialize, Serialize};

/// Index identifying a competitor within a tournament (`0..n_teams`)
pub type TeamId = usize;

/// Record of a single resolved match, append-only history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Round the match occurred in (`0..n_rounds`)
    pub round: u32,
    /// Lower-indexed competitor of the pair
    pub home: TeamId,
    /// Higher-indexed competitor of the pair
    pub away: TeamId,
    /// Competitor that won the match (either `home` or `away`)
    pub winner: TeamId,
}

impl MatchRecord {
    /// The unordered pair as a normalized `(low, high)` tuple
    pub fn pair(&self) -> (TeamId, TeamId) {
        (self.home.min(self.away), self.home.max(self.away))
    }
}

/// One row of the final result table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub strength: f64,
    pub wins: u32,
}

/// Final per-competitor results of one tournament run
///
/// Row order is competitor index order. The table is only produced by a
/// completed run; a failed run yields no table at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Strength column in competitor index order
    pub fn strengths(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.strength).collect()
    }

    /// Wins column in competitor index order
    pub fn wins(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.wins).collect()
    }

    /// Total number of wins across all competitors
    pub fn total_wins(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.wins)).sum()
    }
}

/// Ranking-quality summary for one completed tournament run
///
/// All fields are deterministic functions of the final result table.
/// Correlation coefficients and their p-values are NaN when the metric is
/// undefined (for example when every competitor finished with the same
/// win count).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingSummary {
    /// True iff the highest-strength competitor won every round
    pub undefeated_champion: bool,
    /// True iff the highest-strength competitor holds the best win rank (ties allowed)
    pub top_ranked_champion: bool,
    /// Fraction of the strength top-k finishing with a near-perfect record
    pub top_k_recovery: f64,
    /// R-precision of the win-ranked ordering against the strength top-k
    pub precision: f64,
    /// Precision at k
    pub precision_at_k: f64,
    /// Average precision
    pub avg_precision: f64,
    /// Discounted cumulative gain at k (binary gains)
    pub dcg: f64,
    /// Normalized discounted cumulative gain at k
    pub ndcg: f64,
    /// Kendall rank correlation between strength rank and win rank
    pub tau: f64,
    /// Two-sided p-value for tau under the null of no association
    pub tau_p_value: f64,
    /// Spearman rank correlation between strength rank and win rank
    pub rho: f64,
    /// Two-sided p-value for rho under the null of no association
    pub rho_p_value: f64,
}
