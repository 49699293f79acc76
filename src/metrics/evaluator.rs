//! Ranking evaluation over a completed result table
//!
//! Ranks competitors by true strength and by earned wins, then scores how
//! well the win ordering recovered the strength ordering. Everything here
//! is a deterministic function of the final result table.

use crate::error::{Result, TournamentError};
use crate::metrics::correlation::{kendall_tau, spearman_rho};
use crate::metrics::retrieval::{
    average_precision, dcg_at_k, ndcg_at_k, precision_at_k, r_precision,
};
use crate::types::{RankingSummary, ResultTable};
use crate::utils::{descending_average_ranks, descending_index_ranks};

/// Evaluator configured for a tournament's round count and top-k size
#[derive(Debug, Clone, Copy)]
pub struct RankingEvaluator {
    n_rounds: u32,
    top_k: usize,
}

impl RankingEvaluator {
    pub fn new(n_rounds: u32, top_k: usize) -> Self {
        Self { n_rounds, top_k }
    }

    /// Compute the full ranking summary for one completed run
    pub fn evaluate(&self, table: &ResultTable) -> Result<RankingSummary> {
        let n = table.len();
        if n == 0 {
            return Err(TournamentError::EvaluationFailed {
                reason: "empty result table".to_string(),
            }
            .into());
        }
        if self.top_k == 0 || self.top_k > n {
            return Err(TournamentError::EvaluationFailed {
                reason: format!("top_k {} out of range for {} competitors", self.top_k, n),
            }
            .into());
        }

        let strengths = table.strengths();
        let wins = table.wins();
        let win_values: Vec<f64> = wins.iter().map(|&w| f64::from(w)).collect();

        // Rank 1 = best. Strength ranks are total (index tie-break);
        // win ranks are fractional to treat tied records evenly.
        let strength_rank = descending_index_ranks(&strengths);
        let win_rank = descending_average_ranks(&win_values);

        // Single highest-strength competitor, first index on exact ties
        let champion = strengths
            .iter()
            .enumerate()
            .max_by(|(i, a), (j, b)| {
                a.partial_cmp(b)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(j.cmp(i))
            })
            .map(|(i, _)| i)
            .unwrap_or(0);

        let undefeated_champion = wins[champion] == self.n_rounds;

        let best_win_rank = win_rank
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let top_ranked_champion = win_rank[champion] == best_win_rank;

        let relevant: Vec<bool> = strength_rank
            .iter()
            .map(|&r| r <= self.top_k as f64)
            .collect();

        // Near-perfect record recovery among the strength top-k
        let near_perfect_floor = self.n_rounds.saturating_sub(2);
        let recovered = (0..n)
            .filter(|&i| relevant[i] && wins[i] >= near_perfect_floor)
            .count();
        let top_k_recovery = recovered as f64 / self.top_k as f64;

        // Relevance vector ordered by the win ranking, best first, with
        // index order inside tied win counts
        let mut by_win_rank: Vec<usize> = (0..n).collect();
        by_win_rank.sort_by(|&a, &b| {
            win_rank[a]
                .partial_cmp(&win_rank[b])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        let ordered_relevance: Vec<bool> = by_win_rank.iter().map(|&i| relevant[i]).collect();

        let (tau, tau_p_value) = kendall_tau(&strength_rank, &win_rank);
        let (rho, rho_p_value) = spearman_rho(&strength_rank, &win_rank);

        Ok(RankingSummary {
            undefeated_champion,
            top_ranked_champion,
            top_k_recovery,
            precision: r_precision(&ordered_relevance),
            precision_at_k: precision_at_k(&ordered_relevance, self.top_k),
            avg_precision: average_precision(&ordered_relevance),
            dcg: dcg_at_k(&ordered_relevance, self.top_k),
            ndcg: ndcg_at_k(&ordered_relevance, self.top_k),
            tau,
            tau_p_value,
            rho,
            rho_p_value,
        })
    }
}
