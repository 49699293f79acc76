//! Multi-trial tournament simulation
//!
//! Re-runs a single tournament configuration many times and aggregates the
//! per-run ranking summaries. The field (strength vector) is tournament
//! identity and stays fixed across trials; only the stochastic match
//! outcomes vary, which is exactly what makes the aggregate a measure of
//! the format rather than of one lucky draw.

use crate::config::AppConfig;
use crate::engine::Tournament;
use crate::error::Result;
use crate::metrics::RankingEvaluator;
use crate::types::{RankingSummary, ResultTable};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Mean of every summary metric across trials
///
/// Boolean metrics aggregate to rates in [0, 1]. Correlation means skip
/// trials where the coefficient was undefined; `defined_correlations`
/// records how many contributed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub trials: usize,
    pub undefeated_champion_rate: f64,
    pub top_ranked_champion_rate: f64,
    pub top_k_recovery: f64,
    pub precision: f64,
    pub precision_at_k: f64,
    pub avg_precision: f64,
    pub dcg: f64,
    pub ndcg: f64,
    pub tau: f64,
    pub rho: f64,
    pub defined_correlations: usize,
}

/// Everything produced by one simulation: per-trial tables and summaries
/// plus their aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub tables: Vec<ResultTable>,
    pub summaries: Vec<RankingSummary>,
    pub aggregate: AggregateSummary,
}

/// Repeated-run simulation of one tournament configuration
#[derive(Debug)]
pub struct Simulation {
    tournament: Tournament,
    evaluator: RankingEvaluator,
    trials: usize,
}

impl Simulation {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let tournament = Tournament::new(config.tournament.clone())?;
        let evaluator =
            RankingEvaluator::new(config.tournament.n_rounds, config.tournament.top_k);
        Ok(Self {
            tournament,
            evaluator,
            trials: config.simulation.trials,
        })
    }

    /// The tournament being simulated
    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    /// Run all trials and aggregate
    pub fn run(&mut self) -> Result<SimulationReport> {
        let mut tables = Vec::with_capacity(self.trials);
        let mut summaries = Vec::with_capacity(self.trials);

        info!(
            trials = self.trials,
            seed = self.tournament.seed(),
            "starting simulation"
        );
        for trial in 0..self.trials {
            let result = self.tournament.run()?;
            let summary = self.evaluator.evaluate(result.table())?;
            if (trial + 1) % 100 == 0 {
                info!(completed = trial + 1, "simulation progress");
            }
            tables.push(result.table().clone());
            summaries.push(summary);
        }

        let aggregate = aggregate_summaries(&summaries);
        Ok(SimulationReport {
            tables,
            summaries,
            aggregate,
        })
    }
}

/// Aggregate per-trial summaries into means and rates
pub fn aggregate_summaries(summaries: &[RankingSummary]) -> AggregateSummary {
    let trials = summaries.len();
    let nf = trials.max(1) as f64;
    let rate = |f: &dyn Fn(&RankingSummary) -> bool| -> f64 {
        summaries.iter().filter(|s| f(s)).count() as f64 / nf
    };
    let mean = |f: &dyn Fn(&RankingSummary) -> f64| -> f64 {
        summaries.iter().map(|s| f(s)).sum::<f64>() / nf
    };

    let defined: Vec<&RankingSummary> = summaries
        .iter()
        .filter(|s| s.tau.is_finite() && s.rho.is_finite())
        .collect();
    let correlation_mean = |f: &dyn Fn(&RankingSummary) -> f64| -> f64 {
        if defined.is_empty() {
            f64::NAN
        } else {
            defined.iter().map(|s| f(s)).sum::<f64>() / defined.len() as f64
        }
    };

    AggregateSummary {
        trials,
        undefeated_champion_rate: rate(&|s| s.undefeated_champion),
        top_ranked_champion_rate: rate(&|s| s.top_ranked_champion),
        top_k_recovery: mean(&|s| s.top_k_recovery),
        precision: mean(&|s| s.precision),
        precision_at_k: mean(&|s| s.precision_at_k),
        avg_precision: mean(&|s| s.avg_precision),
        dcg: mean(&|s| s.dcg),
        ndcg: mean(&|s| s.ndcg),
        tau: correlation_mean(&|s| s.tau),
        rho: correlation_mean(&|s| s.rho),
        defined_correlations: defined.len(),
    }
}
