//! Tournament orchestration
//!
//! Drives rounds over the pairing graph and match resolver: round 0 pairs
//! by a seeded shuffle, later rounds by maximum-weight perfect matching,
//! and every completed round feeds the win tally back into the graph
//! weights. A completed run yields an immutable result table; a failed run
//! yields nothing.

use crate::config::TournamentSettings;
use crate::engine::pairing::PairingGraph;
use crate::engine::resolver::{resolve_match, MatchWinner};
use crate::error::Result;
use crate::strength::generate_strengths;
use crate::types::{MatchRecord, ResultRow, ResultTable, TeamId};
use crate::utils::derive_stream_seed;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

// Independent RNG stream tags per stochastic concern
const STRENGTH_STREAM: u64 = 0;
const PAIRING_STREAM: u64 = 1;
const OUTCOME_STREAM: u64 = 2;

/// Output of one completed tournament run
#[derive(Debug, Clone)]
pub struct TournamentResult {
    table: ResultTable,
    matches: Vec<MatchRecord>,
}

impl TournamentResult {
    /// Per-competitor `{strength, wins}` rows in index order
    pub fn table(&self) -> &ResultTable {
        &self.table
    }

    /// Append-only match history across all rounds
    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }
}

/// A Swiss tournament over a fixed field of competitors
///
/// Strengths are tournament identity: they are drawn once at construction
/// and survive re-runs. The win tally and pairing graph are created fresh
/// inside every `run`, and match outcomes consume an instance-owned RNG
/// stream, so re-invoking `run` produces a fresh stochastic outcome over
/// the same field.
#[derive(Debug)]
pub struct Tournament {
    settings: TournamentSettings,
    seed: u64,
    strengths: Vec<f64>,
    outcome_rng: StdRng,
}

impl Tournament {
    /// Create a tournament, validating settings and drawing the strength
    /// vector
    pub fn new(settings: TournamentSettings) -> Result<Self> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let strengths = match &settings.strengths {
            Some(supplied) => supplied.clone(),
            None => generate_strengths(
                settings.n_teams,
                &settings.distribution,
                derive_stream_seed(seed, STRENGTH_STREAM),
            )?,
        };
        let outcome_rng = StdRng::seed_from_u64(derive_stream_seed(seed, OUTCOME_STREAM));
        Ok(Self {
            settings,
            seed,
            strengths,
            outcome_rng,
        })
    }

    /// The resolved base seed for this tournament
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The immutable strength vector
    pub fn strengths(&self) -> &[f64] {
        &self.strengths
    }

    pub fn settings(&self) -> &TournamentSettings {
        &self.settings
    }

    /// Run the tournament once
    ///
    /// All-or-nothing: any error aborts the run and no partial result table
    /// is returned.
    pub fn run(&mut self) -> Result<TournamentResult> {
        let n = self.settings.n_teams;
        let rounds = self.settings.n_rounds;
        let mut wins = vec![0u32; n];
        let mut graph = PairingGraph::new(n);
        let mut matches = Vec::with_capacity(rounds as usize * n / 2);

        for round in 0..rounds {
            let pairs = if round == 0 {
                self.opening_pairing()
            } else {
                graph.next_pairing(round)?
            };
            debug!(round, ?pairs, "round pairing");

            for (home, away) in pairs {
                let winner = match resolve_match(
                    self.strengths[home],
                    self.strengths[away],
                    &mut self.outcome_rng,
                )? {
                    MatchWinner::Home => home,
                    MatchWinner::Away => away,
                };
                wins[winner] += 1;
                graph.exclude(home, away);
                matches.push(MatchRecord {
                    round,
                    home,
                    away,
                    winner,
                });
            }

            graph.rebalance(
                &wins,
                self.settings.alpha,
                self.settings.beta,
                self.settings.diff_threshold,
            );
        }

        let rows = self
            .strengths
            .iter()
            .zip(&wins)
            .map(|(&strength, &wins)| ResultRow { strength, wins })
            .collect();
        Ok(TournamentResult {
            table: ResultTable::new(rows),
            matches,
        })
    }

    /// Uniform random pairing for round 0: seeded shuffle, then consecutive
    /// pairs
    ///
    /// The shuffle RNG is derived from the tournament seed alone, keeping
    /// the opening pairing reproducible independently of match-outcome
    /// randomness.
    fn opening_pairing(&self) -> Vec<(TeamId, TeamId)> {
        let mut order: Vec<TeamId> = (0..self.settings.n_teams).collect();
        let mut rng = StdRng::seed_from_u64(derive_stream_seed(self.seed, PAIRING_STREAM));
        order.shuffle(&mut rng);
        order
            .chunks_exact(2)
            .map(|pair| (pair[0].min(pair[1]), pair[0].max(pair[1])))
            .collect()
    }
}
