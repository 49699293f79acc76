//! Swiss pairing graph
//!
//! Pairing desirability lives in a flat N×N symmetric weight matrix over
//! the complete graph of competitors. Played pairs are excluded by
//! overwriting their weight with a large negative sentinel rather than by
//! deleting the edge; the pair index space stays complete so a perfect
//! matching always exists, and at matching time the sentinel keeps a
//! rematch strictly worse than any pairing with fewer rematches.

use crate::engine::matching::maximum_weight_matching;
use crate::error::{Result, TournamentError};
use crate::types::TeamId;

/// Baseline weight for a pair with no information yet
pub const BASELINE_WEIGHT: i64 = 1;

/// Sentinel for pairs that already played. Strictly below every value the
/// cost function can produce, so an excluded pair is never re-selected
/// while a valid alternative exists.
pub const EXCLUDED_WEIGHT: i64 = -10_000;

/// Desirability of pairing two competitors given their win counts
///
/// Records that diverged by more than `diff_threshold` wins get the minimal
/// cost 1 (the Swiss bracket rule); otherwise the cost decays
/// quadratically with the win differential.
pub fn pair_cost(wins_a: u32, wins_b: u32, alpha: i64, beta: i64, diff_threshold: u32) -> i64 {
    let diff = u32::abs_diff(wins_a, wins_b);
    if diff > diff_threshold {
        1
    } else {
        alpha - (beta * i64::from(diff)).pow(2)
    }
}

/// Complete-graph pairing weights for one tournament run
#[derive(Debug, Clone)]
pub struct PairingGraph {
    n: usize,
    weights: Vec<i64>,
}

impl PairingGraph {
    /// Create a graph over `n` competitors with every pair at the baseline
    /// weight
    pub fn new(n: usize) -> Self {
        Self {
            n,
            weights: vec![BASELINE_WEIGHT; n * n],
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Current weight of the unordered pair `(a, b)`
    pub fn weight(&self, a: TeamId, b: TeamId) -> i64 {
        self.weights[a * self.n + b]
    }

    /// Whether `(a, b)` has already played
    pub fn is_excluded(&self, a: TeamId, b: TeamId) -> bool {
        self.weight(a, b) == EXCLUDED_WEIGHT
    }

    fn set_weight(&mut self, a: TeamId, b: TeamId, w: i64) {
        self.weights[a * self.n + b] = w;
        self.weights[b * self.n + a] = w;
    }

    /// Permanently exclude the pair `(a, b)` from future pairings
    pub fn exclude(&mut self, a: TeamId, b: TeamId) {
        self.set_weight(a, b, EXCLUDED_WEIGHT);
    }

    /// Recompute pair weights from the current win tally
    ///
    /// Excluded entries are left untouched, never resurrected.
    pub fn rebalance(&mut self, wins: &[u32], alpha: i64, beta: i64, diff_threshold: u32) {
        debug_assert_eq!(wins.len(), self.n);
        for a in 0..self.n {
            for b in (a + 1)..self.n {
                if !self.is_excluded(a, b) {
                    self.set_weight(a, b, pair_cost(wins[a], wins[b], alpha, beta, diff_threshold));
                }
            }
        }
    }

    /// Compute the next round's pairing via maximum-weight perfect matching
    ///
    /// Returns `n / 2` disjoint pairs covering every competitor, with each
    /// pair normalized `(low, high)` and the list ordered by the lower
    /// index, so the result is deterministic for a fixed weight matrix.
    /// `round` is carried only for error context.
    pub fn next_pairing(&self, round: u32) -> Result<Vec<(TeamId, TeamId)>> {
        if self.n % 2 != 0 {
            return Err(TournamentError::NoPerfectMatching { round }.into());
        }

        // All weights are made positive, so on a complete even graph the
        // maximum-weight matching is guaranteed perfect. Valid pairs are
        // lifted above excluded ones by more than the whole cost spread of
        // a pairing, so the matching first maximizes the number of
        // rematch-free pairs and only then the total cost. Among
        // rematch-free pairings every edge carries the same offset, so the
        // cost argmax is unchanged.
        let mut w_min = i64::MAX;
        let mut w_max = i64::MIN;
        for a in 0..self.n {
            for b in (a + 1)..self.n {
                if !self.is_excluded(a, b) {
                    w_min = w_min.min(self.weight(a, b));
                    w_max = w_max.max(self.weight(a, b));
                }
            }
        }
        let spread = if w_min > w_max { 1 } else { w_max - w_min + 1 };
        let lift = (self.n as i64 / 2) * spread + 1;
        let weight = |a: usize, b: usize| {
            let w = self.weight(a, b);
            if w == EXCLUDED_WEIGHT {
                1
            } else {
                w - w_min + 1 + lift
            }
        };
        let mates = maximum_weight_matching(self.n, &weight);

        let mut pairs = Vec::with_capacity(self.n / 2);
        for (a, mate) in mates.iter().enumerate() {
            match mate {
                Some(b) if *b < self.n && mates[*b] == Some(a) => {
                    if a < *b {
                        pairs.push((a, *b));
                    }
                }
                _ => return Err(TournamentError::NoPerfectMatching { round }.into()),
            }
        }
        if pairs.len() != self.n / 2 {
            return Err(TournamentError::NoPerfectMatching { round }.into());
        }
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_symmetric_and_bracketed() {
        let (alpha, beta) = (3500, 35);
        assert_eq!(pair_cost(2, 2, alpha, beta, 1), 3500);
        assert_eq!(pair_cost(3, 2, alpha, beta, 1), 3500 - 35 * 35);
        assert_eq!(pair_cost(2, 3, alpha, beta, 1), pair_cost(3, 2, alpha, beta, 1));
        // Diverged records collapse to the minimal weight
        assert_eq!(pair_cost(4, 2, alpha, beta, 1), 1);
        assert_eq!(pair_cost(0, 5, alpha, beta, 1), 1);
    }

    #[test]
    fn test_cost_strictly_decreasing_within_bracket() {
        let (alpha, beta) = (3500, 35);
        assert!(pair_cost(1, 1, alpha, beta, 1) > pair_cost(1, 0, alpha, beta, 1));
        assert!(pair_cost(1, 0, alpha, beta, 1) > pair_cost(2, 0, alpha, beta, 1));
    }

    #[test]
    fn test_cost_stays_above_sentinel() {
        let (alpha, beta) = (3500, 35);
        for diff in 0..=10u32 {
            assert!(pair_cost(diff, 0, alpha, beta, 1) > EXCLUDED_WEIGHT);
        }
    }

    #[test]
    fn test_exclusion_is_permanent_across_rebalance() {
        let mut graph = PairingGraph::new(4);
        graph.exclude(0, 1);
        assert!(graph.is_excluded(0, 1));
        assert!(graph.is_excluded(1, 0));

        graph.rebalance(&[1, 1, 0, 0], 3500, 35, 1);
        assert!(graph.is_excluded(0, 1));
        assert_eq!(graph.weight(0, 2), 3500 - 35 * 35);
        assert_eq!(graph.weight(2, 3), 3500);
    }

    #[test]
    fn test_pairing_avoids_excluded_pairs() {
        let mut graph = PairingGraph::new(4);
        // Round one was (0,1) and (2,3); the only rematch-free pairing left
        // pairs across: either (0,2)(1,3) or (0,3)(1,2).
        graph.exclude(0, 1);
        graph.exclude(2, 3);
        let pairs = graph.next_pairing(1).unwrap();
        assert_eq!(pairs.len(), 2);
        for (a, b) in pairs {
            assert!(!graph.is_excluded(a, b));
        }
    }

    #[test]
    fn test_pairing_prefers_equal_records() {
        let mut graph = PairingGraph::new(4);
        graph.exclude(0, 1);
        graph.exclude(2, 3);
        // 0 and 2 are 1-0, 1 and 3 are 0-1
        graph.rebalance(&[1, 0, 1, 0], 3500, 35, 1);
        let pairs = graph.next_pairing(1).unwrap();
        assert!(pairs.contains(&(0, 2)));
        assert!(pairs.contains(&(1, 3)));
    }

    #[test]
    fn test_rematch_avoided_even_at_minimal_cost() {
        // (0,1) already played. Avoiding the rematch forces 0 and 1 into
        // cross-bracket pairs worth only 1 each, yet that still beats
        // re-pairing them, and the untouched brackets stay intact.
        let mut graph = PairingGraph::new(8);
        graph.exclude(0, 1);
        graph.rebalance(&[0, 0, 2, 2, 4, 4, 6, 6], 3500, 35, 1);
        let pairs = graph.next_pairing(4).unwrap();
        for (a, b) in &pairs {
            assert!(!graph.is_excluded(*a, *b));
        }
        assert!(pairs.contains(&(4, 5)));
        assert!(pairs.contains(&(6, 7)));
    }

    #[test]
    fn test_odd_count_fails() {
        let graph = PairingGraph::new(5);
        let err = graph.next_pairing(2).unwrap_err();
        let err = err.downcast::<TournamentError>().unwrap();
        assert!(matches!(err, TournamentError::NoPerfectMatching { round: 2 }));
    }

    #[test]
    fn test_forced_rematch_still_perfect() {
        // Every pair excluded: a perfect matching still exists because
        // exclusion is a sentinel, not a deletion.
        let mut graph = PairingGraph::new(4);
        for a in 0..4 {
            for b in (a + 1)..4 {
                graph.exclude(a, b);
            }
        }
        let pairs = graph.next_pairing(3).unwrap();
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_pairing_deterministic() {
        let mut graph = PairingGraph::new(8);
        graph.exclude(0, 7);
        graph.exclude(1, 6);
        graph.rebalance(&[1, 1, 0, 0, 1, 0, 1, 0], 3500, 35, 1);
        let first = graph.next_pairing(1).unwrap();
        for _ in 0..5 {
            assert_eq!(graph.next_pairing(1).unwrap(), first);
        }
    }
}
