//! Stochastic match resolution
//!
//! Winner selection follows the Bradley-Terry-Luce model: the probability
//! that A beats B is `s_a / (s_a + s_b)`. The function is pure given the
//! RNG state and has no side effects beyond advancing the RNG.

use crate::error::{Result, TournamentError};
use rand::Rng;

/// Which side of a pair won its match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchWinner {
    Home,
    Away,
}

/// Resolve one match between two strengths
///
/// Strengths must be positive and finite; a non-positive strength reaching
/// this point is an upstream validation failure and fails fast rather than
/// producing a NaN probability.
pub fn resolve_match<R: Rng>(
    home_strength: f64,
    away_strength: f64,
    rng: &mut R,
) -> Result<MatchWinner> {
    for value in [home_strength, away_strength] {
        if value <= 0.0 || !value.is_finite() {
            return Err(TournamentError::InvalidStrength { value }.into());
        }
    }

    let home_win_probability = home_strength / (home_strength + away_strength);
    let roll: f64 = rng.gen();
    if roll < home_win_probability {
        Ok(MatchWinner::Home)
    } else {
        Ok(MatchWinner::Away)
    }
}
