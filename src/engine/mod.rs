//! Swiss tournament engine
//!
//! The engine is split into three pure computational services: the match
//! resolver (stochastic win model), the pairing graph (weight matrix plus
//! maximum-weight perfect matching), and the tournament state machine that
//! drives rounds.

pub mod matching;
pub mod pairing;
pub mod resolver;
pub mod tournament;

pub use pairing::PairingGraph;
pub use resolver::{resolve_match, MatchWinner};
pub use tournament::{Tournament, TournamentResult};
