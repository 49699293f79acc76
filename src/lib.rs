//! Swiss Arena - Swiss-system tournament simulator
//!
//! This crate simulates multi-round Swiss tournaments among competitors
//! with latent strengths drawn from a configurable distribution, pairing
//! each round by maximum-weight perfect matching over a rematch-excluding
//! weight matrix, and measures how well the emergent win-count ranking
//! recovers the true strength ranking.

pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod simulation;
pub mod strength;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, TournamentError};
pub use types::*;

// Re-export key components
pub use engine::{PairingGraph, Tournament, TournamentResult};
pub use metrics::RankingEvaluator;
pub use simulation::{Simulation, SimulationReport};
pub use strength::StrengthDistribution;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
