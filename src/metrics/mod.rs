//! Ranking-quality metrics
//!
//! Compares the emergent win-count ranking of a completed tournament to
//! the ground-truth strength ranking: retrieval-style metrics over the
//! strength top-k, and rank-correlation statistics over the full field.

pub mod correlation;
pub mod evaluator;
pub mod retrieval;

pub use evaluator::RankingEvaluator;
