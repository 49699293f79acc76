//! Latent strength generation for tournament competitors
//!
//! Strengths are drawn once per tournament from a configurable probability
//! distribution and stay fixed for the tournament's lifetime.

pub mod distribution;
pub mod generator;

pub use distribution::StrengthDistribution;
pub use generator::generate_strengths;
