//! Error types for the tournament simulator
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific tournament scenarios
#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("No perfect matching exists for round {round}")]
    NoPerfectMatching { round: u32 },

    #[error("Invalid competitor strength {value} (must be positive and finite)")]
    InvalidStrength { value: f64 },

    #[error("Unknown strength distribution: {tag}")]
    UnknownDistribution { tag: String },

    #[error("Evaluation failed: {reason}")]
    EvaluationFailed { reason: String },
}
