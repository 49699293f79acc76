//! Tournament-level configuration
//!
//! Settings for a single tournament: field size, round count, seeding,
//! strength distribution and the Swiss pairing cost parameters.

use crate::error::{Result, TournamentError};
use crate::strength::StrengthDistribution;
use serde::{Deserialize, Serialize};

/// Default scale parameter of the pairing cost function
pub const DEFAULT_ALPHA: i64 = 3500;

/// Default dispersion parameter of the pairing cost function
pub const DEFAULT_BETA: i64 = 35;

/// Default size of the "relevant" set for top-k ranking metrics
pub const DEFAULT_TOP_K: usize = 8;

/// Configuration for one tournament
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentSettings {
    /// Number of competitors; must be even and positive
    pub n_teams: usize,
    /// Number of rounds; must be positive
    pub n_rounds: u32,
    /// Base seed; `None` derives one from system entropy
    pub seed: Option<u64>,
    /// Distribution the latent strengths are drawn from
    pub distribution: StrengthDistribution,
    /// Externally supplied strengths overriding generation
    pub strengths: Option<Vec<f64>>,
    /// Scale parameter of the pairing cost function
    pub alpha: i64,
    /// Dispersion parameter of the pairing cost function
    pub beta: i64,
    /// Win-differential above which a pairing drops to minimal desirability
    pub diff_threshold: u32,
    /// Size of the strength top-k used by the ranking evaluator
    pub top_k: usize,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            n_teams: 16,
            n_rounds: 4,
            seed: None,
            distribution: StrengthDistribution::default(),
            strengths: None,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            diff_threshold: 1,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl TournamentSettings {
    /// Validate settings values
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| -> Result<()> {
            Err(TournamentError::Configuration { message }.into())
        };

        if self.n_teams == 0 {
            return fail("n_teams must be positive".to_string());
        }
        if self.n_teams % 2 != 0 {
            return fail(format!(
                "n_teams must be even for perfect pairing, got {}",
                self.n_teams
            ));
        }
        if self.n_rounds == 0 {
            return fail("n_rounds must be positive".to_string());
        }
        if self.alpha <= 0 || self.beta <= 0 {
            return fail(format!(
                "pairing cost parameters must be positive, got alpha={}, beta={}",
                self.alpha, self.beta
            ));
        }
        if self.alpha <= self.beta.pow(2) {
            return fail(format!(
                "alpha must exceed beta^2 so the cost stays decreasing within a bracket, \
                 got alpha={}, beta={}",
                self.alpha, self.beta
            ));
        }
        if self.top_k == 0 || self.top_k > self.n_teams {
            return fail(format!(
                "top_k must be in 1..=n_teams, got {}",
                self.top_k
            ));
        }
        self.distribution.validate()?;

        if let Some(strengths) = &self.strengths {
            if strengths.len() != self.n_teams {
                return fail(format!(
                    "supplied strengths length {} does not match n_teams {}",
                    strengths.len(),
                    self.n_teams
                ));
            }
            for &value in strengths {
                if value <= 0.0 || !value.is_finite() {
                    return Err(TournamentError::InvalidStrength { value }.into());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(TournamentSettings::default().validate().is_ok());
    }

    #[test]
    fn test_odd_team_count_rejected() {
        let settings = TournamentSettings {
            n_teams: 7,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let settings = TournamentSettings {
            n_rounds: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_alpha_must_dominate_beta_squared() {
        let settings = TournamentSettings {
            alpha: 100,
            beta: 35,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_supplied_strengths_checked() {
        let mut settings = TournamentSettings {
            n_teams: 4,
            strengths: Some(vec![1.0, 2.0, 3.0]),
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        settings.strengths = Some(vec![1.0, 2.0, 0.0, 4.0]);
        assert!(settings.validate().is_err());

        settings.strengths = Some(vec![1.0, 2.0, 3.0, 4.0]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_top_k_bounds() {
        let settings = TournamentSettings {
            n_teams: 4,
            top_k: 8,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
