//! Strength distribution selection and parameterization
//!
//! The distribution is a tagged enum rather than a string-keyed branch, so a
//! typo cannot silently select the wrong sampler. Unknown tags coming from
//! external input fall back to the default lognormal with a logged warning
//! unless strict parsing is requested.

use crate::error::{Result, TournamentError};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Probability distribution for latent competitor strengths
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StrengthDistribution {
    Exponential {
        #[serde(default = "default_scale")]
        scale: f64,
    },
    Uniform {
        #[serde(default)]
        low: f64,
        #[serde(default = "default_high")]
        high: f64,
    },
    Lognormal {
        #[serde(default)]
        mu: f64,
        #[serde(default = "default_sigma")]
        sigma: f64,
    },
    Beta {
        #[serde(default = "default_shape1")]
        shape1: f64,
        #[serde(default = "default_shape2")]
        shape2: f64,
    },
    Gamma {
        #[serde(default = "default_shape1")]
        shape: f64,
        #[serde(default = "default_scale")]
        scale: f64,
    },
}

fn default_scale() -> f64 {
    1.0
}

fn default_high() -> f64 {
    1.0
}

fn default_sigma() -> f64 {
    1.0
}

fn default_shape1() -> f64 {
    2.0
}

fn default_shape2() -> f64 {
    5.0
}

impl Default for StrengthDistribution {
    fn default() -> Self {
        Self::Lognormal { mu: 0.0, sigma: 1.0 }
    }
}

impl std::fmt::Display for StrengthDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exponential { .. } => write!(f, "exponential"),
            Self::Uniform { .. } => write!(f, "uniform"),
            Self::Lognormal { .. } => write!(f, "lognormal"),
            Self::Beta { .. } => write!(f, "beta"),
            Self::Gamma { .. } => write!(f, "gamma"),
        }
    }
}

impl StrengthDistribution {
    /// Parse a distribution tag with default parameters
    ///
    /// In lenient mode an unknown tag falls back to the default lognormal
    /// with a warning. This mirrors legacy behavior and is a documented
    /// footgun; pass `strict = true` to get a hard error instead.
    pub fn parse_tag(tag: &str, strict: bool) -> Result<Self> {
        match tag.to_lowercase().as_str() {
            "exp" | "exponential" => Ok(Self::Exponential { scale: 1.0 }),
            "unif" | "uniform" => Ok(Self::Uniform { low: 0.0, high: 1.0 }),
            "lognorm" | "lognormal" => Ok(Self::default()),
            "beta" => Ok(Self::Beta {
                shape1: default_shape1(),
                shape2: default_shape2(),
            }),
            "gamma" => Ok(Self::Gamma {
                shape: default_shape1(),
                scale: default_scale(),
            }),
            other => {
                if strict {
                    Err(TournamentError::UnknownDistribution {
                        tag: other.to_string(),
                    }
                    .into())
                } else {
                    warn!(tag = other, "unknown strength distribution, using lognormal");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate distribution parameters
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| -> Result<()> {
            Err(TournamentError::Configuration { message }.into())
        };
        match *self {
            Self::Exponential { scale } => {
                if scale <= 0.0 || !scale.is_finite() {
                    return fail(format!("exponential scale must be positive, got {scale}"));
                }
            }
            Self::Uniform { low, high } => {
                if low < 0.0 {
                    return fail(format!("uniform low must be non-negative, got {low}"));
                }
                if high <= low {
                    return fail(format!("uniform bounds must satisfy low < high, got [{low}, {high}]"));
                }
            }
            Self::Lognormal { mu, sigma } => {
                if !mu.is_finite() {
                    return fail(format!("lognormal mu must be finite, got {mu}"));
                }
                if sigma <= 0.0 || !sigma.is_finite() {
                    return fail(format!("lognormal sigma must be positive, got {sigma}"));
                }
            }
            Self::Beta { shape1, shape2 } => {
                if shape1 <= 0.0 || shape2 <= 0.0 {
                    return fail(format!(
                        "beta shapes must be positive, got ({shape1}, {shape2})"
                    ));
                }
            }
            Self::Gamma { shape, scale } => {
                if shape <= 0.0 || scale <= 0.0 {
                    return fail(format!(
                        "gamma parameters must be positive, got ({shape}, {scale})"
                    ));
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
    fn test_parse_known_tags() {
        assert_eq!(
            StrengthDistribution::parse_tag("exp", true).unwrap(),
            StrengthDistribution::Exponential { scale: 1.0 }
        );
        assert_eq!(
            StrengthDistribution::parse_tag("Uniform", true).unwrap(),
            StrengthDistribution::Uniform { low: 0.0, high: 1.0 }
        );
        assert_eq!(
            StrengthDistribution::parse_tag("lognorm", true).unwrap(),
            StrengthDistribution::default()
        );
    }

    #[test]
    fn test_unknown_tag_lenient_fallback() {
        let dist = StrengthDistribution::parse_tag("zipf", false).unwrap();
        assert_eq!(dist, StrengthDistribution::default());
    }

    #[test]
    fn test_unknown_tag_strict_errors() {
        assert!(StrengthDistribution::parse_tag("zipf", true).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        assert!(StrengthDistribution::Exponential { scale: 0.0 }.validate().is_err());
        assert!(StrengthDistribution::Uniform { low: 2.0, high: 1.0 }.validate().is_err());
        assert!(StrengthDistribution::Beta { shape1: -1.0, shape2: 5.0 }.validate().is_err());
        assert!(StrengthDistribution::default().validate().is_ok());
    }

    #[test]
    fn test_toml_roundtrip_with_defaults() {
        let dist: StrengthDistribution = toml::from_str("kind = \"lognormal\"").unwrap();
        assert_eq!(dist, StrengthDistribution::Lognormal { mu: 0.0, sigma: 1.0 });
    }
}
