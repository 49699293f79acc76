//! Main application configuration
//!
//! This module defines the top-level configuration for the simulator CLI,
//! including TOML file loading, environment variable overrides and
//! validation.

use crate::config::tournament::TournamentSettings;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub tournament: TournamentSettings,
    pub simulation: SimulationSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Multi-trial simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of independent tournament runs to aggregate
    pub trials: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "swiss-arena".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self { trials: 100 }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(teams) = env::var("TOURNAMENT_TEAMS") {
            config.tournament.n_teams = teams
                .parse()
                .map_err(|_| anyhow!("Invalid TOURNAMENT_TEAMS value: {}", teams))?;
        }
        if let Ok(rounds) = env::var("TOURNAMENT_ROUNDS") {
            config.tournament.n_rounds = rounds
                .parse()
                .map_err(|_| anyhow!("Invalid TOURNAMENT_ROUNDS value: {}", rounds))?;
        }
        if let Ok(seed) = env::var("TOURNAMENT_SEED") {
            config.tournament.seed = Some(
                seed.parse()
                    .map_err(|_| anyhow!("Invalid TOURNAMENT_SEED value: {}", seed))?,
            );
        }
        if let Ok(trials) = env::var("SIMULATION_TRIALS") {
            config.simulation.trials = trials
                .parse()
                .map_err(|_| anyhow!("Invalid SIMULATION_TRIALS value: {}", trials))?;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.simulation.trials == 0 {
        return Err(anyhow!("Simulation trials must be greater than 0"));
    }

    config.tournament.validate()?;

    Ok(())
}
