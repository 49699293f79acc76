//! Configuration management for the tournament simulator

pub mod app;
pub mod tournament;

pub use app::{validate_config, AppConfig, SimulationSettings};
pub use tournament::TournamentSettings;
