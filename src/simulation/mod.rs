//! Monte Carlo simulation across repeated tournament runs

pub mod runner;

pub use runner::{AggregateSummary, Simulation, SimulationReport};
