pub mod config;
pub mod topology;
pub mod stats;
pub mod scenarios;
pub mod simulation_results;
pub mod run_simulation;

use thiserror::Error;

pub use config::{Config, ConfigError};
pub use run_simulation::run_simulation;
pub use simulation_results::SimulationResults;
pub use stats::UtilizationStats;
pub use topology::{load_topology, parse_topology, TopologyFileError};

/// Any failure of a simulator run
#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Topology(#[from] TopologyFileError),
    #[error("Simulation failed: {0}")]
    Model(#[from] flowplane::ModelError),
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}
