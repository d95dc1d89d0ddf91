//! Configuration loader and validator for the traffic simulator.
//! Handles parsing, validation, and access to the run configuration file.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// Main Configuration Structs
// ------------------------------------------------------------------------------------------------

/// Main configuration struct for a simulation run.
///
/// Names the topology to load, how the run is seeded and reported, and the
/// explicit failure scenarios to evaluate on top of the baseline.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Topology file to load
    pub topology: TopologyConfig,
    /// Run-wide simulation settings
    pub simulation: SimulationConfig,
    /// Explicit failure scenarios, evaluated one at a time against the baseline
    #[serde(default)]
    pub scenarios: Vec<ScenarioConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TopologyConfig {
    /// Path to the topology file, relative to the config file when not absolute
    pub file: String,
}

/// Run-wide simulation settings
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    /// Seed for the LSP tie-break; a random seed is drawn and reported when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Whether to fail every circuit and node one at a time
    #[serde(default)]
    pub failure_sweep: bool,
    /// Utilization above which an interface is reported as hot (1.0 = full)
    #[serde(default = "default_utilization_threshold")]
    pub utilization_threshold: f64,
    /// Directory the results file is written to
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

/// A named set of elements to fail together
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub fail_interfaces: Vec<InterfaceRef>,
    #[serde(default)]
    pub fail_nodes: Vec<String>,
}

/// An interface addressed by its name and owning node
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct InterfaceRef {
    pub name: String,
    pub node: String,
}

fn default_utilization_threshold() -> f64 {
    0.8
}

fn default_results_dir() -> String {
    "simulator/results".to_string()
}

// ------------------------------------------------------------------------------------------------
// Error Types and Validation
// ------------------------------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// ------------------------------------------------------------------------------------------------
// Configuration Implementation Methods
// ------------------------------------------------------------------------------------------------

impl Config {
    /// Read, parse and validate the configuration at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path)?;
        Self::parse(&config_str)
    }

    /// Parse and validate configuration text
    pub fn parse(config_str: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.topology.file.trim().is_empty() {
            return Err(ConfigError::ValidationError("Topology file must not be empty".into()));
        }
        let threshold = self.simulation.utilization_threshold;
        if !(threshold > 0.0 && threshold <= 10.0) {
            return Err(ConfigError::ValidationError(format!(
                "Utilization threshold must be within (0, 10], got {}",
                threshold
            )));
        }
        if self.simulation.results_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError("Results directory must not be empty".into()));
        }

        let mut names = HashSet::new();
        for scenario in &self.scenarios {
            if scenario.name.trim().is_empty() {
                return Err(ConfigError::ValidationError("Scenario names must not be empty".into()));
            }
            if !names.insert(scenario.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "Scenario '{}' is defined more than once",
                    scenario.name
                )));
            }
            if scenario.fail_interfaces.is_empty() && scenario.fail_nodes.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Scenario '{}' fails nothing",
                    scenario.name
                )));
            }
        }
        Ok(())
    }

    /// The topology file, resolved against the directory holding the config file
    pub fn topology_path(&self, config_path: &Path) -> PathBuf {
        let file = Path::new(&self.topology.file);
        if file.is_absolute() {
            return file.to_path_buf();
        }
        match config_path.parent() {
            Some(dir) => dir.join(file),
            None => file.to_path_buf(),
        }
    }
}
